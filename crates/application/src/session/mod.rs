//! Session lifecycle: state machine, expiry monitor, and handles.
//!
//! This module provides:
//! - [`SessionManager`], the owning state machine for one session
//! - A background monitor that renews or tears down the session
//! - [`SessionHandle`], a weak handle for injecting session access
//!   into consumers

mod handle;
mod manager;
mod monitor;

pub use handle::SessionHandle;
pub use manager::SessionManager;
