//! Authsim Application - Session lifecycle orchestration
//!
//! This crate holds the moving parts of the simulator:
//! - The [`SessionManager`] state machine (login, refresh, logout)
//! - The background expiry monitor bound to the authenticated state
//! - The [`Clock`] port that keeps all temporal logic testable
//! - Tunable [`SessionConfig`] lifecycle constants

pub mod config;
pub mod ports;
pub mod session;

pub use config::SessionConfig;
pub use ports::{Clock, ManualClock};
pub use session::{SessionHandle, SessionManager};
