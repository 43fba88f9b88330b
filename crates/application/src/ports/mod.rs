//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the session core and external
//! systems. Each port is a trait that can be implemented by adapters
//! in the infrastructure layer.

mod clock;

pub use clock::{Clock, ManualClock};
