//! Authsim Infrastructure - Adapters
//!
//! Concrete implementations of the application-layer ports. Today
//! that is just the wall clock; the port/adapter split keeps the
//! session core free of direct time dependencies.

pub mod adapters;

pub use adapters::SystemClock;
