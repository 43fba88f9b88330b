//! Authsim Domain - Core session types
//!
//! This crate defines the domain model for the Authsim session
//! simulator. All types here are pure Rust with no I/O dependencies;
//! anything time-dependent takes the current instant as a parameter.

pub mod error;
pub mod id;
pub mod session;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use id::generate_id;
pub use session::{Session, SessionSnapshot, User};
pub use token::Token;
