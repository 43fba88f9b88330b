//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// This is the standard ID format for all Authsim entities. UUID v7
/// carries timestamp information and sorts by creation order.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
