//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement (after trimming whitespace)
pub const MIN_NAME_LENGTH: usize = 1;

/// Basic address syntax accepted for user emails
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// =============================================================================
// Messages
// =============================================================================

/// Returned when a create or update targets an email owned by another record
pub const MSG_EMAIL_TAKEN: &str = "User with this email already exists";

/// Returned when the name field fails validation
pub const MSG_NAME_REQUIRED: &str = "Name is required and must be a non-empty string";

/// Returned when the email field fails validation
pub const MSG_EMAIL_INVALID: &str = "Valid email is required";

/// Build the not-found message for a user id
pub fn user_not_found_message(id: impl std::fmt::Display) -> String {
    format!("User with id {} not found", id)
}
