//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The user store and the HTTP layer both speak in these types.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::{CreateUser, UpdateUser, User};
