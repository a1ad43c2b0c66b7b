//! User Service Library
//!
//! Owns the authoritative collection of user records and the use cases
//! built on top of it. The HTTP gateway depends on the [`UserService`]
//! trait only.

pub mod repository;
pub mod service;

pub use repository::{InMemoryUserStore, UserRepository};
pub use service::{UserManager, UserService};
