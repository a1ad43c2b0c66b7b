//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, assigned by the store
    #[cfg_attr(feature = "openapi", schema(example = "550e8400-e29b-41d4-a716-446655440000"))]
    pub id: Uuid,
    /// User display name
    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub name: String,
    /// User email address, unique across live records
    #[cfg_attr(feature = "openapi", schema(example = "john@example.com"))]
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user stamped with the current time
    pub fn new(id: Uuid, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields over this record and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUser {
    /// User display name
    pub name: String,
    /// User email address
    pub email: String,
}

/// User update data transfer object.
///
/// Each field is individually present or absent; absent fields keep their
/// previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,
    /// New email address
    pub email: Option<String>,
}

impl UpdateUser {
    /// Update touching only the name
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    /// Update touching only the email
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }
}
