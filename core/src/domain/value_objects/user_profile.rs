//! Public view of a user returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User;

/// User profile without credential material
///
/// Returned from signup and `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Login email address
    pub email: String,

    /// Optional display name
    pub name: Option<String>,

    /// Whether the account is enabled
    pub is_active: bool,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
