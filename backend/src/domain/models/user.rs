//! Domain model for an account holder.
//!
//! Passwords and tokens belong to the auth collaborator; the backend only
//! keeps the identity record needed to scope data.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for shared::User {
    fn from(user: User) -> Self {
        shared::User {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}
