use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::{self, AuthError};

/// Account row. `password` always holds a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    /// `None` until the row is persisted
    pub id: Option<i64>,
    pub username: String,
    pub password: String,
    pub faculty: String,
    pub department: String,
}

/// Public projection of a [`User`]; the password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserJson {
    pub id: Option<i64>,
    pub username: String,
    pub faculty: String,
    pub department: String,
}

impl User {
    /// Build an unsaved user, hashing the plaintext password.
    pub fn new(
        username: impl Into<String>,
        password: &str,
        faculty: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            id: None,
            username: username.into(),
            password: auth::hash_password(password)?,
            faculty: faculty.into(),
            department: department.into(),
        })
    }

    pub fn check_password(&self, password: &str) -> bool {
        auth::verify_password(password, &self.password)
    }

    pub fn to_json(&self) -> UserJson {
        UserJson {
            id: self.id,
            username: self.username.clone(),
            faculty: self.faculty.clone(),
            department: self.department.clone(),
        }
    }
}
