//! User entity and request shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::sanitize::sanitize_input;

/// Server-assigned user identity (BIGSERIAL)
pub type UserId = i64;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: Option<String>,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of create and update requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

/// Name and surname after sanitization and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub surname: Option<String>,
}

impl UserRequest {
    /// Sanitize and validate the request.
    ///
    /// The name is checked first; the surname is only derived once the name
    /// has passed, and is kept even when it sanitizes to an empty string.
    pub fn into_fields(self) -> AppResult<UserFields> {
        let raw_name = self.name.ok_or(AppError::NameRequired)?;
        let name = sanitize_input(&raw_name).trim().to_string();
        if name.is_empty() {
            return Err(AppError::NameRequired);
        }

        let surname = self
            .surname
            .map(|surname| sanitize_input(&surname).trim().to_string());

        Ok(UserFields { name, surname })
    }
}
