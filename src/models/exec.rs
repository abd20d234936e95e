use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::patch::{bool_value, string_value, Patchable};
use super::validate::{require, Validate};
use crate::error::Result;

/// An administrative staff account.
///
/// The password hash and the reset fields are accepted on input but never
/// written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exec {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub user_created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub password_reset_token: Option<String>,
    #[serde(skip_serializing)]
    pub password_token_expires: Option<String>,
    pub inactive_status: bool,
    pub role: String,
}

impl Exec {
    /// Checks for a full-record replace, where the password is not part of the record
    pub fn validate_profile(&self) -> Result<()> {
        require(&[
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.username,
            &self.role,
        ])
    }
}

impl Validate for Exec {
    fn validate(&self) -> Result<()> {
        self.validate_profile()?;
        require(&[&self.password])
    }
}

impl Patchable for Exec {
    fn set_field(&mut self, name: &str, value: &Value) -> Result<bool> {
        match name {
            "first_name" => self.first_name = string_value(value)?,
            "last_name" => self.last_name = string_value(value)?,
            "email" => self.email = string_value(value)?,
            "username" => self.username = string_value(value)?,
            "role" => self.role = string_value(value)?,
            "inactive_status" => self.inactive_status = bool_value(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
