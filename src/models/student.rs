use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::patch::{string_value, Patchable};
use super::validate::{require, require_email, Validate};
use crate::error::Result;

/// A student row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class: String,
}

impl Validate for Student {
    fn validate(&self) -> Result<()> {
        require(&[&self.first_name, &self.last_name, &self.email, &self.class])?;
        require_email(&self.email)
    }
}

impl Patchable for Student {
    fn set_field(&mut self, name: &str, value: &Value) -> Result<bool> {
        match name {
            "first_name" => self.first_name = string_value(value)?,
            "last_name" => self.last_name = string_value(value)?,
            "email" => self.email = string_value(value)?,
            "class" => self.class = string_value(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
