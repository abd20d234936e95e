use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::patch::{string_value, Patchable};
use super::validate::{require, require_email, Validate};
use crate::error::Result;

/// A teacher row. `class` is the class this teacher leads; students point at it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Teacher {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class: String,
    pub subject: String,
}

impl Validate for Teacher {
    fn validate(&self) -> Result<()> {
        require(&[
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.class,
            &self.subject,
        ])?;
        require_email(&self.email)
    }
}

impl Patchable for Teacher {
    fn set_field(&mut self, name: &str, value: &Value) -> Result<bool> {
        match name {
            "first_name" => self.first_name = string_value(value)?,
            "last_name" => self.last_name = string_value(value)?,
            "email" => self.email = string_value(value)?,
            "class" => self.class = string_value(value)?,
            "subject" => self.subject = string_value(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::apply_patch;
    use serde_json::json;

    #[test]
    fn test_subject_required() {
        let teacher = Teacher {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@school.com".to_string(),
            class: "7C".to_string(),
            ..Default::default()
        };
        assert!(teacher.validate().is_err());

        let teacher = Teacher {
            subject: "Computing".to_string(),
            ..teacher
        };
        assert!(teacher.validate().is_ok());
    }

    #[test]
    fn test_patch_subject() {
        let mut teacher = Teacher {
            subject: "Maths".to_string(),
            ..Default::default()
        };
        apply_patch(&mut teacher, json!({"subject": "Physics"}).as_object().unwrap()).unwrap();
        assert_eq!(teacher.subject, "Physics");
    }
}
