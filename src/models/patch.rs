//! Partial updates by field name
//!
//! Each entity lists the fields a PATCH body may touch in its
//! [`Patchable::set_field`] match. Unknown names are ignored; a known name
//! with a value of the wrong JSON type aborts the whole patch.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A partial update as received on the wire
pub type PatchMap = Map<String, Value>;

pub trait Patchable {
    /// Overwrite the named field. Returns `Ok(false)` when `name` is not a
    /// patchable field of this entity.
    fn set_field(&mut self, name: &str, value: &Value) -> Result<bool>;
}

/// Merge every recognized key of `update` onto `target`. The `id` key is
/// never applied.
pub fn apply_patch<T: Patchable>(target: &mut T, update: &PatchMap) -> Result<()> {
    for (key, value) in update {
        if key == "id" {
            continue;
        }
        if !target.set_field(key, value)? {
            tracing::debug!("Ignoring unknown patch field: {}", key);
        }
    }
    Ok(())
}

/// Pull the target id out of a batch patch item.
///
/// Ids arrive as strings of digits; integer JSON numbers are accepted too.
pub fn patch_id(update: &PatchMap) -> Result<i32> {
    match update.get("id") {
        Some(Value::String(s)) => s.trim().parse().map_err(|_| Error::InvalidId),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(Error::InvalidId),
        _ => Err(Error::InvalidId),
    }
}

pub(crate) fn string_value(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(Error::InvalidUpdateParameters)
}

pub(crate) fn bool_value(value: &Value) -> Result<bool> {
    value.as_bool().ok_or(Error::InvalidUpdateParameters)
}
