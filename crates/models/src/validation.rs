//! Field-level checks shared by every record kind.
//!
//! Submissions arrive as untyped JSON. Each kind reads only the fields it
//! declares through [`PayloadReader`]; anything else in the body is never
//! looked at and so never reaches the stored document.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{FieldError, ValidationError};

// local-part "@" domain, domain needs at least one dot; labels may not start/end with '-'.
// Letters and digits are Unicode-aware so UTF-8 local parts and IDN domains pass.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}\p{M}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}\p{M}!#$%&'*+/=?^_`{|}~-]+)*@(?:[\p{L}\p{N}](?:[\p{L}\p{N}\p{M}-]{0,61}[\p{L}\p{N}\p{M}])?\.)+[\p{L}\p{N}](?:[\p{L}\p{N}\p{M}-]{0,61}[\p{L}\p{N}\p{M}])?$",
    )
    .expect("email regex compiles")
});

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

pub fn is_valid_email(raw: &str) -> bool {
    if raw.len() > MAX_EMAIL_LEN {
        return false;
    }
    match raw.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_PART_LEN => EMAIL_RE.is_match(raw),
        _ => false,
    }
}

/// Lower-cases the domain part; the local part is kept as sent.
pub fn normalize_email(raw: &str) -> String {
    match raw.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => raw.to_string(),
    }
}

/// Collects typed fields out of a JSON body, accumulating every failure.
pub struct PayloadReader<'a> {
    map: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a Value) -> Self {
        match payload {
            Value::Object(map) => Self { map: Some(map), errors: Vec::new() },
            _ => Self { map: None, errors: vec![FieldError::object_type()] },
        }
    }

    /// Present, non-null and a JSON string.
    pub fn required_str(&mut self, field: &str) -> Option<String> {
        let map = self.map?;
        match map.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(FieldError::missing(field));
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.errors.push(FieldError::string_type(field));
                None
            }
        }
    }

    /// Absent and `null` both read as `None`; anything else must be a string.
    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        let map = self.map?;
        match map.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.errors.push(FieldError::string_type(field));
                None
            }
        }
    }

    pub fn required_email(&mut self, field: &str) -> Option<String> {
        let value = self.required_str(field)?;
        if is_valid_email(&value) {
            Some(normalize_email(&value))
        } else {
            self.errors.push(FieldError::email(field));
            None
        }
    }

    /// `Ok` only when no field failed so far.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields: self.errors })
        }
    }

    pub fn into_error(self) -> ValidationError {
        ValidationError { fields: self.errors }
    }
}
