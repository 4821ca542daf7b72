use serde::Serialize;
use thiserror::Error;

/// One rejected field in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    /// Stable machine-readable code: `missing`, `string_type`, `email`, `object_type`.
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self { field: field.to_string(), code: "missing".into(), message: "field required".into() }
    }

    pub fn string_type(field: &str) -> Self {
        Self { field: field.to_string(), code: "string_type".into(), message: "input should be a valid string".into() }
    }

    pub fn email(field: &str) -> Self {
        Self {
            field: field.to_string(),
            code: "email".into(),
            message: "value is not a valid email address".into(),
        }
    }

    pub fn object_type() -> Self {
        Self { field: "body".into(), code: "object_type".into(), message: "request body should be a JSON object".into() }
    }
}

/// A submission failed schema validation. Carries every failing field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error: {}", summary(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: FieldError) -> Self {
        Self { fields: vec![field] }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.field == name)
    }
}

fn summary(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("document error: {0}")]
    Document(String),
}
