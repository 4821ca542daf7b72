use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::FieldError;
use serde_json::{json, Value};
use service::errors::ServiceError;
use tracing::error;

/// Error response: `{"error": <title>, "detail": <optional detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<Value>) -> Self {
        Self { status, error, detail }
    }

    fn validation(fields: Vec<FieldError>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(json!(fields)))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => json!({"error": self.error, "detail": detail}),
            None => json!({"error": self.error}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => Self::validation(v.fields),
            // 存储故障属于运维问题，不向调用方暴露细节
            ServiceError::Storage(msg) => {
                error!(err = %msg, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

/// Unparseable bodies are validation failures on the whole body.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(vec![FieldError {
            field: "body".into(),
            code: "json_invalid".into(),
            message: rejection.body_text(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ValidationError;

    #[test]
    fn validation_maps_to_422_with_fields() {
        let err: JsonApiError = ServiceError::Validation(ValidationError::single(FieldError::email("email"))).into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = err.detail.unwrap();
        assert_eq!(detail[0]["field"], "email");
        assert_eq!(detail[0]["code"], "email");
    }

    #[test]
    fn storage_maps_to_500_without_detail() {
        let err: JsonApiError = ServiceError::storage("pool timed out").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail.is_none());
    }
}
