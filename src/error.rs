use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Mandatory field missing from the submitted payload. Message is shown
    /// to the end user verbatim, so it carries the site's Hebrew copy.
    Validation(String),
    /// The backing store rejected or failed the insert. `message` is the
    /// per-form Hebrew site copy; `details` carries the store's message.
    Persistence { message: String, details: String },
    #[allow(dead_code)]
    Internal(String),
}

impl ApiError {
    pub fn required_name_and_phone() -> Self {
        ApiError::Validation("שם מלא ומספר טלפון הם שדות חובה".into())
    }

    pub fn privacy_consent_required() -> Self {
        ApiError::Validation("יש לאשר את הסכמת הפרטיות".into())
    }

    fn to_error_response(message: &str, details: Option<String>) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: message.to_string(),
            details,
        })
    }
}

impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        let message = match &err {
            crate::store::StoreError::PatientInsert(_) => "שגיאה בשליחת ההרשמה. אנא נסה שוב.",
            crate::store::StoreError::HealerInsert(_) => "שגיאה בשליחת הבקשה. אנא נסה שוב.",
        };
        ApiError::Persistence {
            message: message.to_string(),
            details: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::to_error_response(&msg, None)).into_response()
            }
            ApiError::Persistence { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::to_error_response(&message, Some(details)),
            )
                .into_response(),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::to_error_response(&msg, None),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = ApiError::required_name_and_phone().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn persistence_maps_to_internal_server_error() {
        let err: ApiError = crate::store::StoreError::PatientInsert("insert failed".into()).into();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn persistence_copy_is_per_form() {
        let patient: ApiError =
            crate::store::StoreError::PatientInsert("connection reset".into()).into();
        let ApiError::Persistence { message, details } = patient else {
            panic!("expected persistence error");
        };
        assert_eq!(message, "שגיאה בשליחת ההרשמה. אנא נסה שוב.");
        assert_eq!(details, "Failed to submit registration: connection reset");

        let healer: ApiError =
            crate::store::StoreError::HealerInsert("connection reset".into()).into();
        let ApiError::Persistence { message, .. } = healer else {
            panic!("expected persistence error");
        };
        assert_eq!(message, "שגיאה בשליחת הבקשה. אנא נסה שוב.");
    }

    #[test]
    fn details_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse {
            error: "boom".into(),
            details: None,
        })
        .unwrap();
        assert!(body.get("details").is_none());
    }
}
