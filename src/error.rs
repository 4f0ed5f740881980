use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Alert not found")]
    AlertNotFound,

    #[error("Service not found")]
    ServiceNotFound,

    #[error("Notification not found")]
    NotificationNotFound,

    #[error("Delivery error: {0}")] Delivery(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

/// A single failed check, tied to the request field that failed it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn to_error_response(&self) -> ErrorResponse {
        let (code, message, field, details) = match self {
            AppError::Database(e) => ("DATABASE_ERROR", e.to_string(), None, None),
            AppError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone(), None, None),
            AppError::Validation(errors) =>
                (
                    "VALIDATION_ERROR",
                    "Validation failed".to_string(),
                    errors.first().map(|e| e.field.clone()),
                    Some(errors.clone()),
                ),
            AppError::AlertNotFound => ("ALERT_NOT_FOUND", "Alert not found".to_string(), None, None),
            AppError::ServiceNotFound =>
                ("SERVICE_NOT_FOUND", "Service not found".to_string(), None, None),
            AppError::NotificationNotFound =>
                (
                    "NOTIFICATION_NOT_FOUND",
                    "Notification not found".to_string(),
                    None,
                    None,
                ),
            AppError::Delivery(msg) => ("DELIVERY_ERROR", msg.clone(), None, None),
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone(), None, None),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone(), None, None),
        };

        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                details,
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            | AppError::AlertNotFound
            | AppError::ServiceNotFound
            | AppError::NotificationNotFound => {
                axum::http::StatusCode::NOT_FOUND
            }
            AppError::InvalidInput(_) | AppError::Validation(_) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            AppError::Delivery(_) => axum::http::StatusCode::BAD_GATEWAY,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = self.to_error_response();
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
