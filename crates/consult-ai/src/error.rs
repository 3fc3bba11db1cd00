use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::consultation::{
    ConsultationServiceError, RepositoryError, ValidationError, PATIENT_HEADER,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Consultation(ConsultationServiceError),
    MissingIdentity,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Consultation(err) => write!(f, "consultation error: {}", err),
            AppError::MissingIdentity => write!(f, "missing {} header", PATIENT_HEADER),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Consultation(err) => Some(err),
            AppError::MissingIdentity => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingIdentity => StatusCode::UNAUTHORIZED,
            AppError::Consultation(ConsultationServiceError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Consultation(ConsultationServiceError::Forbidden { .. }) => {
                StatusCode::FORBIDDEN
            }
            AppError::Consultation(ConsultationServiceError::Repository(err)) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict => StatusCode::CONFLICT,
                RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Consultation(ConsultationServiceError::Repository(
                RepositoryError::NotFound,
            )) => "consultation not found".to_string(),
            AppError::Consultation(ConsultationServiceError::Repository(
                RepositoryError::Conflict,
            )) => "consultation already exists".to_string(),
            AppError::Consultation(err) => err.to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ConsultationServiceError> for AppError {
    fn from(value: ConsultationServiceError) -> Self {
        Self::Consultation(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Consultation(ConsultationServiceError::Validation(value))
    }
}
