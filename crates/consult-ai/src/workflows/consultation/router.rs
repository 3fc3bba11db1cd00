use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::domain::{ConsultationFeedback, ConsultationId, ConsultationSubmission, PatientId};
use super::repository::{ConsultationRecord, ConsultationRepository};
use super::service::ConsultationService;
use crate::error::AppError;

/// Header carrying the patient identity asserted by the upstream auth layer.
pub const PATIENT_HEADER: &str = "x-patient-id";

/// Stateless advisory request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub severity: String,
}

/// Router builder exposing HTTP endpoints for consultations and advisories.
pub fn consultation_router<R>(service: Arc<ConsultationService<R>>) -> Router
where
    R: ConsultationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/consultations",
            post(submit_handler::<R>).get(history_handler::<R>),
        )
        .route("/api/v1/consultations/:consultation_id", get(detail_handler::<R>))
        .route(
            "/api/v1/consultations/:consultation_id/feedback",
            post(feedback_handler::<R>),
        )
        .route("/api/v1/advisory", post(advisory_handler::<R>))
        .with_state(service)
}

fn patient_from_headers(headers: &HeaderMap) -> Result<PatientId, AppError> {
    headers
        .get(PATIENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| PatientId(value.to_string()))
        .ok_or(AppError::MissingIdentity)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    headers: HeaderMap,
    Json(submission): Json<ConsultationSubmission>,
) -> Result<(StatusCode, Json<ConsultationRecord>), AppError>
where
    R: ConsultationRepository + 'static,
{
    let owner = patient_from_headers(&headers)?;
    let record = service.submit(&owner, submission)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ConsultationRecord>>, AppError>
where
    R: ConsultationRepository + 'static,
{
    let owner = patient_from_headers(&headers)?;
    Ok(Json(service.history(&owner)?))
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    headers: HeaderMap,
    Path(consultation_id): Path<String>,
) -> Result<Json<ConsultationRecord>, AppError>
where
    R: ConsultationRepository + 'static,
{
    let owner = patient_from_headers(&headers)?;
    Ok(Json(service.get(&owner, &ConsultationId(consultation_id))?))
}

pub(crate) async fn feedback_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    headers: HeaderMap,
    Path(consultation_id): Path<String>,
    Json(feedback): Json<ConsultationFeedback>,
) -> Result<Json<Value>, AppError>
where
    R: ConsultationRepository + 'static,
{
    let owner = patient_from_headers(&headers)?;
    let record = service.add_feedback(&owner, &ConsultationId(consultation_id), feedback)?;
    Ok(Json(json!({
        "message": "Feedback added",
        "consultation": record,
    })))
}

pub(crate) async fn advisory_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    Json(request): Json<AdvisoryRequest>,
) -> Json<Value>
where
    R: ConsultationRepository + 'static,
{
    let report = service.advisory(&request.symptoms, &request.duration, &request.severity);
    Json(json!({ "report": report }))
}
