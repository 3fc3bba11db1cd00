use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diagnosis::DiagnosisResult;
use super::domain::{ConsultationFeedback, ConsultationId, PatientId};

/// Persisted consultation: the reported inputs, the engine output and any later feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: ConsultationId,
    pub owner: PatientId,
    pub symptoms: Vec<String>,
    pub duration: String,
    pub severity: String,
    pub notes: String,
    pub diagnosis: DiagnosisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<ConsultationFeedback>,
    pub created_at: DateTime<Utc>,
}

impl ConsultationRecord {
    pub fn is_owned_by(&self, owner: &PatientId) -> bool {
        &self.owner == owner
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ConsultationRepository: Send + Sync {
    fn insert(&self, record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError>;
    fn update(&self, record: ConsultationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError>;
    fn list_for_owner(&self, owner: &PatientId) -> Result<Vec<ConsultationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
