use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::consultation::domain::{
    ConsultationId, ConsultationRequest, ConsultationSubmission, PatientId,
};
use crate::workflows::consultation::intake::IntakeGuard;
use crate::workflows::consultation::repository::{
    ConsultationRecord, ConsultationRepository, RepositoryError,
};
use crate::workflows::consultation::{
    consultation_router, ConsultationService, ConsultationSettings,
};

pub(super) fn patient() -> PatientId {
    PatientId("patient-ada".to_string())
}

pub(super) fn other_patient() -> PatientId {
    PatientId("patient-grace".to_string())
}

pub(super) fn submission() -> ConsultationSubmission {
    ConsultationSubmission {
        symptoms: vec![
            "fever".to_string(),
            "cough".to_string(),
            "sore throat".to_string(),
        ],
        duration: "3-7 days".to_string(),
        severity: "moderate".to_string(),
        notes: "Started after travel".to_string(),
        age: Some(65),
        comorbidities: Vec::new(),
        include_report: None,
    }
}

pub(super) fn submission_with(symptoms: &[&str]) -> ConsultationSubmission {
    ConsultationSubmission {
        symptoms: symptoms.iter().map(|symptom| symptom.to_string()).collect(),
        age: None,
        ..submission()
    }
}

pub(super) fn request_with(symptoms: &[&str]) -> ConsultationRequest {
    IntakeGuard
        .request_from_submission(submission_with(symptoms))
        .expect("valid submission")
}

pub(super) fn build_service() -> (ConsultationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ConsultationService::new(repository.clone(), ConsultationSettings::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ConsultationId, ConsultationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ConsultationRepository for MemoryRepository {
    fn insert(&self, record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ConsultationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_owner(&self, owner: &PatientId) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.is_owned_by(owner))
            .cloned()
            .collect())
    }
}

pub(super) struct ConflictRepository;

impl ConsultationRepository for ConflictRepository {
    fn insert(&self, _record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ConsultationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_for_owner(&self, _owner: &PatientId) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ConsultationRepository for UnavailableRepository {
    fn insert(&self, _record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ConsultationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_owner(&self, _owner: &PatientId) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: ConsultationService<MemoryRepository>,
) -> axum::Router {
    consultation_router(Arc::new(service))
}
