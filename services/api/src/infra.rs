use consult_ai::workflows::consultation::{
    ConsultationId, ConsultationRecord, ConsultationRepository, PatientId, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type RecordMap = HashMap<ConsultationId, ConsultationRecord>;

/// Process-local consultation store used until a durable adapter is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryConsultationRepository {
    records: Arc<Mutex<RecordMap>>,
}

impl InMemoryConsultationRepository {
    fn records(&self) -> Result<MutexGuard<'_, RecordMap>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("consultation store lock poisoned".into()))
    }
}

impl ConsultationRepository for InMemoryConsultationRepository {
    fn insert(&self, record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError> {
        match self.records()?.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict),
            Entry::Vacant(slot) => Ok(slot.insert(record).clone()),
        }
    }

    fn update(&self, record: ConsultationRecord) -> Result<(), RepositoryError> {
        let mut records = self.records()?;
        let slot = records.get_mut(&record.id).ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn list_for_owner(&self, owner: &PatientId) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        Ok(self
            .records()?
            .values()
            .filter(|record| record.is_owned_by(owner))
            .cloned()
            .collect())
    }
}
