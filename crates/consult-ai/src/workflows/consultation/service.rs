use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::advisory::AdvisoryReporter;
use super::diagnosis::{ConditionScorer, DiagnosisResult};
use super::domain::{
    ConsultationFeedback, ConsultationId, ConsultationSubmission, PatientId, SymptomSet,
};
use super::intake::{IntakeGuard, ValidationError};
use super::repository::{ConsultationRecord, ConsultationRepository, RepositoryError};

/// Service-level switches for the consultation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSettings {
    /// Run the advisory reporter alongside the scorer unless a submission says otherwise.
    pub include_report: bool,
}

impl Default for ConsultationSettings {
    fn default() -> Self {
        Self {
            include_report: true,
        }
    }
}

/// Engine output for one submission, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultationOutcome {
    pub diagnosis: DiagnosisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

/// Service composing the intake guard, the scorer, the advisory reporter and the repository.
pub struct ConsultationService<R> {
    guard: IntakeGuard,
    scorer: ConditionScorer<'static>,
    reporter: AdvisoryReporter,
    repository: Arc<R>,
    settings: ConsultationSettings,
    sequence: AtomicU64,
}

impl<R> ConsultationService<R>
where
    R: ConsultationRepository + 'static,
{
    pub fn new(repository: Arc<R>, settings: ConsultationSettings) -> Self {
        Self {
            guard: IntakeGuard,
            scorer: ConditionScorer::standard(),
            reporter: AdvisoryReporter::standard(),
            repository,
            settings,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_consultation_id(&self) -> ConsultationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ConsultationId::from_sequence(id)
    }

    /// Validate and evaluate a submission without persisting anything.
    pub fn evaluate(
        &self,
        submission: ConsultationSubmission,
    ) -> Result<ConsultationOutcome, ValidationError> {
        let include_report = submission
            .include_report
            .unwrap_or(self.settings.include_report);
        let request = self.guard.request_from_submission(submission)?;

        let diagnosis = self.scorer.diagnose(&request);
        let report = include_report.then(|| {
            let advisory =
                self.reporter
                    .evaluate(&request.symptoms, &request.duration, &request.severity);
            debug!(rule = advisory.rule.unwrap_or("fallback"), "advisory selected");
            advisory.message.to_string()
        });

        Ok(ConsultationOutcome { diagnosis, report })
    }

    /// Stateless advisory for callers that only want the free-text report.
    pub fn advisory(&self, symptoms: &[String], duration: &str, severity: &str) -> String {
        let symptoms = SymptomSet::new(symptoms.iter().cloned());
        self.reporter.generate_report(&symptoms, duration, severity)
    }

    /// Evaluate a new consultation and persist it for the requesting patient.
    pub fn submit(
        &self,
        owner: &PatientId,
        submission: ConsultationSubmission,
    ) -> Result<ConsultationRecord, ConsultationServiceError> {
        let symptoms = submission.symptoms.clone();
        let duration = submission.duration.trim().to_string();
        let severity = submission.severity.trim().to_string();
        let notes = submission.notes.clone();

        let outcome = self.evaluate(submission).inspect_err(|err| {
            warn!(error = %err, "consultation rejected at intake");
        })?;

        let record = ConsultationRecord {
            id: self.next_consultation_id(),
            owner: owner.clone(),
            symptoms,
            duration,
            severity,
            notes,
            diagnosis: outcome.diagnosis,
            report: outcome.report,
            feedback: None,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            consultation_id = %stored.id,
            diagnosis = %stored.diagnosis.primary_diagnosis,
            matched = stored.diagnosis.is_match(),
            differentials = stored.diagnosis.differential_diagnoses.len(),
            "consultation recorded"
        );
        Ok(stored)
    }

    /// All consultations belonging to `owner`, newest first.
    pub fn history(
        &self,
        owner: &PatientId,
    ) -> Result<Vec<ConsultationRecord>, ConsultationServiceError> {
        let mut records = self.repository.list_for_owner(owner)?;
        records.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.sequence().cmp(&left.id.sequence()))
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(records)
    }

    /// Fetch a consultation, enforcing that it belongs to `owner`.
    pub fn get(
        &self,
        owner: &PatientId,
        id: &ConsultationId,
    ) -> Result<ConsultationRecord, ConsultationServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        if !record.is_owned_by(owner) {
            return Err(ConsultationServiceError::Forbidden { id: id.clone() });
        }

        Ok(record)
    }

    /// Attach patient feedback to an owned consultation, replacing any earlier feedback.
    ///
    /// Existence and ownership are checked before the rating.
    pub fn add_feedback(
        &self,
        owner: &PatientId,
        id: &ConsultationId,
        feedback: ConsultationFeedback,
    ) -> Result<ConsultationRecord, ConsultationServiceError> {
        let mut record = self.get(owner, id)?;
        self.guard.validate_feedback(&feedback)?;

        record.feedback = Some(feedback);
        self.repository.update(record.clone())?;

        info!(consultation_id = %record.id, "consultation feedback added");
        Ok(record)
    }
}

/// Error raised by the consultation service.
#[derive(Debug, thiserror::Error)]
pub enum ConsultationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("consultation {id} belongs to another patient")]
    Forbidden { id: ConsultationId },
}
