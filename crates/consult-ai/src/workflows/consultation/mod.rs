//! Consultation intake, symptom scoring, advisory reporting and persistence.
//!
//! Two independent engines run behind one request: the [`ConditionScorer`] ranks catalog
//! conditions by keyword overlap and derives a personalized diagnosis, while the
//! [`AdvisoryReporter`] picks a single free-text advisory from ordered precedence rules.
//! Both are pure functions over read-only tables.

pub mod advisory;
pub mod diagnosis;
pub mod domain;
pub(crate) mod intake;
mod normalize;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use advisory::{Advisory, AdvisoryReporter, AdvisoryRule, FALLBACK_ADVISORY};
pub use diagnosis::{
    ConditionCatalog, ConditionRule, ConditionScorer, ConditionTemplate, Confidence,
    DiagnosisResult, DifferentialDiagnosis, ScoredCondition, NO_MATCH_DIAGNOSIS,
};
pub use domain::{
    ConsultationFeedback, ConsultationId, ConsultationRequest, ConsultationSubmission, PatientId,
    PersonalizationContext, SymptomSet,
};
pub use intake::{IntakeGuard, ValidationError};
pub use repository::{ConsultationRecord, ConsultationRepository, RepositoryError};
pub use router::{consultation_router, AdvisoryRequest, PATIENT_HEADER};
pub use service::{
    ConsultationOutcome, ConsultationService, ConsultationServiceError, ConsultationSettings,
};
