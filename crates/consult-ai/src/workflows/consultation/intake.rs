use super::domain::{
    ConsultationFeedback, ConsultationRequest, ConsultationSubmission, PersonalizationContext,
    SymptomSet,
};
use super::normalize::normalize_field;

pub const MIN_FEEDBACK_RATING: u8 = 1;
pub const MAX_FEEDBACK_RATING: u8 = 5;

/// Input-contract violations raised before any scoring takes place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("symptoms, duration, and severity are required: no symptoms reported")]
    MissingSymptoms,
    #[error("symptom at position {index} is blank")]
    BlankSymptom { index: usize },
    #[error("symptoms, duration, and severity are required: duration missing")]
    MissingDuration,
    #[error("symptoms, duration, and severity are required: severity missing")]
    MissingSeverity,
    #[error("age must be a non-negative integer (found {0})")]
    InvalidAge(i64),
    #[error("feedback rating must be between 1 and 5 (found {0})")]
    RatingOutOfRange(u8),
}

/// Guard responsible for producing validated `ConsultationRequest` instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert an inbound submission into a request the engine can score.
    pub fn request_from_submission(
        &self,
        submission: ConsultationSubmission,
    ) -> Result<ConsultationRequest, ValidationError> {
        if submission.symptoms.is_empty() {
            return Err(ValidationError::MissingSymptoms);
        }

        if let Some(index) = submission
            .symptoms
            .iter()
            .position(|symptom| symptom.trim().is_empty())
        {
            return Err(ValidationError::BlankSymptom { index });
        }

        let duration = normalize_field(&submission.duration);
        if duration.is_empty() {
            return Err(ValidationError::MissingDuration);
        }

        let severity = normalize_field(&submission.severity);
        if severity.is_empty() {
            return Err(ValidationError::MissingSeverity);
        }

        let age = submission
            .age
            .map(|age| u32::try_from(age).map_err(|_| ValidationError::InvalidAge(age)))
            .transpose()?;

        let comorbidities = submission
            .comorbidities
            .into_iter()
            .map(|condition| condition.trim().to_string())
            .filter(|condition| !condition.is_empty())
            .collect();

        Ok(ConsultationRequest {
            symptoms: SymptomSet::new(submission.symptoms),
            duration,
            severity,
            notes: submission.notes,
            context: PersonalizationContext { age, comorbidities },
        })
    }

    pub fn validate_feedback(
        &self,
        feedback: &ConsultationFeedback,
    ) -> Result<(), ValidationError> {
        if (MIN_FEEDBACK_RATING..=MAX_FEEDBACK_RATING).contains(&feedback.rating) {
            Ok(())
        } else {
            Err(ValidationError::RatingOutOfRange(feedback.rating))
        }
    }
}
