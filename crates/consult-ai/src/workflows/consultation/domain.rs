use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize::normalize_token;

/// Identifier wrapper for persisted consultations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsultationId(pub String);

impl ConsultationId {
    const PREFIX: &'static str = "consult-";

    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("{}{sequence:06}", Self::PREFIX))
    }

    /// Numeric part of a service-issued id, `None` for ids minted elsewhere.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl fmt::Display for ConsultationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identity of the requester, issued by the upstream authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Raw consultation payload as received from a client, before intake validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSubmission {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub comorbidities: Vec<String>,
    /// Overrides the service default for generating the advisory report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_report: Option<bool>,
}

/// Reported symptoms, keeping the caller's ordering for display and a normalized set for
/// matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomSet {
    reported: Vec<String>,
    normalized: BTreeSet<String>,
}

impl SymptomSet {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reported: Vec<String> = symptoms.into_iter().map(Into::into).collect();
        let normalized = reported
            .iter()
            .map(|symptom| normalize_token(symptom))
            .filter(|symptom| !symptom.is_empty())
            .collect();

        Self {
            reported,
            normalized,
        }
    }

    /// Membership test against an already normalized token.
    pub fn contains(&self, normalized: &str) -> bool {
        self.normalized.contains(normalized)
    }

    pub fn reported(&self) -> &[String] {
        &self.reported
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Patient context used only to append qualifier clauses to recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalizationContext {
    pub age: Option<u32>,
    pub comorbidities: Vec<String>,
}

/// Validated consultation input handed to the diagnosis engine and advisory reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationRequest {
    pub symptoms: SymptomSet,
    pub duration: String,
    pub severity: String,
    pub notes: String,
    pub context: PersonalizationContext,
}

/// Patient rating of a completed consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationFeedback {
    pub rating: u8,
    #[serde(default)]
    pub comments: String,
}
