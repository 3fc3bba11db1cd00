mod catalog;
mod personalize;
mod scoring;

pub use catalog::{ConditionCatalog, ConditionRule, ConditionTemplate};
pub use scoring::ScoredCondition;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::domain::{ConsultationRequest, SymptomSet};
use personalize::personalize;
use scoring::rank_conditions;

pub const NO_MATCH_DIAGNOSIS: &str = "No matching condition found";
pub const NO_MATCH_TREATMENT: &str = "Supportive care, follow up if symptoms worsen";
pub const NO_MATCH_LAB_EXAMS: &str = "Basic CBC and Urinalysis";

const MAX_DIFFERENTIALS: usize = 3;

/// Stateless scorer over a read-only condition catalog.
#[derive(Debug, Clone, Copy)]
pub struct ConditionScorer<'c> {
    catalog: &'c ConditionCatalog,
}

impl ConditionScorer<'static> {
    pub fn standard() -> Self {
        Self::new(ConditionCatalog::standard())
    }
}

impl<'c> ConditionScorer<'c> {
    pub fn new(catalog: &'c ConditionCatalog) -> Self {
        Self { catalog }
    }

    /// Conditions with at least one matching keyword, highest score first.
    pub fn score(&self, symptoms: &SymptomSet) -> Vec<ScoredCondition<'c>> {
        rank_conditions(self.catalog, symptoms)
    }

    /// Pick the primary diagnosis, personalize its recommendations and list the runners-up.
    pub fn diagnose(&self, request: &ConsultationRequest) -> DiagnosisResult {
        let ranked = self.score(&request.symptoms);

        let Some((primary, runners_up)) = ranked.split_first() else {
            return DiagnosisResult::no_match();
        };

        let mut treatment = primary.rule.treatment().to_string();
        let mut lab_exams = primary.rule.lab_exams().to_string();
        personalize(&mut treatment, &mut lab_exams, &request.context);

        let differential_diagnoses = runners_up
            .iter()
            .take(MAX_DIFFERENTIALS)
            .map(|candidate| DifferentialDiagnosis {
                condition: candidate.name().to_string(),
                confidence: Confidence::relative(candidate.score, primary.score),
            })
            .collect();

        DiagnosisResult {
            primary_diagnosis: primary.name().to_string(),
            treatment,
            lab_exams,
            differential_diagnoses,
        }
    }
}

/// Engine output attached verbatim to a consultation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub primary_diagnosis: String,
    pub treatment: String,
    pub lab_exams: String,
    pub differential_diagnoses: Vec<DifferentialDiagnosis>,
}

impl DiagnosisResult {
    pub fn no_match() -> Self {
        Self {
            primary_diagnosis: NO_MATCH_DIAGNOSIS.to_string(),
            treatment: NO_MATCH_TREATMENT.to_string(),
            lab_exams: NO_MATCH_LAB_EXAMS.to_string(),
            differential_diagnoses: Vec::new(),
        }
    }

    /// False when no catalog condition matched the reported symptoms.
    pub fn is_match(&self) -> bool {
        self.primary_diagnosis != NO_MATCH_DIAGNOSIS
    }
}

/// Secondary candidate ranked below the primary diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialDiagnosis {
    pub condition: String,
    pub confidence: Confidence,
}

/// Score relative to the primary diagnosis, as a percentage rounded to one decimal.
///
/// This is a ratio heuristic, not a calibrated probability.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    fn relative(score: usize, primary_score: usize) -> Self {
        let ratio = score as f64 / primary_score as f64 * 100.0;
        Self((ratio * 10.0).round() / 10.0)
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map(Self)
            .map_err(|err| serde::de::Error::custom(format!("invalid confidence '{raw}': {err}")))
    }
}
