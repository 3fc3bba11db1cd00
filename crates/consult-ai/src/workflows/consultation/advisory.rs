use super::domain::SymptomSet;
use super::normalize::normalize_field;

pub const FALLBACK_ADVISORY: &str = "Your symptoms are non-specific. Please monitor your condition and consult a doctor if symptoms persist or worsen.";

/// Inputs every advisory predicate is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryInput<'a> {
    pub symptoms: &'a SymptomSet,
    pub duration: &'a str,
    pub severity: &'a str,
}

/// Precedence rule: the first rule whose predicate holds supplies the advisory.
#[derive(Clone, Copy)]
pub struct AdvisoryRule {
    pub key: &'static str,
    pub predicate: fn(&AdvisoryInput<'_>) -> bool,
    pub message: &'static str,
}

impl std::fmt::Debug for AdvisoryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryRule")
            .field("key", &self.key)
            .field("message", &self.message)
            .finish()
    }
}

/// Advisory selected for a request, with the key of the rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub rule: Option<&'static str>,
    pub message: &'static str,
}

/// Maps symptoms, duration and severity onto a single advisory message.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryReporter {
    rules: &'static [AdvisoryRule],
    fallback: &'static str,
}

impl Default for AdvisoryReporter {
    fn default() -> Self {
        Self::standard()
    }
}

impl AdvisoryReporter {
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES,
            fallback: FALLBACK_ADVISORY,
        }
    }

    pub fn rules(&self) -> &'static [AdvisoryRule] {
        self.rules
    }

    /// Evaluate the rules top to bottom. Always yields an advisory.
    pub fn evaluate(&self, symptoms: &SymptomSet, duration: &str, severity: &str) -> Advisory {
        let duration = normalize_field(duration);
        let severity = normalize_field(severity);
        let input = AdvisoryInput {
            symptoms,
            duration: &duration,
            severity: &severity,
        };

        self.rules
            .iter()
            .find(|rule| (rule.predicate)(&input))
            .map(|rule| Advisory {
                rule: Some(rule.key),
                message: rule.message,
            })
            .unwrap_or(Advisory {
                rule: None,
                message: self.fallback,
            })
    }

    pub fn generate_report(&self, symptoms: &SymptomSet, duration: &str, severity: &str) -> String {
        self.evaluate(symptoms, duration, severity).message.to_string()
    }
}

static STANDARD_RULES: &[AdvisoryRule] = &[
    AdvisoryRule {
        key: "high_fever",
        predicate: |input| input.symptoms.contains("fever") && input.severity == "high",
        message: "You reported a high fever. This may indicate a serious infection. Seek immediate medical attention.",
    },
    AdvisoryRule {
        key: "persistent_cough",
        predicate: |input| {
            input.symptoms.contains("cough") && input.duration == "more than 1 week"
        },
        message: "Persistent cough for over a week suggests a chronic or serious issue. A clinical evaluation is advised.",
    },
    AdvisoryRule {
        key: "moderate_headache",
        predicate: |input| input.symptoms.contains("headache") && input.severity == "moderate",
        message: "Moderate headache reported. Ensure proper hydration and rest. Monitor for worsening symptoms.",
    },
    AdvisoryRule {
        key: "mild_recent",
        predicate: |input| input.severity == "low" && input.duration == "less than 3 days",
        message: "Your symptoms appear mild and recent. Rest and monitor your condition. Seek care if it worsens.",
    },
];
