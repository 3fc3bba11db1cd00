use super::common::*;
use crate::workflows::consultation::diagnosis::{
    ConditionCatalog, ConditionScorer, ConditionTemplate, DiagnosisResult, NO_MATCH_DIAGNOSIS,
};
use crate::workflows::consultation::domain::{PersonalizationContext, SymptomSet};
use crate::workflows::consultation::intake::IntakeGuard;

#[test]
fn scorer_returns_nothing_for_unknown_symptoms() {
    let scorer = ConditionScorer::standard();
    let symptoms = SymptomSet::new(["rash", "itching"]);

    assert!(scorer.score(&symptoms).is_empty());

    let result = scorer.diagnose(&request_with(&["rash", "itching"]));
    assert_eq!(result, DiagnosisResult::no_match());
    assert_eq!(result.primary_diagnosis, NO_MATCH_DIAGNOSIS);
    assert_eq!(result.treatment, "Supportive care, follow up if symptoms worsen");
    assert_eq!(result.lab_exams, "Basic CBC and Urinalysis");
    assert!(!result.is_match());
}

#[test]
fn no_match_ignores_personalization() {
    let scorer = ConditionScorer::standard();
    let mut request = request_with(&["rash"]);
    request.context = PersonalizationContext {
        age: Some(80),
        comorbidities: vec!["hypertension".to_string()],
    };

    assert_eq!(scorer.diagnose(&request), DiagnosisResult::no_match());
}

#[test]
fn scorer_counts_distinct_keywords_case_insensitively() {
    let scorer = ConditionScorer::standard();
    let symptoms = SymptomSet::new(["Fever", "FEVER", " fever ", "Cough"]);

    let ranked = scorer.score(&symptoms);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name(), "Upper respiratory tract infection (URTI)");
    assert_eq!(ranked[0].score, 2);
}

#[test]
fn scorer_does_not_match_substrings() {
    let scorer = ConditionScorer::standard();
    let symptoms = SymptomSet::new(["severe headache", "throat"]);

    assert!(scorer.score(&symptoms).is_empty());
}

#[test]
fn scorer_orders_by_score_then_catalog_order() {
    let scorer = ConditionScorer::standard();
    let symptoms = SymptomSet::new([
        "nausea",
        "vomiting",
        "diarrhea",
        "headache",
        "toothache",
        "fever",
    ]);

    let ranked = scorer.score(&symptoms);
    let ordering: Vec<(&str, usize)> = ranked
        .iter()
        .map(|candidate| (candidate.name(), candidate.score))
        .collect();

    assert_eq!(
        ordering,
        vec![
            ("Gastroenteritis", 2),
            ("Tension headache or migraine", 2),
            ("Upper respiratory tract infection (URTI)", 1),
            ("Dental infection", 1),
        ]
    );
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn elderly_patient_with_respiratory_symptoms() {
    let scorer = ConditionScorer::standard();
    let request = IntakeGuard
        .request_from_submission(submission())
        .expect("valid submission");

    let result = scorer.diagnose(&request);

    assert_eq!(
        result.primary_diagnosis,
        "Upper respiratory tract infection (URTI)"
    );
    assert!(result.treatment.ends_with("; monitor closely due to age"));
    assert!(result.lab_exams.ends_with(", EKG if cardiac symptoms"));
    assert!(result.differential_diagnoses.is_empty());
}

#[test]
fn tied_conditions_resolve_by_catalog_order() {
    let scorer = ConditionScorer::standard();

    let result = scorer.diagnose(&request_with(&["toothache", "diarrhea"]));

    assert_eq!(result.primary_diagnosis, "Dental infection");
    assert_eq!(result.treatment, "Amoxicillin, Diclofenac, dental referral");
    assert_eq!(result.differential_diagnoses.len(), 1);
    assert_eq!(result.differential_diagnoses[0].condition, "Gastroenteritis");
    assert_eq!(
        result.differential_diagnoses[0].confidence.to_string(),
        "100.0%"
    );
}

#[test]
fn differential_confidence_is_relative_to_primary() {
    let scorer = ConditionScorer::standard();

    let result = scorer.diagnose(&request_with(&[
        "fever",
        "cough",
        "sore throat",
        "nausea",
        "headache",
        "toothache",
    ]));

    assert_eq!(
        result.primary_diagnosis,
        "Upper respiratory tract infection (URTI)"
    );
    let differentials: Vec<(String, String)> = result
        .differential_diagnoses
        .iter()
        .map(|entry| (entry.condition.clone(), entry.confidence.to_string()))
        .collect();
    assert_eq!(
        differentials,
        vec![
            ("Tension headache or migraine".to_string(), "66.7%".to_string()),
            ("Dental infection".to_string(), "33.3%".to_string()),
        ]
    );
}

#[test]
fn differentials_are_capped_and_exclude_primary() {
    let catalog = ConditionCatalog::from_templates(&[
        template("Alpha", &["a", "b"]),
        template("Bravo", &["a"]),
        template("Charlie", &["b"]),
        template("Delta", &["a", "c"]),
        template("Echo", &["b", "c"]),
    ]);
    let scorer = ConditionScorer::new(&catalog);

    let result = scorer.diagnose(&request_with(&["a", "b", "c"]));

    assert_eq!(result.primary_diagnosis, "Alpha");
    let names: Vec<&str> = result
        .differential_diagnoses
        .iter()
        .map(|entry| entry.condition.as_str())
        .collect();
    assert_eq!(names, vec!["Delta", "Echo", "Bravo"]);
    for entry in &result.differential_diagnoses {
        let percent = entry.confidence.percent();
        assert!(percent > 0.0 && percent <= 100.0);
    }
}

#[test]
fn comorbidities_append_interaction_warning() {
    let scorer = ConditionScorer::standard();
    let mut request = request_with(&["diarrhea"]);
    request.context.comorbidities = vec!["chronic kidney disease".to_string()];

    let result = scorer.diagnose(&request);

    assert_eq!(
        result.treatment,
        "Oral rehydration salts, zinc, Metronidazole; consider interactions with existing medications"
    );
    assert_eq!(result.lab_exams, "Stool analysis, culture");
}

#[test]
fn personalization_never_touches_the_catalog() {
    let scorer = ConditionScorer::standard();
    let mut request = request_with(&["headache"]);
    request.context.age = Some(90);

    let _ = scorer.diagnose(&request);

    let rule = ConditionCatalog::standard()
        .get("Tension headache or migraine")
        .expect("rule present");
    assert_eq!(rule.treatment(), "Paracetamol or Ibuprofen, hydration, rest");
    assert_eq!(
        rule.lab_exams(),
        "Blood pressure check, optional CT if persistent"
    );
}

#[test]
fn diagnose_is_idempotent() {
    let scorer = ConditionScorer::standard();
    let request = request_with(&["gum pain", "swelling", "fever", "vomiting"]);

    let first = serde_json::to_string(&scorer.diagnose(&request)).expect("serializes");
    let second = serde_json::to_string(&scorer.diagnose(&request)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn diagnosis_serializes_confidence_as_percentage_label() {
    let scorer = ConditionScorer::standard();
    let result = scorer.diagnose(&request_with(&["toothache", "diarrhea"]));

    let payload = serde_json::to_value(&result).expect("serializes");
    assert_eq!(
        payload["differential_diagnoses"][0]["confidence"],
        serde_json::json!("100.0%")
    );

    let restored: DiagnosisResult = serde_json::from_value(payload).expect("deserializes");
    assert_eq!(restored, result);
}

fn template(name: &'static str, keywords: &'static [&'static str]) -> ConditionTemplate {
    ConditionTemplate {
        name,
        keywords,
        treatment: "Observe",
        lab_exams: "None",
    }
}
