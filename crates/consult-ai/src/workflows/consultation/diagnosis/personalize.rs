use super::super::domain::PersonalizationContext;

pub(crate) const SENIOR_AGE_THRESHOLD: u32 = 60;

const SENIOR_TREATMENT_CLAUSE: &str = "; monitor closely due to age";
const SENIOR_LAB_CLAUSE: &str = ", EKG if cardiac symptoms";
const COMORBIDITY_TREATMENT_CLAUSE: &str = "; consider interactions with existing medications";

/// Append qualifier clauses to the working copies of the recommendations.
///
/// The age clause is always applied before the comorbidity clause.
pub(crate) fn personalize(
    treatment: &mut String,
    lab_exams: &mut String,
    context: &PersonalizationContext,
) {
    if context.age.is_some_and(|age| age > SENIOR_AGE_THRESHOLD) {
        treatment.push_str(SENIOR_TREATMENT_CLAUSE);
        lab_exams.push_str(SENIOR_LAB_CLAUSE);
    }

    if !context.comorbidities.is_empty() {
        treatment.push_str(COMORBIDITY_TREATMENT_CLAUSE);
    }
}
