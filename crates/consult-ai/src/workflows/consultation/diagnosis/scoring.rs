use super::super::domain::SymptomSet;
use super::catalog::{ConditionCatalog, ConditionRule};

/// Catalog rule paired with the number of its keywords found in the reported symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCondition<'c> {
    pub rule: &'c ConditionRule,
    pub score: usize,
}

impl ScoredCondition<'_> {
    pub fn name(&self) -> &str {
        self.rule.name()
    }
}

/// Rank catalog conditions by keyword overlap. Zero scores are dropped and ties keep catalog
/// order (`sort_by` is stable).
pub(crate) fn rank_conditions<'c>(
    catalog: &'c ConditionCatalog,
    symptoms: &SymptomSet,
) -> Vec<ScoredCondition<'c>> {
    let mut scored: Vec<ScoredCondition<'c>> = catalog
        .rules()
        .iter()
        .map(|rule| ScoredCondition {
            rule,
            score: rule
                .keywords()
                .iter()
                .filter(|keyword| symptoms.contains(keyword.as_str()))
                .count(),
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored
}
