use std::sync::OnceLock;

use super::super::normalize::normalize_token;

/// Literal catalog entry before keyword normalization.
#[derive(Debug, Clone, Copy)]
pub struct ConditionTemplate {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub treatment: &'static str,
    pub lab_exams: &'static str,
}

/// Catalog entry with keywords normalized once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRule {
    name: String,
    keywords: Vec<String>,
    treatment: String,
    lab_exams: String,
}

impl ConditionRule {
    fn from_template(template: &ConditionTemplate) -> Self {
        let mut keywords: Vec<String> = Vec::with_capacity(template.keywords.len());
        for keyword in template.keywords {
            let keyword = normalize_token(keyword);
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }

        Self {
            name: template.name.to_string(),
            keywords,
            treatment: template.treatment.to_string(),
            lab_exams: template.lab_exams.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    pub fn lab_exams(&self) -> &str {
        &self.lab_exams
    }
}

/// Read-only table of condition rules. Order is significant: it breaks score ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionCatalog {
    rules: Vec<ConditionRule>,
}

impl ConditionCatalog {
    pub fn from_templates(templates: &[ConditionTemplate]) -> Self {
        Self {
            rules: templates.iter().map(ConditionRule::from_template).collect(),
        }
    }

    /// The process-wide catalog, built on first use and never mutated.
    pub fn standard() -> &'static ConditionCatalog {
        static STANDARD: OnceLock<ConditionCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| Self::from_templates(STANDARD_CONDITIONS))
    }

    pub fn rules(&self) -> &[ConditionRule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&ConditionRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

const STANDARD_CONDITIONS: &[ConditionTemplate] = &[
    ConditionTemplate {
        name: "Upper respiratory tract infection (URTI)",
        keywords: &["fever", "cough", "sore throat"],
        treatment: "Paracetamol, rest, fluids",
        lab_exams: "CBC, COVID-19 test",
    },
    ConditionTemplate {
        name: "Dental infection",
        keywords: &["toothache", "gum pain", "swelling"],
        treatment: "Amoxicillin, Diclofenac, dental referral",
        lab_exams: "Panoramic X-ray",
    },
    ConditionTemplate {
        name: "Gastroenteritis",
        keywords: &["diarrhea", "vomiting", "abdominal pain"],
        treatment: "Oral rehydration salts, zinc, Metronidazole",
        lab_exams: "Stool analysis, culture",
    },
    ConditionTemplate {
        name: "Tension headache or migraine",
        keywords: &["headache", "migraine", "nausea"],
        treatment: "Paracetamol or Ibuprofen, hydration, rest",
        lab_exams: "Blood pressure check, optional CT if persistent",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_keeps_insertion_order() {
        let names: Vec<&str> = ConditionCatalog::standard()
            .rules()
            .iter()
            .map(ConditionRule::name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Upper respiratory tract infection (URTI)",
                "Dental infection",
                "Gastroenteritis",
                "Tension headache or migraine",
            ]
        );
    }

    #[test]
    fn keywords_are_normalized_and_deduplicated() {
        let catalog = ConditionCatalog::from_templates(&[ConditionTemplate {
            name: "Otitis",
            keywords: &[" Ear Pain", "ear pain", "", "DISCHARGE"],
            treatment: "Analgesia",
            lab_exams: "Otoscopy",
        }]);

        let rule = catalog.get("Otitis").expect("rule present");
        assert_eq!(rule.keywords(), &["ear pain", "discharge"]);
    }

    #[test]
    fn standard_catalog_is_shared() {
        assert!(std::ptr::eq(
            ConditionCatalog::standard(),
            ConditionCatalog::standard()
        ));
    }
}
