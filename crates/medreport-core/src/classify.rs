//! Keyword classification of report text.

use std::collections::BTreeSet;
use std::sync::Arc;

use medreport_config::KeywordConfig;
use serde::{Deserialize, Serialize};

use crate::keywords::KeywordTable;
use crate::severity::Severity;
use crate::tokenize::content_tokens;

/// Advice bundle derived from the final severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub medicines: Vec<String>,
    pub diet_plan: Vec<String>,
    pub doctor_consultation: bool,
}

impl Recommendations {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => Self {
                medicines: strings(&["Consult doctor for prescription"]),
                diet_plan: strings(&["Follow doctor's dietary recommendations"]),
                doctor_consultation: true,
            },
            Severity::Moderate => Self {
                medicines: strings(&["Over-the-counter pain relievers", "Rest"]),
                diet_plan: strings(&["Light meals", "Plenty of fluids", "Avoid spicy foods"]),
                doctor_consultation: false,
            },
            Severity::Low => Self {
                medicines: strings(&["Rest", "Hydration"]),
                diet_plan: strings(&["Regular balanced diet", "Stay hydrated"]),
                doctor_consultation: false,
            },
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Outcome of classifying one report.
///
/// Symptoms and conditions are sets; they serialize as sorted arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub severity: Severity,
    pub symptoms: BTreeSet<String>,
    pub conditions: BTreeSet<String>,
    pub recommendations: Recommendations,
}

/// Classifier bound to a keyword table.
///
/// Cloning is cheap; the table is shared read-only.
#[derive(Debug, Clone)]
pub struct ReportClassifier {
    keywords: Arc<KeywordTable>,
}

impl ReportClassifier {
    pub fn new(keywords: KeywordTable) -> Self {
        Self {
            keywords: Arc::new(keywords),
        }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        Self::new(KeywordTable::from_config(config))
    }

    pub fn classify(&self, text: &str) -> AnalysisResult {
        scan(&self.keywords, text)
    }
}

impl Default for ReportClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::default())
    }
}

/// Classify `text` against the built-in keyword table.
pub fn classify(text: &str) -> AnalysisResult {
    scan(KeywordTable::builtin(), text)
}

fn scan(keywords: &KeywordTable, text: &str) -> AnalysisResult {
    let lowered = text.to_lowercase();

    let mut severity = Severity::Low;
    let mut symptoms = BTreeSet::new();
    let mut conditions = BTreeSet::new();

    for token in content_tokens(&lowered) {
        if let Some(level) = keywords.severity_of(token) {
            severity.escalate(level);
        }
        if keywords.is_symptom(token) {
            symptoms.insert(token.to_string());
        }
        if keywords.is_condition(token) {
            conditions.insert(token.to_string());
        }
    }

    tracing::debug!(
        %severity,
        symptoms = symptoms.len(),
        conditions = conditions.len(),
        "Classified report text"
    );

    AnalysisResult {
        severity,
        symptoms,
        conditions,
        recommendations: Recommendations::for_severity(severity),
    }
}
