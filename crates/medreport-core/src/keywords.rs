//! Static keyword table used by the classifier.

use std::collections::HashSet;
use std::sync::OnceLock;

use medreport_config::KeywordConfig;

use crate::severity::Severity;

static BUILTIN: OnceLock<KeywordTable> = OnceLock::new();

/// Category -> keyword sets. Immutable once built; share it behind an `Arc`
/// or use [`KeywordTable::builtin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    severe: HashSet<String>,
    moderate: HashSet<String>,
    symptoms: HashSet<String>,
    conditions: HashSet<String>,
}

impl KeywordTable {
    /// Build a table from configured keyword lists. Keywords are lower-cased.
    pub fn from_config(config: &KeywordConfig) -> Self {
        fn set(words: &[String]) -> HashSet<String> {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }

        Self {
            severe: set(&config.severe),
            moderate: set(&config.moderate),
            symptoms: set(&config.symptoms),
            conditions: set(&config.conditions),
        }
    }

    /// The built-in table, initialized on first use.
    pub fn builtin() -> &'static KeywordTable {
        BUILTIN.get_or_init(|| KeywordTable::from_config(&KeywordConfig::default()))
    }

    /// Severity level a token triggers, if any. Severe keywords win over
    /// moderate ones when a word is somehow listed in both.
    pub fn severity_of(&self, token: &str) -> Option<Severity> {
        if self.severe.contains(token) {
            Some(Severity::High)
        } else if self.moderate.contains(token) {
            Some(Severity::Moderate)
        } else {
            None
        }
    }

    pub fn is_symptom(&self, token: &str) -> bool {
        self.symptoms.contains(token)
    }

    pub fn is_condition(&self, token: &str) -> bool {
        self.conditions.contains(token)
    }

    /// Total number of keywords across all categories.
    pub fn len(&self) -> usize {
        self.severe.len() + self.moderate.len() + self.symptoms.len() + self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        KeywordTable::builtin().clone()
    }
}
