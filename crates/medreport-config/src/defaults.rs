use crate::types::{AppConfig, KeywordConfig};

/// Document kinds the extractors know how to decode.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = SUPPORTED_EXTENSIONS;

pub const DEFAULT_SEVERE_KEYWORDS: &[&str] = &["severe", "critical", "acute", "serious"];
pub const DEFAULT_MODERATE_KEYWORDS: &[&str] = &["moderate", "mild", "stable"];
pub const DEFAULT_SYMPTOM_KEYWORDS: &[&str] = &["fever", "cough", "pain", "fatigue", "headache"];
pub const DEFAULT_CONDITION_KEYWORDS: &[&str] = &["diabetes", "hypertension", "asthma", "arthritis"];

impl AppConfig {
    /// Normalize the configuration in place.
    ///
    /// Extensions lose any leading dot, and extensions and keywords are
    /// trimmed, lower-cased, and de-duplicated in first-seen order.
    pub fn apply_defaults(&mut self) {
        let extensions = self
            .upload
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string());
        self.upload.allowed_extensions = normalize_list(extensions);

        self.keywords.normalize();
    }

    /// Returns a new config with all defaults applied.
    pub fn effective(&self) -> AppConfig {
        let mut config = self.clone();
        config.apply_defaults();
        config
    }
}

impl KeywordConfig {
    fn normalize(&mut self) {
        for list in [
            &mut self.severe,
            &mut self.moderate,
            &mut self.symptoms,
            &mut self.conditions,
        ] {
            let items = std::mem::take(list);
            *list = normalize_list(items.into_iter());
        }
    }
}

/// Trim, lower-case, drop empties, and de-duplicate preserving order.
fn normalize_list<I>(items: I) -> Vec<String>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim().to_lowercase();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_list() {
        let items = vec![" PDF", "pdf", "", "Txt "];
        assert_eq!(normalize_list(items.into_iter()), vec!["pdf", "txt"]);
    }

    #[test]
    fn test_extension_dots_stripped() {
        let mut config = AppConfig::default();
        config.upload.allowed_extensions = vec![".PDF".to_string(), "txt".to_string()];
        config.apply_defaults();
        assert_eq!(config.upload.allowed_extensions, vec!["pdf", "txt"]);
    }

    #[test]
    fn test_keywords_normalized() {
        let mut config = AppConfig::default();
        config.keywords.symptoms = vec!["Fever".to_string(), "fever ".to_string()];
        let effective = config.effective();
        assert_eq!(effective.keywords.symptoms, vec!["fever"]);
        // The original is left untouched.
        assert_eq!(config.keywords.symptoms.len(), 2);
    }

    #[test]
    fn test_builtin_keyword_lists_are_disjoint_across_severity() {
        for word in DEFAULT_SEVERE_KEYWORDS {
            assert!(!DEFAULT_MODERATE_KEYWORDS.contains(word));
        }
    }
}
