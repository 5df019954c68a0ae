//! Word tokenization and English stop-word filtering.

use std::collections::HashSet;
use std::sync::OnceLock;

/// NLTK English stop words. Contractions such as "don't" are left out: the
/// tokenizer splits on apostrophes, and the fragments (`don`, `t`, `ll`, ...)
/// are listed individually.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Whether `token` is an English stop word. Expects a lower-cased token.
pub fn is_stop_word(token: &str) -> bool {
    stop_words().contains(token)
}

/// Split text into word tokens.
///
/// Every non-alphanumeric character is a boundary, so punctuation never ends
/// up inside a token. Case is preserved; callers lower-case first.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
}

/// Tokenize and drop stop words.
pub fn content_tokens(text: &str) -> impl Iterator<Item = &str> {
    tokenize(text).filter(|token| !is_stop_word(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens: Vec<_> = tokenize("stable condition, mild headache.").collect();
        assert_eq!(tokens, vec!["stable", "condition", "mild", "headache"]);
    }

    #[test]
    fn test_tokenize_handles_apostrophes_and_hyphens() {
        let tokens: Vec<_> = tokenize("patient's pain-free (today)").collect();
        assert_eq!(tokens, vec!["patient", "s", "pain", "free", "today"]);
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("  \n\t ...  ").count(), 0);
    }

    #[test]
    fn test_tokenize_unicode() {
        let tokens: Vec<_> = tokenize("fièvre—toux").collect();
        assert_eq!(tokens, vec!["fièvre", "toux"]);
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("no"));
        assert!(is_stop_word("t"));
        assert!(!is_stop_word("fever"));
        assert!(!is_stop_word("The"));
    }

    #[test]
    fn test_content_tokens() {
        let tokens: Vec<_> = content_tokens("the patient has no fever and a cough").collect();
        assert_eq!(tokens, vec!["patient", "fever", "cough"]);
    }

    #[test]
    fn test_stop_words_never_collide_with_keywords() {
        let table = medreport_config::KeywordConfig::default();
        for word in table
            .severe
            .iter()
            .chain(&table.moderate)
            .chain(&table.symptoms)
            .chain(&table.conditions)
        {
            assert!(!is_stop_word(word), "{} is a stop word", word);
        }
    }
}
