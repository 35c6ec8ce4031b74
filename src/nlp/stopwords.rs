//! Stopword filtering
//!
//! Function words carry no topical signal, so the built-in embedder drops
//! them before hashing terms. Lists come from the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::errors::{Result, SummaryError};

/// A case-insensitive set of words to ignore
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// English stopwords
    pub fn english() -> Self {
        Self {
            stopwords: Self::load(LANGUAGE::English),
        }
    }

    /// Stopwords for a language code or name (`"en"`, `"german"`, ...)
    pub fn new(language: &str) -> Result<Self> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            _ => return Err(SummaryError::UnsupportedLanguage(language.to_string())),
        };
        Ok(Self {
            stopwords: Self::load(lang),
        })
    }

    /// A filter that keeps every word
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// A filter from a custom word list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add words to the filter
    pub fn extend(&mut self, words: &[&str]) {
        self.stopwords
            .extend(words.iter().map(|w| w.to_lowercase()));
    }

    /// Check a word; expects callers to pass lowercase terms on the hot path
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word) || self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load(lang: LANGUAGE) -> FxHashSet<String> {
        get(lang).iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::english();

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(!filter.is_stopword("circular"));
    }

    #[test]
    fn test_language_lookup() {
        let filter = StopwordFilter::new("de").unwrap();
        assert!(filter.is_stopword("und"));

        let err = StopwordFilter::new("klingon").unwrap_err();
        assert!(matches!(err, SummaryError::UnsupportedLanguage(ref l) if l == "klingon"));
    }

    #[test]
    fn test_custom_list() {
        let mut filter = StopwordFilter::from_list(&["Node", "graph"]);
        assert!(filter.is_stopword("node"));
        assert!(!filter.is_stopword("the"));

        filter.extend(&["extra"]);
        assert!(filter.is_stopword("EXTRA"));
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }
}
