//! Keyword extraction
//!
//! Lowercases the text, takes every standalone word of three or more ASCII
//! letters as a candidate, drops stop words and ranks the rest by
//! frequency. Word boundaries are ASCII, so runs glued to digits or
//! underscores ("login2fail", "error404", "snake_case") are skipped. Words with equal counts keep the order of their first
//! occurrence in the text.

use crate::lexicon::STOP_WORDS;
use feedtriage_core::{Keyword, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Default number of keywords kept per text
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

pub struct KeywordExtractor {
    word_pattern: Regex,
    stop_words: HashSet<&'static str>,
    limit: usize,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        Self::with_limit(DEFAULT_KEYWORD_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Result<Self> {
        let word_pattern = Regex::new(r"(?-u:\b)[a-z]{3,}(?-u:\b)").map_err(|e| {
            feedtriage_core::Error::classifier(format!("Failed to build word pattern: {e}"))
        })?;

        Ok(Self {
            word_pattern,
            stop_words: STOP_WORDS.iter().copied().collect(),
            limit,
        })
    }

    /// Ranked keywords of `text`, at most `limit` of them
    pub fn extract(&self, text: &str) -> Vec<Keyword> {
        let lowered = text.to_lowercase();

        let mut first_seen: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for word in self.word_pattern.find_iter(&lowered).map(|m| m.as_str()) {
            if self.stop_words.contains(word) {
                continue;
            }
            let count = counts.entry(word).or_insert_with(|| {
                first_seen.push(word);
                0
            });
            *count += 1;
        }

        let mut keywords: Vec<Keyword> = first_seen
            .into_iter()
            .map(|word| Keyword::new(word, counts[word]))
            .collect();

        // Stable, so ties stay in first-occurrence order.
        keywords.sort_by(|a, b| b.count.cmp(&a.count));
        keywords.truncate(self.limit);
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_by_frequency() {
        let extractor = KeywordExtractor::new().unwrap();
        let keywords = extractor.extract("the quick quick brown fox the fox");

        assert_eq!(
            keywords,
            vec![
                Keyword::new("quick", 2),
                Keyword::new("fox", 2),
                Keyword::new("brown", 1),
            ]
        );
    }

    #[test]
    fn test_empty_and_stop_word_only_input() {
        let extractor = KeywordExtractor::new().unwrap();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("The, and... THIS!").is_empty());
    }

    #[test]
    fn test_drops_short_tokens_and_digits() {
        let extractor = KeywordExtractor::new().unwrap();
        let keywords = extractor.extract("UI ok 404 v2 Login2Fail");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_skips_words_glued_to_word_characters() {
        let extractor = KeywordExtractor::new().unwrap();
        let keywords = extractor.extract("error404 snake_case login-page café");
        let words: Vec<_> = keywords.iter().map(|k| k.word.as_str()).collect();

        assert_eq!(words, vec!["login", "page", "caf"]);
    }

    #[test]
    fn test_case_folded() {
        let extractor = KeywordExtractor::new().unwrap();
        let keywords = extractor.extract("Crash CRASH crash");
        assert_eq!(keywords, vec![Keyword::new("crash", 3)]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let extractor = KeywordExtractor::with_limit(3).unwrap();
        let keywords =
            extractor.extract("alpha bravo charlie delta echo foxtrot golf hotel india juliet");
        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords[0].word, "alpha");

        let extractor = KeywordExtractor::new().unwrap();
        let keywords = extractor.extract(
            "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima",
        );
        assert_eq!(keywords.len(), DEFAULT_KEYWORD_LIMIT);
    }
}
