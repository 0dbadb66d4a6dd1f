//! Repeat-issue detection
//!
//! Scores a new feedback item against every history item inside the recent
//! window and reports the ones that look like the same complaint. The
//! similarity score is a weighted sum of keyword overlap and raw word
//! overlap:
//!
//! ```text
//! score = 0.7 * |shared keywords| / max(|keywords|, |item keywords|)
//!       + 0.2 * |shared long words| / max(|words|, |item words|)
//! ```
//!
//! The weights sum to 0.9, so no pair ever scores above 0.9. The `> 0.4`
//! threshold is tuned against that ceiling; keep the weights as they are.

use crate::config::AnalyzerConfig;
use chrono::{DateTime, Duration, Utc};
use feedtriage_core::{HistoryItem, Priority, RepeatAnalysis, SimilarIssue};
use std::collections::HashSet;
use tracing::debug;

/// Weight of the keyword-overlap component
pub const KEYWORD_WEIGHT: f64 = 0.7;

/// Weight of the raw word-overlap component
pub const TEXT_WEIGHT: f64 = 0.2;

/// Shared raw words must be longer than this many characters to count
pub const MIN_SHARED_WORD_LEN: usize = 3;

/// Similarity of one pair of feedback texts
#[derive(Debug, Clone, PartialEq)]
pub struct Similarity {
    pub score: f64,

    /// Current keywords also present in the other item, in current order
    pub common_keywords: Vec<String>,
}

/// Keyword-overlap ratio and the shared keywords. A zero denominator gives 0.
pub fn keyword_overlap<S: AsRef<str>>(current: &[S], other: &[&str]) -> (f64, Vec<String>) {
    let other_set: HashSet<&str> = other.iter().copied().collect();

    let common: Vec<String> = current
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| other_set.contains(word))
        .map(str::to_string)
        .collect();

    (ratio(common.len(), current.len().max(other.len())), common)
}

/// Share of current words (duplicates included) that appear in the other
/// text and are longer than [`MIN_SHARED_WORD_LEN`]. A zero denominator gives 0.
pub fn word_overlap(current: &[&str], other: &[&str]) -> f64 {
    let other_set: HashSet<&str> = other.iter().copied().collect();

    let shared = current
        .iter()
        .filter(|word| word.chars().count() > MIN_SHARED_WORD_LEN && other_set.contains(*word))
        .count();

    ratio(shared, current.len().max(other.len()))
}

/// Weighted similarity between the current text and one history item
pub fn similarity<S: AsRef<str>>(
    current_keywords: &[S],
    current_words: &[&str],
    item_keywords: &[&str],
    item_words: &[&str],
) -> Similarity {
    let (keyword_ratio, common_keywords) = keyword_overlap(current_keywords, item_keywords);
    let word_ratio = word_overlap(current_words, item_words);

    Similarity {
        score: keyword_ratio * KEYWORD_WEIGHT + word_ratio * TEXT_WEIGHT,
        common_keywords,
    }
}

/// Split lowercased text on whitespace runs. Leading or trailing whitespace
/// contributes an empty first or last word, and empty text is a single empty
/// word, so those texts weigh one word more in the overlap denominator.
pub fn split_words(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![""];
    }

    let mut words = Vec::new();
    if text.starts_with(char::is_whitespace) {
        words.push("");
    }
    words.extend(text.split_whitespace());
    if text.ends_with(char::is_whitespace) {
        words.push("");
    }
    words
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Detects repeats of recently reported issues
#[derive(Debug, Clone)]
pub struct RepeatDetector {
    window: Duration,
    threshold: f64,
    max_similar_issues: usize,
    medium_repeat_count: usize,
    high_repeat_count: usize,
}

impl RepeatDetector {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            window: Duration::days(i64::from(config.repeat_window_days)),
            threshold: config.similarity_threshold,
            max_similar_issues: config.max_similar_issues,
            medium_repeat_count: config.medium_repeat_count,
            high_repeat_count: config.high_repeat_count,
        }
    }

    /// Priority contributed by a repeat count
    pub fn priority_for(&self, repeat_count: usize) -> Priority {
        if repeat_count >= self.high_repeat_count {
            Priority::High
        } else if repeat_count >= self.medium_repeat_count {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// Compare `text` and its extracted `keywords` against `history`.
    ///
    /// Only items created strictly after `now - window` are considered. Every
    /// similar item counts toward `repeat_count`; only the best few are
    /// returned in `similar_issues`.
    pub fn detect<S: AsRef<str>>(
        &self,
        text: &str,
        keywords: &[S],
        history: &[HistoryItem],
        now: DateTime<Utc>,
    ) -> RepeatAnalysis {
        if history.is_empty() {
            return RepeatAnalysis::default();
        }

        let cutoff = now - self.window;
        let lowered = text.to_lowercase();
        let current_words = split_words(&lowered);

        let mut similar: Vec<SimilarIssue> = history
            .iter()
            .filter(|item| item.created_at > cutoff)
            .filter_map(|item| {
                let item_text = item.feedback.to_lowercase();
                let item_words = split_words(&item_text);
                let item_keywords: Vec<&str> = item.keywords.iter().map(|k| k.word()).collect();

                let scored = similarity(keywords, &current_words, &item_keywords, &item_words);
                (scored.score > self.threshold).then(|| SimilarIssue {
                    id: item.id.clone(),
                    text: item.feedback.clone(),
                    created_at: item.created_at,
                    similarity_score: scored.score,
                    common_keywords: scored.common_keywords,
                })
            })
            .collect();

        let repeat_count = similar.len();
        similar.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

        // Taken before the cap so a repeat always reports its best score
        let confidence = similar.first().map_or(0.0, |best| best.similarity_score);
        similar.truncate(self.max_similar_issues);
        let priority = self.priority_for(repeat_count);

        debug!(
            repeat_count,
            confidence,
            priority = %priority,
            "repeat detection complete"
        );

        RepeatAnalysis {
            is_repeat: repeat_count > 0,
            repeat_count,
            similar_issues: similar,
            priority,
            confidence,
        }
    }
}

impl Default for RepeatDetector {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}
