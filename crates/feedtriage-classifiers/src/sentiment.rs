//! Lexicon-based sentiment scorer
//!
//! Counts whole-word hits from the positive and negative lexicons and takes
//! a strict majority vote. Ties, including no hits at all, are neutral with
//! a fixed score of 50. No smoothing or length normalization.
//!
//! Word boundaries are ASCII: accented letters count as separators, so
//! "ébad" still holds a hit for "bad".

use crate::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
use feedtriage_core::{Result, Sentiment, SentimentResult};
use regex::Regex;

/// Score reported for neutral results
pub const NEUTRAL_SCORE: u8 = 50;

pub struct SentimentScorer {
    positive: Regex,
    negative: Regex,
}

impl SentimentScorer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            positive: whole_word_pattern("positive", POSITIVE_WORDS)?,
            negative: whole_word_pattern("negative", NEGATIVE_WORDS)?,
        })
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();

        let positive_count = self.positive.find_iter(&lowered).count();
        let negative_count = self.negative.find_iter(&lowered).count();

        vote(positive_count, negative_count)
    }
}

/// Majority vote over hit counts
pub fn vote(positive_count: usize, negative_count: usize) -> SentimentResult {
    let total = (positive_count + negative_count) as f64;

    let (label, score) = if positive_count > negative_count {
        (Sentiment::Positive, share(positive_count, total))
    } else if negative_count > positive_count {
        (Sentiment::Negative, share(negative_count, total))
    } else {
        (Sentiment::Neutral, NEUTRAL_SCORE)
    };

    SentimentResult {
        label,
        score,
        positive_count,
        negative_count,
    }
}

fn share(winning: usize, total: f64) -> u8 {
    (winning as f64 / total * 100.0).min(100.0).round() as u8
}

fn whole_word_pattern(name: &str, words: &[&str]) -> Result<Regex> {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"(?-u:\b)(?:{alternation})(?-u:\b)")).map_err(|e| {
        feedtriage_core::Error::classifier(format!(
            "Failed to build {name} sentiment matcher: {e}"
        ))
    })
}
