//! Fixed word lists used by the keyword classifiers.
//!
//! The lists never change at runtime; classifiers compile them into matchers
//! once at construction.

/// Words that vote for positive sentiment (whole-word match)
pub const POSITIVE_WORDS: &[&str] = &[
    "excellent", "great", "amazing", "wonderful", "fantastic", "love", "perfect", "awesome",
    "brilliant", "outstanding", "superb", "impressed", "helpful", "fast", "easy", "smooth",
    "reliable", "efficient", "satisfied", "happy", "good", "best", "thank", "appreciate",
    "recommend", "pleased",
];

/// Words that vote for negative sentiment (whole-word match)
pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible", "awful", "horrible", "worst", "bad", "poor", "disappointing", "frustrated",
    "angry", "annoying", "slow", "broken", "bug", "issue", "problem", "error", "fail", "crash",
    "useless", "waste", "hate", "difficult", "confusing", "complicated", "unreliable",
    "unresponsive",
];

/// Words dropped by keyword extraction
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
    "was", "are", "been", "be", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "i", "you", "he", "she", "it", "we", "they", "my", "your",
    "his", "her", "its", "our", "their", "this", "that", "these", "those",
];

// Tone cues, substring matched. Checked in the order listed in `tone.rs`.
pub const CONSTRUCTIVE_CUES: &[&str] = &[
    "feature", "suggestion", "add", "improve", "better", "would like", "maybe", "consider",
    "idea", "wish", "missing", "enhancement",
];

pub const APPRECIATIVE_CUES: &[&str] = &[
    "love", "great", "amazing", "thanks", "easy", "helpful", "perfect", "best", "good",
    "excellent", "happy",
];

pub const CRITICAL_CUES: &[&str] = &[
    "broken", "bug", "crash", "fail", "error", "slow", "hard", "difficult", "confusing", "hate",
    "bad", "worst", "issue",
];

pub const INQUISITIVE_CUES: &[&str] = &[
    "how", "why", "what", "where", "when", "question", "help", "assist", "support",
];

/// Urgency terms that make an item High Impact
pub const HIGH_IMPACT_TERMS: &[&str] = &[
    "blocking", "crash", "broken", "lost", "fail", "urgent", "immediately",
];

/// Urgency terms that make an item at least Medium Impact
pub const MEDIUM_IMPACT_TERMS: &[&str] = &["issue", "problem", "slow", "bug", "difficult", "confusing"];

/// Issue-type indicators, substring matched
pub const BUG_TERMS: &[&str] = &[
    "bug", "error", "crash", "broken", "not working", "issue", "problem",
];

pub const FEATURE_TERMS: &[&str] = &[
    "feature", "add", "need", "would like", "suggestion", "improve", "enhancement",
];
