//! feedtriage Classifiers
//!
//! Deterministic, keyword-rule analysis of customer feedback.
//!
//! Each classifier is a small pure component over fixed lexicons:
//! - Keyword extraction: ranked significant terms
//! - Sentiment: whole-word polarity vote with a fixed neutral score
//! - Tone: first-match over ordered cue lists
//! - Impact: urgency terms, with a Critical-tone floor
//! - Issue type: bug / feature / praise / complaint / general
//! - Repeat detection: weighted similarity against a recent history window
//!
//! [`Analyzer`] composes them and merges the impact and repeat priorities
//! by taking the higher of the two.

pub mod analyzer;
pub mod config;
pub mod impact;
pub mod issue_type;
pub mod keywords;
pub mod lexicon;
pub mod patterns;
pub mod repeat;
pub mod sentiment;
pub mod tone;

pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use impact::ImpactClassifier;
pub use issue_type::IssueTypeClassifier;
pub use keywords::KeywordExtractor;
pub use repeat::{RepeatDetector, Similarity};
pub use sentiment::SentimentScorer;
pub use tone::ToneClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::config::AnalyzerConfig;
    pub use crate::impact::ImpactClassifier;
    pub use crate::issue_type::IssueTypeClassifier;
    pub use crate::keywords::KeywordExtractor;
    pub use crate::repeat::RepeatDetector;
    pub use crate::sentiment::SentimentScorer;
    pub use crate::tone::ToneClassifier;
}
