//! feedtriage Core
//!
//! Domain types and error handling shared across feedtriage components.
//!
//! This crate provides:
//! - Closed enums for every classification axis (sentiment, tone, priority, issue type)
//! - Keyword, history and analysis record types with the JSON shape the
//!   dashboard and stored feedback use
//! - The stored feedback item and its partial update
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AnalysisRecord, FeedbackItem, FeedbackStatus, FeedbackUpdate, HistoryItem, IssueType,
    Keyword, KeywordEntry, Priority, RepeatAnalysis, Sentiment, SentimentResult, SimilarIssue,
    Tone,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        AnalysisRecord, HistoryItem, IssueType, Keyword, Priority, RepeatAnalysis, Sentiment,
        Tone,
    };
}
