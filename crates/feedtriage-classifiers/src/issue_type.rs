//! Issue-type classifier
//!
//! Order: bug terms, feature terms, praise (positive with at least two
//! positive hits), complaint (negative), general feedback.

use crate::lexicon::{BUG_TERMS, FEATURE_TERMS};
use crate::patterns::CueMatcher;
use feedtriage_core::{IssueType, Result, Sentiment, SentimentResult};

/// Positive hits needed before positive feedback counts as praise
pub const PRAISE_MIN_POSITIVE: usize = 2;

pub struct IssueTypeClassifier {
    bug: CueMatcher,
    feature: CueMatcher,
}

impl IssueTypeClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bug: CueMatcher::new("bug", BUG_TERMS)?,
            feature: CueMatcher::new("feature request", FEATURE_TERMS)?,
        })
    }

    pub fn classify(&self, text: &str, sentiment: &SentimentResult) -> IssueType {
        if self.bug.is_match(text) {
            IssueType::Bug
        } else if self.feature.is_match(text) {
            IssueType::FeatureRequest
        } else if sentiment.label == Sentiment::Positive
            && sentiment.positive_count >= PRAISE_MIN_POSITIVE
        {
            IssueType::Praise
        } else if sentiment.label == Sentiment::Negative {
            IssueType::Complaint
        } else {
            IssueType::GeneralFeedback
        }
    }
}
