//! Impact classifier: base priority from urgency terms and tone

use crate::lexicon::{HIGH_IMPACT_TERMS, MEDIUM_IMPACT_TERMS};
use crate::patterns::CueMatcher;
use feedtriage_core::{Priority, Result, Tone};

pub struct ImpactClassifier {
    high: CueMatcher,
    medium: CueMatcher,
}

impl ImpactClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            high: CueMatcher::new("high impact", HIGH_IMPACT_TERMS)?,
            medium: CueMatcher::new("medium impact", MEDIUM_IMPACT_TERMS)?,
        })
    }

    /// A Critical tone is never below Medium, even without urgency terms.
    pub fn classify(&self, text: &str, tone: Tone) -> Priority {
        if self.high.is_match(text) {
            Priority::High
        } else if self.medium.is_match(text) || tone == Tone::Critical {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}
