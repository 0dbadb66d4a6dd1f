//! Tone classifier
//!
//! First match wins over the cue lists in a fixed order: constructive,
//! appreciative, critical, inquisitive. Constructive goes first so that
//! suggestions mentioning a defect are not read as complaints.

use crate::lexicon::{APPRECIATIVE_CUES, CONSTRUCTIVE_CUES, CRITICAL_CUES, INQUISITIVE_CUES};
use crate::patterns::CueMatcher;
use feedtriage_core::{Result, Tone};
use tracing::debug;

pub struct ToneClassifier {
    ordered: Vec<(Tone, CueMatcher)>,
}

impl ToneClassifier {
    pub fn new() -> Result<Self> {
        let ordered = vec![
            (
                Tone::Constructive,
                CueMatcher::new("constructive", CONSTRUCTIVE_CUES)?,
            ),
            (
                Tone::Appreciative,
                CueMatcher::new("appreciative", APPRECIATIVE_CUES)?,
            ),
            (Tone::Critical, CueMatcher::new("critical", CRITICAL_CUES)?),
            (
                Tone::Inquisitive,
                CueMatcher::new("inquisitive", INQUISITIVE_CUES)?,
            ),
        ];

        Ok(Self { ordered })
    }

    pub fn classify(&self, text: &str) -> Tone {
        self.ordered
            .iter()
            .find_map(|(tone, matcher)| {
                let cue = matcher.first_cue(text)?;
                debug!(cues = matcher.name(), cue, "tone cue matched");
                Some(*tone)
            })
            .unwrap_or(Tone::Neutral)
    }
}
