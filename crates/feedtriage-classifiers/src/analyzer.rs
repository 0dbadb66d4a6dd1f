//! Analysis orchestrator
//!
//! Runs every classifier over one feedback text, checks it against the
//! caller's history snapshot and merges the two priority signals. The
//! history must be read before the new item is stored, or the item would
//! match itself.

use crate::config::AnalyzerConfig;
use crate::impact::ImpactClassifier;
use crate::issue_type::IssueTypeClassifier;
use crate::keywords::KeywordExtractor;
use crate::repeat::RepeatDetector;
use crate::sentiment::SentimentScorer;
use crate::tone::ToneClassifier;
use chrono::{DateTime, Utc};
use feedtriage_core::{AnalysisRecord, HistoryItem, Result};
use tracing::debug;

/// The full feedback analysis pipeline.
///
/// Construction compiles every lexicon once; analysis itself never fails
/// and holds no mutable state, so one `Analyzer` can serve concurrent
/// requests behind an `Arc`.
pub struct Analyzer {
    keywords: KeywordExtractor,
    sentiment: SentimentScorer,
    tone: ToneClassifier,
    impact: ImpactClassifier,
    issue_type: IssueTypeClassifier,
    repeat: RepeatDetector,
}

impl Analyzer {
    /// Analyzer with the stock configuration
    pub fn new() -> Result<Self> {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            keywords: KeywordExtractor::with_limit(config.keyword_limit)?,
            sentiment: SentimentScorer::new()?,
            tone: ToneClassifier::new()?,
            impact: ImpactClassifier::new()?,
            issue_type: IssueTypeClassifier::new()?,
            repeat: RepeatDetector::new(&config),
        })
    }

    /// Analyze `text` against `history` as of now
    pub fn analyze(&self, text: &str, history: &[HistoryItem]) -> AnalysisRecord {
        self.analyze_at(text, history, Utc::now())
    }

    /// Analyze `text` against `history` as of `now`.
    ///
    /// Empty text degrades to the no-signal defaults: no keywords, neutral
    /// sentiment at 50, Neutral tone, Low Impact, General Feedback.
    pub fn analyze_at(
        &self,
        text: &str,
        history: &[HistoryItem],
        now: DateTime<Utc>,
    ) -> AnalysisRecord {
        let sentiment = self.sentiment.score(text);
        let keywords = self.keywords.extract(text);
        let tone = self.tone.classify(text);
        let base_priority = self.impact.classify(text, tone);
        let issue_type = self.issue_type.classify(text, &sentiment);

        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        let repeat_analysis = self.repeat.detect(text, &words, history, now);

        let priority = base_priority.merge(repeat_analysis.priority);

        debug!(
            sentiment = %sentiment.label,
            tone = %tone,
            issue_type = %issue_type,
            base_priority = %base_priority,
            priority = %priority,
            repeat_count = repeat_analysis.repeat_count,
            history = history.len(),
            "feedback analyzed"
        );

        AnalysisRecord {
            sentiment: sentiment.label,
            sentiment_score: sentiment.score,
            keywords,
            priority,
            tone,
            issue_type,
            repeat_analysis,
            analyzed_at: now,
        }
    }
}
