//! Analyzer configuration

use crate::keywords::DEFAULT_KEYWORD_LIMIT;
use feedtriage_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables for the analysis pipeline. Defaults reproduce the stock
/// behavior; the similarity weights are fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Keywords kept per feedback text
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,

    /// History items older than this many days are ignored
    #[serde(default = "default_repeat_window_days")]
    pub repeat_window_days: u32,

    /// Scores strictly above this mark an item as similar
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Similar issues reported per analysis
    #[serde(default = "default_max_similar_issues")]
    pub max_similar_issues: usize,

    /// Repeat count at which the repeat priority becomes Medium Impact
    #[serde(default = "default_medium_repeat_count")]
    pub medium_repeat_count: usize,

    /// Repeat count at which the repeat priority becomes High Impact
    #[serde(default = "default_high_repeat_count")]
    pub high_repeat_count: usize,
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.repeat_window_days == 0 {
            return Err(Error::config("repeat_window_days must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::config(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.medium_repeat_count > self.high_repeat_count {
            return Err(Error::config(format!(
                "medium_repeat_count ({}) exceeds high_repeat_count ({})",
                self.medium_repeat_count, self.high_repeat_count
            )));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            keyword_limit: default_keyword_limit(),
            repeat_window_days: default_repeat_window_days(),
            similarity_threshold: default_similarity_threshold(),
            max_similar_issues: default_max_similar_issues(),
            medium_repeat_count: default_medium_repeat_count(),
            high_repeat_count: default_high_repeat_count(),
        }
    }
}

fn default_keyword_limit() -> usize {
    DEFAULT_KEYWORD_LIMIT
}

fn default_repeat_window_days() -> u32 {
    30
}

fn default_similarity_threshold() -> f64 {
    0.4
}

fn default_max_similar_issues() -> usize {
    3
}

fn default_medium_repeat_count() -> usize {
    3
}

fn default_high_repeat_count() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AnalyzerConfig = serde_yaml::from_str("repeat_window_days: 7\n").unwrap();
        assert_eq!(config.repeat_window_days, 7);
        assert_eq!(config.keyword_limit, 10);
        assert_eq!(config.similarity_threshold, 0.4);
        assert_eq!(config.max_similar_issues, 3);
    }

    #[test]
    fn test_validate() {
        assert!(AnalyzerConfig::default().validate().is_ok());

        let config = AnalyzerConfig {
            repeat_window_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyzerConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyzerConfig {
            medium_repeat_count: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
