//! Core types for feedtriage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Implements `ALL`, `as_str`, `Display` and `FromStr` over the wire labels of a
/// unit enum. Extra labels after `|` are accepted by `FromStr` only.
macro_rules! wire_labels {
    ($ty:ident { $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Label used on the wire and in the dashboard
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                match s {
                    $($label $(| $alias)* => Ok($ty::$variant),)+
                    other => Err(crate::Error::validation(format!(
                        concat!("unknown ", stringify!($ty), " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}

/// Overall polarity of a feedback text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

wire_labels!(Sentiment {
    Positive => "positive",
    Neutral => "neutral",
    Negative => "negative",
});

/// Rhetorical stance of a feedback text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tone {
    Constructive,
    Appreciative,
    Critical,
    Inquisitive,
    Neutral,
}

wire_labels!(Tone {
    Constructive => "Constructive",
    Appreciative => "Appreciative",
    Critical => "Critical",
    Inquisitive => "Inquisitive",
    Neutral => "Neutral",
});

/// Urgency of a feedback item.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Low < Medium < High`, which is what priority merging relies on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    #[serde(rename = "Low Impact", alias = "Low")]
    Low,
    #[serde(rename = "Medium Impact", alias = "Medium")]
    Medium,
    #[serde(rename = "High Impact", alias = "High", alias = "Critical")]
    High,
}

wire_labels!(Priority {
    Low => "Low Impact" | "Low",
    Medium => "Medium Impact" | "Medium",
    High => "High Impact" | "High" | "Critical",
});

impl Priority {
    /// The higher of two priorities
    pub fn merge(self, other: Priority) -> Priority {
        self.max(other)
    }
}

/// Category of the reported issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueType {
    Bug,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    Praise,
    Complaint,
    #[serde(rename = "General Feedback")]
    GeneralFeedback,
}

wire_labels!(IssueType {
    Bug => "Bug",
    FeatureRequest => "Feature Request",
    Praise => "Praise",
    Complaint => "Complaint",
    GeneralFeedback => "General Feedback",
});

/// Workflow status of a stored feedback item
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FeedbackStatus {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

wire_labels!(FeedbackStatus {
    New => "New",
    InProgress => "In Progress",
    Resolved => "Resolved",
    Closed => "Closed",
});

/// A significant term and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
}

impl Keyword {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// A keyword as found in stored history: either a `{word, count}` object or a
/// bare string written by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordEntry {
    Counted(Keyword),
    Bare(String),
}

impl KeywordEntry {
    pub fn word(&self) -> &str {
        match self {
            Self::Counted(keyword) => &keyword.word,
            Self::Bare(word) => word,
        }
    }

    /// Occurrence count; a bare keyword counts once
    pub fn count(&self) -> usize {
        match self {
            Self::Counted(keyword) => keyword.count,
            Self::Bare(_) => 1,
        }
    }
}

impl From<Keyword> for KeywordEntry {
    fn from(keyword: Keyword) -> Self {
        Self::Counted(keyword)
    }
}

impl From<&str> for KeywordEntry {
    fn from(word: &str) -> Self {
        Self::Bare(word.to_string())
    }
}

impl From<KeywordEntry> for Keyword {
    fn from(entry: KeywordEntry) -> Self {
        match entry {
            KeywordEntry::Counted(keyword) => keyword,
            KeywordEntry::Bare(word) => Keyword::new(word, 1),
        }
    }
}

/// Read a keyword list in either stored shape, normalizing bare strings to a
/// count of one
fn deserialize_keywords<'de, D>(deserializer: D) -> std::result::Result<Vec<Keyword>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<KeywordEntry>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(Keyword::from).collect())
}

/// Outcome of the polarity vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub label: Sentiment,

    /// 0-100, fixed at 50 for neutral
    pub score: u8,

    pub positive_count: usize,
    pub negative_count: usize,
}

/// A previously stored feedback item, as consumed by repeat detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,

    /// Raw feedback text
    #[serde(default)]
    pub feedback: String,

    pub created_at: DateTime<Utc>,

    /// Keywords from the item's own analysis
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
}

/// A history item judged similar to the feedback under analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarIssue {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,

    /// Weighted similarity in [0, 0.9]
    pub similarity_score: f64,

    pub common_keywords: Vec<String>,
}

/// Result of comparing a feedback item against recent history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatAnalysis {
    pub is_repeat: bool,

    /// Number of similar items in the window, not capped
    pub repeat_count: usize,

    /// Most similar items, best first
    pub similar_issues: Vec<SimilarIssue>,

    /// Priority contributed by the repeat count
    pub priority: Priority,

    /// Similarity score of the best match, or 0
    #[serde(default)]
    pub confidence: f64,
}

/// Everything the analyzer derives from one feedback text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub sentiment: Sentiment,
    pub sentiment_score: u8,

    /// Stored items may carry bare-string keywords; they load with count 1
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<Keyword>,
    pub priority: Priority,
    pub tone: Tone,
    pub issue_type: IssueType,
    pub repeat_analysis: RepeatAnalysis,
    pub analyzed_at: DateTime<Utc>,
}

/// A stored feedback submission with its analysis merged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub service_type: String,
    pub rating: i64,
    pub feedback: String,
    #[serde(default)]
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub analysis: AnalysisRecord,
}

impl FeedbackItem {
    /// Project this item onto the shape repeat detection reads
    pub fn to_history_item(&self) -> HistoryItem {
        HistoryItem {
            id: self.id.clone(),
            feedback: self.feedback.clone(),
            created_at: self.created_at,
            keywords: self
                .analysis
                .keywords
                .iter()
                .cloned()
                .map(KeywordEntry::from)
                .collect(),
        }
    }
}

/// Manual edit of a stored item. The analysis is never recomputed; only the
/// listed fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeedbackStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

impl FeedbackUpdate {
    /// Apply the edit and stamp `updated_at`
    pub fn apply(&self, item: &mut FeedbackItem, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(priority) = self.priority {
            item.analysis.priority = priority;
        }
        if let Some(service_type) = &self.service_type {
            item.service_type = service_type.clone();
        }
        item.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_item() -> FeedbackItem {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        FeedbackItem {
            id: "abc".to_string(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            service_type: "General".to_string(),
            rating: 4,
            feedback: "dark mode please".to_string(),
            status: FeedbackStatus::New,
            created_at: at,
            updated_at: at,
            analysis: AnalysisRecord {
                sentiment: Sentiment::Neutral,
                sentiment_score: 50,
                keywords: vec![Keyword::new("dark", 1), Keyword::new("mode", 1)],
                priority: Priority::Low,
                tone: Tone::Neutral,
                issue_type: IssueType::GeneralFeedback,
                repeat_analysis: RepeatAnalysis::default(),
                analyzed_at: at,
            },
        }
    }

    #[test]
    fn test_priority_total_order() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert_eq!(Priority::Low.merge(Priority::Medium), Priority::Medium);
        assert_eq!(Priority::High.merge(Priority::Low), Priority::High);
        assert_eq!(Priority::default(), Priority::Low);
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Priority::High).unwrap(),
            "\"High Impact\""
        );
        assert_eq!(
            serde_json::to_string(&IssueType::FeatureRequest).unwrap(),
            "\"Feature Request\""
        );
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&Sentiment::Negative).unwrap(), "\"negative\"");
        assert_eq!(Tone::Inquisitive.to_string(), "Inquisitive");
        assert_eq!(IssueType::GeneralFeedback.as_str(), "General Feedback");
    }

    #[test]
    fn test_legacy_priority_labels() {
        let p: Priority = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(p, Priority::High);
        let p: Priority = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(p, Priority::Low);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Medium Impact".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("Urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for tone in Tone::ALL {
            assert_eq!(tone.as_str().parse::<Tone>().unwrap(), *tone);
        }
        for status in FeedbackStatus::ALL {
            assert_eq!(status.as_str().parse::<FeedbackStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_keyword_entry_accepts_both_shapes() {
        let entries: Vec<KeywordEntry> =
            serde_json::from_str(r#"["crash", {"word": "login", "count": 3}]"#).unwrap();
        assert_eq!(entries[0].word(), "crash");
        assert_eq!(entries[0].count(), 1);
        assert_eq!(entries[1].word(), "login");
        assert_eq!(entries[1].count(), 3);
    }

    #[test]
    fn test_history_item_defaults_missing_fields() {
        let item: HistoryItem =
            serde_json::from_str(r#"{"id": "x", "createdAt": "2026-03-01T00:00:00Z"}"#).unwrap();
        assert!(item.feedback.is_empty());
        assert!(item.keywords.is_empty());
    }

    #[test]
    fn test_feedback_item_flattens_analysis() {
        let item = sample_item();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["serviceType"], "General");
        assert_eq!(value["sentimentScore"], 50);
        assert_eq!(value["issueType"], "General Feedback");
        assert_eq!(value["repeatAnalysis"]["isRepeat"], false);

        let back: FeedbackItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_feedback_item_accepts_bare_keywords() {
        let item: FeedbackItem = serde_json::from_str(
            r#"{
                "id": "legacy-1",
                "name": "Dana",
                "email": "dana@example.com",
                "serviceType": "General",
                "rating": 2,
                "feedback": "app crash on start",
                "keywords": ["app", {"word": "crash", "count": 2}],
                "status": "New",
                "createdAt": "2026-03-01T12:00:00Z",
                "updatedAt": "2026-03-01T12:00:00Z",
                "sentiment": "negative",
                "sentimentScore": 100,
                "priority": "High",
                "tone": "Critical",
                "issueType": "Bug",
                "repeatAnalysis": {
                    "isRepeat": false,
                    "repeatCount": 0,
                    "similarIssues": [],
                    "priority": "Low"
                },
                "analyzedAt": "2026-03-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(
            item.analysis.keywords,
            vec![Keyword::new("app", 1), Keyword::new("crash", 2)]
        );
        assert_eq!(item.analysis.priority, Priority::High);

        let history = item.to_history_item();
        assert_eq!(history.keywords[0].word(), "app");
        assert_eq!(history.keywords[1].count(), 2);
    }

    #[test]
    fn test_to_history_item() {
        let history = sample_item().to_history_item();
        assert_eq!(history.id, "abc");
        assert_eq!(history.feedback, "dark mode please");
        let words: Vec<_> = history.keywords.iter().map(|k| k.word()).collect();
        assert_eq!(words, vec!["dark", "mode"]);
    }

    #[test]
    fn test_update_keeps_analysis() {
        let mut item = sample_item();
        let later = item.created_at + chrono::Duration::hours(2);
        let update = FeedbackUpdate {
            status: Some(FeedbackStatus::Resolved),
            priority: Some(Priority::High),
            service_type: None,
        };
        update.apply(&mut item, later);

        assert_eq!(item.status, FeedbackStatus::Resolved);
        assert_eq!(item.analysis.priority, Priority::High);
        assert_eq!(item.analysis.tone, Tone::Neutral);
        assert_eq!(item.service_type, "General");
        assert_eq!(item.updated_at, later);
        assert_eq!(item.created_at, item.analysis.analyzed_at);
    }
}
