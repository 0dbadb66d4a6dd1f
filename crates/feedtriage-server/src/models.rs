//! Request and response bodies

use feedtriage_core::{Error, FeedbackStatus, Priority, Result, Sentiment};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_TYPE: &str = "General";

/// Body of `POST /feedback`. Every field is optional at the JSON level so a
/// missing field reports the same validation error as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingInput>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub service_type: String,
    pub rating: i64,
    pub feedback: String,
}

impl SubmitFeedbackRequest {
    pub fn validate(self) -> Result<ValidSubmission> {
        let (Some(name), Some(email), Some(feedback)) = (
            non_blank(self.name),
            non_blank(self.email),
            non_blank(self.feedback),
        ) else {
            return Err(Error::validation("Name, email, and feedback are required"));
        };

        Ok(ValidSubmission {
            name,
            email,
            service_type: non_blank(self.service_type)
                .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
            rating: self.rating.map_or(0, |rating| rating.value()),
            feedback,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Rating as sent by forms: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Number(f64),
    Text(String),
}

impl RatingInput {
    /// Integer rating; fractions truncate and unparseable text is 0
    pub fn value(&self) -> i64 {
        match self {
            Self::Number(n) => n.trunc() as i64,
            Self::Text(text) => leading_integer(text).unwrap_or(0),
        }
    }
}

/// Parse the integer prefix of `text`, e.g. "4 stars" -> 4
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    text[..sign_len + digits].parse().ok()
}

/// Filters for `GET /feedback`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub sentiment: Option<Sentiment>,
    pub status: Option<FeedbackStatus>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn matches(&self, item: &feedtriage_core::FeedbackItem) -> bool {
        if self.sentiment.is_some_and(|s| s != item.analysis.sentiment) {
            return false;
        }
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != item.analysis.priority) {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(needle) if !needle.is_empty() => {
                item.feedback.to_lowercase().contains(&needle)
                    || item.name.to_lowercase().contains(&needle)
                    || item.email.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// Query of `GET /analytics/trends`; `days` is parsed leniently
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendsQuery {
    pub days: Option<String>,
}

/// Success envelope shared by every JSON endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::item;
    use chrono::Utc;

    fn request(json: &str) -> SubmitFeedbackRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_validate_requires_name_email_feedback() {
        let err = request(r#"{"name": "Ana", "email": "ana@example.com"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: Name, email, and feedback are required"
        );

        assert!(request(r#"{"name": "  ", "email": "a@b.c", "feedback": "hi"}"#)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_defaults() {
        let submission = request(r#"{"name": "Ana", "email": "a@b.c", "feedback": "hi"}"#)
            .validate()
            .unwrap();
        assert_eq!(submission.service_type, "General");
        assert_eq!(submission.rating, 0);
    }

    #[test]
    fn test_rating_shapes() {
        let parse = |json: &str| {
            request(&format!(
                r#"{{"name": "A", "email": "a@b.c", "feedback": "x", "rating": {json}}}"#
            ))
            .validate()
            .unwrap()
            .rating
        };
        assert_eq!(parse("4"), 4);
        assert_eq!(parse("4.8"), 4);
        assert_eq!(parse("\"5\""), 5);
        assert_eq!(parse("\"3 stars\""), 3);
        assert_eq!(parse("\"great\""), 0);
        assert_eq!(parse("null"), 0);
    }

    #[test]
    fn test_list_query_filters() {
        let item = item("a", Utc::now());

        assert!(ListQuery::default().matches(&item));
        assert!(ListQuery {
            sentiment: Some(Sentiment::Negative),
            search: Some("SLOW".to_string()),
            ..Default::default()
        }
        .matches(&item));
        assert!(!ListQuery {
            priority: Some(Priority::High),
            ..Default::default()
        }
        .matches(&item));
        assert!(!ListQuery {
            search: Some("checkout".to_string()),
            ..Default::default()
        }
        .matches(&item));
    }

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2]).with_count(2)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 2);
        assert!(value.get("message").is_none());

        let value = serde_json::to_value(ApiResponse::message("done")).unwrap();
        assert!(value.get("data").is_none());
        assert_eq!(value["message"], "done");
    }
}
