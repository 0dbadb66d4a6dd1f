//! Dashboard aggregates over stored feedback

use chrono::{Duration, NaiveDate};
use feedtriage_core::{FeedbackItem, FeedbackStatus, IssueType, Priority, Sentiment, Tone};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Keywords listed in the analytics summary
pub const TOP_KEYWORD_LIMIT: usize = 20;

/// Longest trend window served
pub const MAX_TREND_DAYS: u32 = 365;

pub const DEFAULT_TREND_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total: usize,
    pub average_rating: f64,
    pub sentiment_distribution: BTreeMap<Sentiment, usize>,
    pub tone_distribution: BTreeMap<Tone, usize>,
    pub priority_distribution: BTreeMap<Priority, usize>,
    pub status_distribution: BTreeMap<FeedbackStatus, usize>,
    pub issue_type_distribution: BTreeMap<IssueType, usize>,
    pub top_keywords: Vec<KeywordTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTotal {
    pub word: String,
    pub count: usize,
}

/// Feedback volume for one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

fn seeded<K: Ord + Copy>(keys: &[K]) -> BTreeMap<K, usize> {
    keys.iter().map(|key| (*key, 0)).collect()
}

pub fn summarize(items: &[FeedbackItem]) -> Analytics {
    let mut sentiment_distribution = seeded(Sentiment::ALL);
    let mut tone_distribution = seeded(Tone::ALL);
    let mut priority_distribution = seeded(Priority::ALL);
    let mut status_distribution = seeded(FeedbackStatus::ALL);
    let mut issue_type_distribution = BTreeMap::new();

    let mut first_seen: Vec<&str> = Vec::new();
    let mut keyword_counts: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let analysis = &item.analysis;
        *sentiment_distribution.entry(analysis.sentiment).or_insert(0) += 1;
        *tone_distribution.entry(analysis.tone).or_insert(0) += 1;
        *priority_distribution.entry(analysis.priority).or_insert(0) += 1;
        *status_distribution.entry(item.status).or_insert(0) += 1;
        *issue_type_distribution.entry(analysis.issue_type).or_insert(0) += 1;

        for keyword in &analysis.keywords {
            let word = keyword.word.as_str();
            let total = keyword_counts.entry(word).or_insert_with(|| {
                first_seen.push(word);
                0
            });
            *total += keyword.count;
        }
    }

    let mut top_keywords: Vec<KeywordTotal> = first_seen
        .into_iter()
        .map(|word| KeywordTotal {
            word: word.to_string(),
            count: keyword_counts[word],
        })
        .collect();
    top_keywords.sort_by(|a, b| b.count.cmp(&a.count));
    top_keywords.truncate(TOP_KEYWORD_LIMIT);

    Analytics {
        total: items.len(),
        average_rating: average_rating(items),
        sentiment_distribution,
        tone_distribution,
        priority_distribution,
        status_distribution,
        issue_type_distribution,
        top_keywords,
    }
}

/// Mean rating rounded to two decimals, 0 when there is no feedback
fn average_rating(items: &[FeedbackItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: i64 = items.iter().map(|item| item.rating).sum();
    let mean = sum as f64 / items.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Parse the `days` query value. Missing, unparseable or non-positive values
/// fall back to the default; large values are clamped.
pub fn trend_days(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|days| *days > 0)
        .map_or(DEFAULT_TREND_DAYS, |days| {
            days.min(i64::from(MAX_TREND_DAYS)) as u32
        })
}

/// Daily counts for the `days` days ending on `today`, oldest first
pub fn trends(items: &[FeedbackItem], days: u32, today: NaiveDate) -> Vec<TrendPoint> {
    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let mut point = TrendPoint {
                date: date.format("%Y-%m-%d").to_string(),
                total: 0,
                positive: 0,
                neutral: 0,
                negative: 0,
            };

            for item in items.iter().filter(|item| item.created_at.date_naive() == date) {
                point.total += 1;
                match item.analysis.sentiment {
                    Sentiment::Positive => point.positive += 1,
                    Sentiment::Neutral => point.neutral += 1,
                    Sentiment::Negative => point.negative += 1,
                }
            }

            point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::item;
    use chrono::{TimeZone, Utc};
    use feedtriage_core::Keyword;

    #[test]
    fn test_empty_summary_is_seeded() {
        let analytics = summarize(&[]);
        assert_eq!(analytics.total, 0);
        assert_eq!(analytics.average_rating, 0.0);
        assert_eq!(analytics.tone_distribution.len(), Tone::ALL.len());
        assert_eq!(analytics.status_distribution[&FeedbackStatus::Closed], 0);
        assert!(analytics.issue_type_distribution.is_empty());
        assert!(analytics.top_keywords.is_empty());

        let value = serde_json::to_value(&analytics).unwrap();
        assert_eq!(value["priorityDistribution"]["High Impact"], 0);
        assert_eq!(value["statusDistribution"]["In Progress"], 0);
    }

    #[test]
    fn test_summary_counts() {
        let now = Utc::now();
        let mut a = item("a", now);
        a.rating = 5;
        let mut b = item("b", now);
        b.rating = 4;
        b.analysis.sentiment = Sentiment::Positive;
        b.analysis.keywords = vec![Keyword::new("slow", 2), Keyword::new("login", 1)];
        let mut c = item("c", now);
        c.rating = 4;

        let analytics = summarize(&[a, b, c]);

        assert_eq!(analytics.total, 3);
        assert_eq!(analytics.average_rating, 4.33);
        assert_eq!(analytics.sentiment_distribution[&Sentiment::Negative], 2);
        assert_eq!(analytics.sentiment_distribution[&Sentiment::Positive], 1);
        assert_eq!(analytics.issue_type_distribution[&IssueType::Complaint], 3);
        assert_eq!(analytics.status_distribution[&FeedbackStatus::New], 3);
        assert_eq!(
            analytics.top_keywords[0],
            KeywordTotal {
                word: "slow".to_string(),
                count: 4
            }
        );
        assert_eq!(analytics.top_keywords[1].word, "search");
        assert_eq!(analytics.top_keywords[1].count, 2);
    }

    #[test]
    fn test_bare_keywords_count_once() {
        let mut value = serde_json::to_value(item("legacy", Utc::now())).unwrap();
        value["keywords"] = serde_json::json!(["slow", {"word": "search", "count": 2}, "slow"]);
        let legacy: FeedbackItem = serde_json::from_value(value).unwrap();

        let analytics = summarize(&[legacy]);

        assert_eq!(
            analytics.top_keywords,
            vec![
                KeywordTotal {
                    word: "slow".to_string(),
                    count: 2
                },
                KeywordTotal {
                    word: "search".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_trend_days_parsing() {
        assert_eq!(trend_days(None), 30);
        assert_eq!(trend_days(Some("7")), 7);
        assert_eq!(trend_days(Some("abc")), 30);
        assert_eq!(trend_days(Some("0")), 30);
        assert_eq!(trend_days(Some("-3")), 30);
        assert_eq!(trend_days(Some("10000")), MAX_TREND_DAYS);
    }

    #[test]
    fn test_trends_by_day() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let mut yesterday = item("y", Utc.with_ymd_and_hms(2026, 6, 14, 23, 59, 0).unwrap());
        yesterday.analysis.sentiment = Sentiment::Positive;
        let this_morning = item("t", Utc.with_ymd_and_hms(2026, 6, 15, 1, 0, 0).unwrap());
        let too_old = item("o", Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap());

        let points = trends(&[yesterday, this_morning, too_old], 3, today);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, "2026-06-13");
        assert_eq!(points[0].total, 0);
        assert_eq!(points[1].date, "2026-06-14");
        assert_eq!(points[1].positive, 1);
        assert_eq!(points[2].date, "2026-06-15");
        assert_eq!(points[2].negative, 1);
        assert_eq!(points[2].total, 1);
    }
}
