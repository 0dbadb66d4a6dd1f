//! Shared application state and the submission flow

use anyhow::Result;
use chrono::Utc;
use feedtriage_classifiers::Analyzer;
use feedtriage_core::{FeedbackItem, FeedbackStatus, HistoryItem};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::models::SubmitFeedbackRequest;
use crate::store::{FeedbackStore, InMemoryStore};

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Analysis pipeline, compiled once at startup
    pub analyzer: Arc<Analyzer>,

    /// Feedback persistence
    pub store: Arc<dyn FeedbackStore>,

    /// Prometheus metrics handle for rendering; absent when no recorder
    /// was installed (tests, embedded use)
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Initialize state from configuration, seeding the in-memory store
    /// when `seed_path` is set
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Result<Self> {
        info!("Initializing application state");

        let store = match &config.seed_path {
            Some(path) => InMemoryStore::from_json_file(path)?,
            None => InMemoryStore::new(),
        };

        Self::with_store(config, Arc::new(store), metrics_handle)
    }

    /// Initialize state around an existing store
    pub fn with_store(
        config: ServerConfig,
        store: Arc<dyn FeedbackStore>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Result<Self> {
        let analyzer = Analyzer::with_config(config.analyzer.clone())?;

        Ok(Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            store,
            metrics_handle,
        })
    }

    /// Validate, analyze and store one submission.
    ///
    /// The history snapshot is taken before the insert so the new item
    /// never counts as a repeat of itself.
    pub async fn submit(&self, request: SubmitFeedbackRequest) -> feedtriage_core::Result<FeedbackItem> {
        let submission = request.validate()?;

        let history: Vec<HistoryItem> = self
            .store
            .list()
            .await?
            .iter()
            .map(FeedbackItem::to_history_item)
            .collect();

        let now = Utc::now();
        let start = Instant::now();
        let analysis = self.analyzer.analyze_at(&submission.feedback, &history, now);
        metrics::histogram!("feedtriage_analysis_latency_us")
            .record(start.elapsed().as_micros() as f64);

        if analysis.repeat_analysis.is_repeat {
            metrics::counter!("feedtriage_repeat_issues_total").increment(1);
        }

        let item = FeedbackItem {
            id: Uuid::new_v4().to_string(),
            name: submission.name,
            email: submission.email,
            service_type: submission.service_type,
            rating: submission.rating,
            feedback: submission.feedback,
            status: FeedbackStatus::New,
            created_at: now,
            updated_at: now,
            analysis,
        };

        let saved = self.store.insert(item).await?;
        metrics::counter!("feedtriage_submissions_total").increment(1);

        info!(
            id = %saved.id,
            priority = %saved.analysis.priority,
            repeats = saved.analysis.repeat_analysis.repeat_count,
            "Feedback submitted"
        );

        Ok(saved)
    }
}
