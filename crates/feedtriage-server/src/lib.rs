//! FeedTriage server
//!
//! HTTP intake and triage service: accepts customer feedback, runs it
//! through the analysis pipeline against recent history and serves the
//! stored results and dashboard aggregates.

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod state;
pub mod store;

pub use config::{AuthConfig, ConfigOverrides, ServerConfig};
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
pub use store::{FeedbackStore, InMemoryStore};
