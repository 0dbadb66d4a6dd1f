//! Server configuration

use feedtriage_classifiers::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON array of feedback items loaded into the store at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Allow cross-origin requests from anywhere
    #[serde(default = "default_true")]
    pub cors_allow_any_origin: bool,

    /// Origins allowed when `cors_allow_any_origin` is off
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Admin route protection
    #[serde(default)]
    pub auth: AuthConfig,

    /// Analysis pipeline tunables
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen_addr: Option<String>,
    pub port: Option<u16>,
    pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: impl AsRef<Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();

        // Try to load from file, or use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen_addr) = &overrides.listen_addr {
            config.listen_addr = listen_addr.clone();
        }
        if let Some(port) = overrides.port {
            config.port = port;
        }
        if let Some(seed_path) = &overrides.seed_path {
            config.seed_path = Some(seed_path.clone());
        }

        config.analyzer.validate()?;

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            seed_path: None,
            cors_allow_any_origin: true,
            cors_allowed_origins: default_cors_origins(),
            auth: AuthConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

/// Mock admin role check. There is no user store; the dashboard sends the
/// role it logged in with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require `x-user-role: admin` on admin routes
    #[serde(default)]
    pub enforce_admin_role: bool,

    /// Require `x-admin-token` to match this value on admin routes
    #[serde(default)]
    pub admin_token: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load("/nonexistent/feedtriage.yaml", &ConfigOverrides::default())
            .unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.listen_addr, "0.0.0.0");
        assert!(config.cors_allow_any_origin);
        assert!(!config.auth.enforce_admin_role);
        assert_eq!(config.analyzer, AnalyzerConfig::default());
    }

    #[test]
    fn test_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port: 9000\nauth:\n  enforce_admin_role: true\nanalyzer:\n  repeat_window_days: 14\n"
        )
        .unwrap();

        let config = ServerConfig::load(file.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.auth.enforce_admin_role);
        assert_eq!(config.analyzer.repeat_window_days, 14);
        assert_eq!(config.analyzer.similarity_threshold, 0.4);

        let overrides = ConfigOverrides {
            listen_addr: Some("127.0.0.1".to_string()),
            port: Some(7000),
            seed_path: None,
        };
        let config = ServerConfig::load(file.path(), &overrides).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.listen_addr, "127.0.0.1");
    }

    #[test]
    fn test_invalid_analyzer_config_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "analyzer:\n  similarity_threshold: 2.0\n").unwrap();

        assert!(ServerConfig::load(file.path(), &ConfigOverrides::default()).is_err());
    }
}
