//! Startup configuration for the kbchat CLI.
//!
//! The original habit this replaces is looking up environment variables at
//! every call site. Here configuration is loaded exactly once, from:
//! - Environment variables
//! - An optional YAML config file (kbchat.yaml)
//! - Command-line flags (applied last, highest precedence)
//!
//! The result is an immutable `AppConfig` threaded explicitly into the
//! retrieval adapter. Per-request knobs (model, generation and retrieval
//! parameters) are NOT stored here — they are re-read from the shell
//! controls on every submission.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default service region when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Main application configuration.
///
/// Holds everything that is fixed for the lifetime of the process:
/// where the knowledge-base service lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Knowledge-base identifier (`KB_ID`). Required for network commands;
    /// validated lazily so offline subcommands like `--help` still work.
    pub kb_id: Option<String>,

    /// Service region, used both in the endpoint host and in the
    /// foundation-model reference string.
    pub region: String,

    /// Explicit service endpoint override (`KBCHAT_ENDPOINT`).
    /// When unset, the endpoint is derived from the region.
    pub endpoint: Option<String>,

    /// Bearer token for service authentication (`AWS_BEARER_TOKEN_BEDROCK`).
    /// Optional: a gateway endpoint may not need one.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,

    /// Default model identifier, overridable per request.
    pub model: String,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// YAML config file structure.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    service: Option<ServiceConfig>,
    defaults: Option<DefaultsConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceConfig {
    #[serde(rename = "knowledgeBaseId")]
    knowledge_base_id: Option<String>,
    region: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DefaultsConfig {
    model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kb_id: None,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            api_token: None,
            model: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables (these override the config file):
    /// - `KB_ID`: knowledge-base identifier
    /// - `AWS_REGION`: service region
    /// - `KBCHAT_ENDPOINT`: explicit endpoint override
    /// - `AWS_BEARER_TOKEN_BEDROCK`: bearer token for authentication
    /// - `KBCHAT_CONFIG`: path to config file (default: ./kbchat.yaml)
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("KBCHAT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("kbchat.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(kb_id) = std::env::var("KB_ID") {
            config.kb_id = Some(kb_id);
        }

        if let Ok(region) = std::env::var("AWS_REGION") {
            config.region = region;
        }

        if let Ok(endpoint) = std::env::var("KBCHAT_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        config.api_token = std::env::var("AWS_BEARER_TOKEN_BEDROCK").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(service) = config_file.service {
            if let Some(kb_id) = service.knowledge_base_id {
                result.kb_id = Some(kb_id);
            }
            if let Some(region) = service.region {
                result.region = region;
            }
            if let Some(endpoint) = service.endpoint {
                result.endpoint = Some(endpoint);
            }
        }

        if let Some(defaults) = config_file.defaults {
            if let Some(model) = defaults.model {
                result.model = model;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over both environment variables and the
    /// config file.
    pub fn with_overrides(
        mut self,
        kb_id: Option<String>,
        region: Option<String>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(kb_id) = kb_id {
            self.kb_id = Some(kb_id);
        }

        if let Some(region) = region {
            self.region = region;
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// The knowledge-base identifier, required before any network call.
    pub fn require_kb_id(&self) -> AppResult<&str> {
        self.kb_id.as_deref().ok_or_else(|| {
            AppError::Config(
                "No knowledge-base identifier configured. \
                 Set KB_ID or pass --kb-id."
                    .to_string(),
            )
        })
    }

    /// The service endpoint: the explicit override when present, otherwise
    /// derived from the region.
    pub fn service_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-agent-runtime.{}.amazonaws.com", self.region),
        }
    }
}
