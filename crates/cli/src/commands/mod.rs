//! Command handlers for the kbchat CLI.

mod ask;
mod chat;

pub use ask::AskCommand;
pub use chat::ChatCommand;

use clap::Args;
use kbchat_core::{AppConfig, AppError, AppResult};
use kbchat_retrieval::{QueryOptions, SearchType};

/// Generation and retrieval parameter flags shared by `ask` and `chat`.
///
/// Defaults mirror the shell's default control positions. Values are
/// re-read into a fresh `QueryOptions` on every submission; out-of-range
/// values are rejected, not clamped.
#[derive(Args, Debug, Clone)]
pub struct QueryParams {
    /// Foundation-model identifier (default: configured model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum tokens to generate (250, 500, 1000, 2000, or 5000)
    #[arg(long, default_value_t = 500)]
    pub max_tokens: u32,

    /// Sampling temperature in [0, 1]
    #[arg(long, default_value_t = 0.2)]
    pub temperature: f32,

    /// Nucleus-sampling top-p in [0, 1]
    #[arg(long, default_value_t = 0.7)]
    pub top_p: f32,

    /// Maximum number of retrieved results (1-50)
    #[arg(long, default_value_t = 2)]
    pub max_results: u32,

    /// Search strategy (default, hybrid, semantic)
    #[arg(long, default_value = "default")]
    pub search_type: String,
}

impl QueryParams {
    /// Build validated per-request options, falling back to the configured
    /// default model when none was given.
    pub fn to_options(&self, config: &AppConfig) -> AppResult<QueryOptions> {
        let search_type = SearchType::parse(&self.search_type).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown search type '{}' (expected default, hybrid, or semantic)",
                self.search_type
            ))
        })?;

        let options = QueryOptions::default()
            .with_model(self.model.clone().unwrap_or_else(|| config.model.clone()))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_top_p(self.top_p)
            .with_max_results(self.max_results)
            .with_search_type(search_type);

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_params() -> QueryParams {
        QueryParams {
            model: None,
            max_tokens: 500,
            temperature: 0.2,
            top_p: 0.7,
            max_results: 2,
            search_type: "default".to_string(),
        }
    }

    #[test]
    fn test_to_options_uses_configured_model() {
        let mut config = AppConfig::default();
        config.model = "anthropic.claude-v2".to_string();

        let options = default_params().to_options(&config).unwrap();
        assert_eq!(options.model, "anthropic.claude-v2");
    }

    #[test]
    fn test_explicit_model_wins_over_config() {
        let config = AppConfig::default();
        let mut params = default_params();
        params.model = Some("anthropic.claude-instant-v1".to_string());

        let options = params.to_options(&config).unwrap();
        assert_eq!(options.model, "anthropic.claude-instant-v1");
    }

    #[test]
    fn test_unknown_search_type_is_rejected() {
        let config = AppConfig::default();
        let mut params = default_params();
        params.search_type = "keyword".to_string();

        assert!(matches!(
            params.to_options(&config),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let config = AppConfig::default();

        let mut params = default_params();
        params.max_results = 60;
        assert!(params.to_options(&config).is_err());

        let mut params = default_params();
        params.max_tokens = 123;
        assert!(params.to_options(&config).is_err());
    }
}
