//! Per-request parameters for the retrieve-and-generate call.
//!
//! These are the values the shell re-reads from its controls on every
//! submission. Out-of-range values are a caller error and are rejected by
//! `QueryOptions::validate` — nothing is silently clamped.

use kbchat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Fixed model-identifier choices, as (identifier, display label) pairs.
/// The first entry is the default.
pub const MODEL_CHOICES: &[(&str, &str)] = &[
    ("anthropic.claude-3-haiku-20240307-v1:0", "Claude 3 Haiku"),
    ("anthropic.claude-3-sonnet-20240229-v1:0", "Claude 3 Sonnet"),
    ("anthropic.claude-v2:1", "Claude 2.1"),
    ("anthropic.claude-v2", "Claude 2"),
    ("anthropic.claude-instant-v1", "Claude Instant 1.2"),
];

/// Allowed values for the maximum-tokens parameter.
pub const TOKEN_LIMIT_CHOICES: &[u32] = &[250, 500, 1000, 2000, 5000];

/// Bounds for the retrieved-result count.
pub const MIN_RESULTS: u32 = 1;
pub const MAX_RESULTS: u32 = 50;

/// Search strategy hint forwarded to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchType {
    /// Let the service pick its own strategy.
    Default,
    /// Combined keyword + vector search.
    Hybrid,
    /// Pure vector search.
    Semantic,
}

impl SearchType {
    /// Parse a search type from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "hybrid" => Some(Self::Hybrid),
            "semantic" => Some(Self::Semantic),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hybrid => "hybrid",
            Self::Semantic => "semantic",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default Search",
            Self::Hybrid => "Hybrid Search",
            Self::Semantic => "Semantic Search",
        }
    }

    /// The wire value of the search-type hint.
    ///
    /// `Default` means "no hint": the field is omitted from the request
    /// entirely rather than sent as a value the service would reject.
    pub fn override_value(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Hybrid => Some("HYBRID"),
            Self::Semantic => Some("SEMANTIC"),
        }
    }
}

/// Generation and retrieval parameters for one submission.
///
/// Immutable per request; construct a fresh value for each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Foundation-model identifier (see [`MODEL_CHOICES`]).
    pub model: String,

    /// Maximum tokens to generate (one of [`TOKEN_LIMIT_CHOICES`]).
    pub max_tokens: u32,

    /// Sampling temperature in [0, 1].
    pub temperature: f32,

    /// Nucleus-sampling top-p in [0, 1].
    pub top_p: f32,

    /// Maximum number of retrieved results in [1, 50].
    pub max_results: u32,

    /// Search strategy hint.
    pub search_type: SearchType,
}

impl Default for QueryOptions {
    fn default() -> Self {
        // Matches the default control positions of the interaction shell.
        Self {
            model: MODEL_CHOICES[0].0.to_string(),
            max_tokens: 500,
            temperature: 0.2,
            top_p: 0.7,
            max_results: 2,
            search_type: SearchType::Default,
        }
    }
}

impl QueryOptions {
    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the nucleus-sampling top-p.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the retrieved-result count.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the search strategy hint.
    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    /// Check every field against its allowed range.
    ///
    /// Returns a `Validation` error naming the offending field; values are
    /// never adjusted on the caller's behalf.
    pub fn validate(&self) -> AppResult<()> {
        if self.model.trim().is_empty() {
            return Err(AppError::Validation(
                "model identifier must not be empty".to_string(),
            ));
        }

        if !TOKEN_LIMIT_CHOICES.contains(&self.max_tokens) {
            return Err(AppError::Validation(format!(
                "max_tokens must be one of {:?}, got {}",
                TOKEN_LIMIT_CHOICES, self.max_tokens
            )));
        }

        if !self.temperature.is_finite() || !(0.0..=1.0).contains(&self.temperature) {
            return Err(AppError::Validation(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }

        if !self.top_p.is_finite() || !(0.0..=1.0).contains(&self.top_p) {
            return Err(AppError::Validation(format!(
                "top_p must be within [0, 1], got {}",
                self.top_p
            )));
        }

        if !(MIN_RESULTS..=MAX_RESULTS).contains(&self.max_results) {
            return Err(AppError::Validation(format!(
                "max_results must be within [{}, {}], got {}",
                MIN_RESULTS, MAX_RESULTS, self.max_results
            )));
        }

        Ok(())
    }
}

/// Build the foundation-model reference string for a region and model id.
///
/// The format is fixed: namespace prefix, region, resource-type segment,
/// model identifier.
pub fn model_arn(region: &str, model_id: &str) -> String {
    format!("arn:aws:bedrock:{}::foundation-model/{}", region, model_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_arn_format() {
        assert_eq!(
            model_arn("us-west-2", "anthropic.claude-3-haiku-20240307-v1:0"),
            "arn:aws:bedrock:us-west-2::foundation-model/anthropic.claude-3-haiku-20240307-v1:0"
        );
    }

    #[test]
    fn test_model_arn_for_every_choice() {
        for (model_id, _label) in MODEL_CHOICES {
            let arn = model_arn("eu-west-1", model_id);
            assert_eq!(
                arn,
                format!("arn:aws:bedrock:eu-west-1::foundation-model/{}", model_id)
            );
        }
    }

    #[test]
    fn test_search_type_parsing() {
        assert_eq!(SearchType::parse("default"), Some(SearchType::Default));
        assert_eq!(SearchType::parse("HYBRID"), Some(SearchType::Hybrid));
        assert_eq!(SearchType::parse("Semantic"), Some(SearchType::Semantic));
        assert_eq!(SearchType::parse("keyword"), None);
    }

    #[test]
    fn test_search_type_override_value() {
        assert_eq!(SearchType::Default.override_value(), None);
        assert_eq!(SearchType::Hybrid.override_value(), Some("HYBRID"));
        assert_eq!(SearchType::Semantic.override_value(), Some("SEMANTIC"));
    }

    #[test]
    fn test_default_options_are_valid() {
        assert!(QueryOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_token_limit() {
        let options = QueryOptions::default().with_max_tokens(300);
        assert!(matches!(options.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let options = QueryOptions::default().with_temperature(1.5);
        assert!(options.validate().is_err());

        let options = QueryOptions::default().with_temperature(-0.1);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_top_p() {
        let options = QueryOptions::default().with_top_p(2.0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_result_count_bounds() {
        assert!(QueryOptions::default().with_max_results(0).validate().is_err());
        assert!(QueryOptions::default().with_max_results(51).validate().is_err());
        assert!(QueryOptions::default().with_max_results(1).validate().is_ok());
        assert!(QueryOptions::default().with_max_results(50).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let options = QueryOptions::default().with_model("  ");
        assert!(options.validate().is_err());
    }
}
