//! Client abstraction for the retrieve-and-generate service.

use kbchat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::options::QueryOptions;
use crate::wire::RetrieveAndGenerateResponse;

/// A validated retrieve-and-generate request.
///
/// Constructed fresh on every submission and never persisted. Validation
/// happens here, before any client sees the request: an empty query or an
/// out-of-range option is a `Validation` error and no network call is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer.
    pub query: String,

    /// Generation and retrieval parameters.
    pub options: QueryOptions,

    /// Session token for multi-turn continuity; `None` starts a fresh
    /// session on the service side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl QueryRequest {
    /// Create a request, rejecting empty queries and invalid options.
    pub fn new(query: impl Into<String>, options: QueryOptions) -> AppResult<Self> {
        let query = query.into();

        if query.trim().is_empty() {
            return Err(AppError::Validation(
                "query must not be empty".to_string(),
            ));
        }

        options.validate()?;

        Ok(Self {
            query,
            options,
            session_id: None,
        })
    }

    /// Attach a session token for multi-turn continuity.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Trait for retrieve-and-generate providers.
///
/// There is exactly one operation: send the request, return the service's
/// structured response unmodified. Implementations must not retry and must
/// surface every failure as a `Retrieval` error.
#[async_trait::async_trait]
pub trait RetrievalClient: Send + Sync {
    /// Provider name for logging (e.g., "bedrock-agent-runtime").
    fn provider_name(&self) -> &str;

    /// Perform one retrieve-and-generate call.
    async fn retrieve_and_generate(
        &self,
        request: &QueryRequest,
    ) -> AppResult<RetrieveAndGenerateResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_rejected() {
        let result = QueryRequest::new("", QueryOptions::default());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_whitespace_query_is_rejected() {
        let result = QueryRequest::new("   \n\t", QueryOptions::default());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = QueryOptions::default().with_max_results(0);
        let result = QueryRequest::new("valid question", options);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_valid_request_starts_without_session() {
        let request = QueryRequest::new("valid question", QueryOptions::default()).unwrap();
        assert!(request.session_id.is_none());
    }

    #[test]
    fn test_with_session() {
        let request = QueryRequest::new("valid question", QueryOptions::default())
            .unwrap()
            .with_session("session-1");
        assert_eq!(request.session_id.as_deref(), Some("session-1"));
    }
}
