//! Bedrock Agent Runtime provider.
//!
//! Speaks the `retrieveAndGenerate` operation of the managed knowledge-base
//! service over HTTPS. One outbound call per request, bounded connect/read
//! timeouts, no retry layer: a failed call surfaces immediately rather than
//! silently retrying against a slow or misconfigured backend.

use kbchat_core::{AppError, AppResult};
use std::time::Duration;

use crate::client::{QueryRequest, RetrievalClient};
use crate::options::model_arn;
use crate::wire::{
    GenerationConfiguration, InferenceConfig, InputText, KnowledgeBaseConfiguration,
    RetrievalConfiguration, RetrieveAndGenerateConfiguration, RetrieveAndGenerateInput,
    RetrieveAndGenerateResponse, TextInferenceConfig, VectorSearchConfiguration,
};

/// Connect timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 120;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 120;

/// Production client for the retrieve-and-generate service.
pub struct BedrockAgentClient {
    /// Service endpoint, e.g. `https://bedrock-agent-runtime.us-west-2.amazonaws.com`
    endpoint: String,

    /// Region used in the foundation-model reference string
    region: String,

    /// Knowledge-base identifier embedded in every request
    kb_id: String,

    /// Optional bearer token for authentication
    api_token: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl BedrockAgentClient {
    /// Create a client against an explicit endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        region: impl Into<String>,
        kb_id: impl Into<String>,
        api_token: Option<String>,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            region: region.into(),
            kb_id: kb_id.into(),
            api_token,
            client,
        })
    }

    /// Create a client from the loaded application configuration.
    pub fn from_config(config: &kbchat_core::AppConfig) -> AppResult<Self> {
        let kb_id = config.require_kb_id()?.to_string();
        Self::new(
            config.service_endpoint(),
            config.region.clone(),
            kb_id,
            config.api_token.clone(),
        )
    }

    /// Build the wire request for a validated query request.
    fn to_wire_request(&self, request: &QueryRequest) -> RetrieveAndGenerateInput {
        let options = &request.options;

        RetrieveAndGenerateInput {
            input: InputText {
                text: request.query.clone(),
            },
            configuration: RetrieveAndGenerateConfiguration {
                configuration_type: "KNOWLEDGE_BASE".to_string(),
                knowledge_base_configuration: KnowledgeBaseConfiguration {
                    knowledge_base_id: self.kb_id.clone(),
                    model_arn: model_arn(&self.region, &options.model),
                    generation_configuration: GenerationConfiguration {
                        inference_config: InferenceConfig {
                            text_inference_config: TextInferenceConfig {
                                max_tokens: options.max_tokens,
                                temperature: options.temperature,
                                top_p: options.top_p,
                            },
                        },
                    },
                    retrieval_configuration: RetrievalConfiguration {
                        vector_search_configuration: VectorSearchConfiguration {
                            number_of_results: options.max_results,
                            override_search_type: options
                                .search_type
                                .override_value()
                                .map(str::to_string),
                        },
                    },
                },
            },
            session_id: request.session_id.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RetrievalClient for BedrockAgentClient {
    fn provider_name(&self) -> &str {
        "bedrock-agent-runtime"
    }

    async fn retrieve_and_generate(
        &self,
        request: &QueryRequest,
    ) -> AppResult<RetrieveAndGenerateResponse> {
        tracing::info!("Sending retrieve-and-generate request");
        tracing::debug!(
            model = %request.options.model,
            max_results = request.options.max_results,
            session = request.session_id.is_some(),
            "Request parameters"
        );

        let wire_request = self.to_wire_request(request);
        let url = format!("{}/retrieveAndGenerate", self.endpoint);

        let mut builder = self.client.post(&url).json(&wire_request);
        if let Some(ref token) = self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to reach retrieval service: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Retrieval(format!(
                "Retrieval service error ({}): {}",
                status, error_text
            )));
        }

        let service_response: RetrieveAndGenerateResponse = response.json().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to decode service response: {}", e))
        })?;

        tracing::info!(
            citations = service_response.citations.len(),
            "Received retrieve-and-generate response"
        );

        Ok(service_response)
    }
}
