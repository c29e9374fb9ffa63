//! Wire format of the retrieve-and-generate service.
//!
//! Field names and nesting here must match the service contract exactly;
//! this is the one place in the codebase where byte-for-byte structure
//! matters. Serialization omits optional fields instead of sending nulls,
//! and deserialization tolerates unknown or absent fields — the response is
//! owned by the service and is passed through unmodified.

use serde::{Deserialize, Serialize};

// ── Request ──────────────────────────────────────────────────────────────

/// Top-level request body for `POST /retrieveAndGenerate`.
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveAndGenerateInput {
    /// The text to answer.
    pub input: InputText,

    #[serde(rename = "retrieveAndGenerateConfiguration")]
    pub configuration: RetrieveAndGenerateConfiguration,

    /// Session continuity token; omitted to start a fresh session.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputText {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrieveAndGenerateConfiguration {
    /// Always `"KNOWLEDGE_BASE"` for this client.
    #[serde(rename = "type")]
    pub configuration_type: String,

    #[serde(rename = "knowledgeBaseConfiguration")]
    pub knowledge_base_configuration: KnowledgeBaseConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeBaseConfiguration {
    #[serde(rename = "knowledgeBaseId")]
    pub knowledge_base_id: String,

    #[serde(rename = "modelArn")]
    pub model_arn: String,

    #[serde(rename = "generationConfiguration")]
    pub generation_configuration: GenerationConfiguration,

    #[serde(rename = "retrievalConfiguration")]
    pub retrieval_configuration: RetrievalConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfiguration {
    #[serde(rename = "inferenceConfig")]
    pub inference_config: InferenceConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceConfig {
    #[serde(rename = "textInferenceConfig")]
    pub text_inference_config: TextInferenceConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextInferenceConfig {
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,

    pub temperature: f32,

    #[serde(rename = "topP")]
    pub top_p: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrievalConfiguration {
    #[serde(rename = "vectorSearchConfiguration")]
    pub vector_search_configuration: VectorSearchConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct VectorSearchConfiguration {
    #[serde(rename = "numberOfResults")]
    pub number_of_results: u32,

    /// Search strategy hint; omitted when the service default is wanted.
    #[serde(rename = "overrideSearchType", skip_serializing_if = "Option::is_none")]
    pub override_search_type: Option<String>,
}

// ── Response ─────────────────────────────────────────────────────────────

/// Response body of the retrieve-and-generate operation.
///
/// Every field is optional on the way in: the extractor decides which
/// absences are errors and which are ordinary (no citations at all is a
/// normal answer, a reference without a locator is not).
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveAndGenerateResponse {
    #[serde(default)]
    pub output: Option<GeneratedOutput>,

    #[serde(default)]
    pub citations: Vec<Citation>,

    /// Session token to thread into the next request for multi-turn context.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedOutput {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Citation {
    #[serde(rename = "retrievedReferences", default)]
    pub retrieved_references: Vec<RetrievedReference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievedReference {
    #[serde(default)]
    pub location: Option<ReferenceLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceLocation {
    #[serde(rename = "type", default)]
    pub location_type: Option<String>,

    #[serde(rename = "s3Location", default)]
    pub s3_location: Option<S3Location>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Location {
    pub uri: String,
}
