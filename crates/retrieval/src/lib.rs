//! Retrieval adapter for kbchat.
//!
//! This crate is the single point of contact with the managed
//! knowledge-base retrieve-and-generate service. It owns:
//! - per-request parameters and their validation (`QueryOptions`)
//! - the byte-exact wire format of the service (`wire`)
//! - the client abstraction (`RetrievalClient`) and its production
//!   implementation (`BedrockAgentClient`)
//! - the response extractor (`extract_display_text`)
//!
//! No retrieval, ranking, or generation happens here; the service does all
//! of that. One request in, one unmodified structured response out.
//!
//! # Example
//! ```no_run
//! use kbchat_retrieval::{BedrockAgentClient, QueryOptions, QueryRequest, RetrievalClient};
//!
//! # async fn example() -> kbchat_core::AppResult<()> {
//! let client = BedrockAgentClient::new(
//!     "https://bedrock-agent-runtime.us-west-2.amazonaws.com",
//!     "us-west-2",
//!     "KB123456",
//!     None,
//! )?;
//! let request = QueryRequest::new("What did storage cost last month?", QueryOptions::default())?;
//! let response = client.retrieve_and_generate(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod extract;
pub mod options;
pub mod providers;
pub mod wire;

// Re-export main types
pub use client::{QueryRequest, RetrievalClient};
pub use extract::extract_display_text;
pub use options::{QueryOptions, SearchType, MODEL_CHOICES, TOKEN_LIMIT_CHOICES};
pub use providers::BedrockAgentClient;
pub use wire::RetrieveAndGenerateResponse;
