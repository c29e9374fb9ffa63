//! Provider implementations of [`RetrievalClient`](crate::RetrievalClient).

mod bedrock;

pub use bedrock::BedrockAgentClient;
