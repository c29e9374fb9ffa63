//! Ask command handler.
//!
//! One question, one answer: a single retrieve-and-generate call with the
//! parameters from the command line.

use clap::Args;
use kbchat_chat::{submit, Conversation};
use kbchat_core::{AppConfig, AppError, AppResult};
use kbchat_retrieval::BedrockAgentClient;

use crate::commands::QueryParams;

/// Ask a single question and print the answer
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    #[command(flatten)]
    pub params: QueryParams,

    /// Session token to continue a previous multi-turn exchange
    #[arg(long)]
    pub session: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self
            .question
            .as_deref()
            .ok_or_else(|| AppError::Validation("No question provided".to_string()))?;

        let options = self.params.to_options(config)?;
        let client = BedrockAgentClient::from_config(config)?;

        let mut conversation = Conversation::new();
        if let Some(ref session) = self.session {
            conversation.set_session_id(session.clone());
        }

        let display_text = submit(question, options, &mut conversation, &client).await?;

        if self.json {
            let output = serde_json::json!({
                "answer": display_text,
                "model": self.params.model.as_deref().unwrap_or(&config.model),
                "searchType": self.params.search_type,
                "sessionId": conversation.session_id(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", display_text);
            if let Some(session_id) = conversation.session_id() {
                tracing::debug!("Session token for follow-ups: {}", session_id);
            }
        }

        Ok(())
    }
}
