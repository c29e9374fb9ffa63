//! Chat command handler.
//!
//! Interactive shell: reads one question per line, performs one blocking
//! exchange per submission, and re-renders the conversation log newest
//! exchange first. A failed call adds nothing to the transcript — the
//! diagnostic detail goes to the tracing log on stderr — and the loop
//! continues so the user can resubmit.

use clap::Args;
use kbchat_chat::{submit, Conversation};
use kbchat_core::{AppConfig, AppResult};
use kbchat_retrieval::BedrockAgentClient;
use std::io::{BufRead, Write};

use crate::commands::QueryParams;

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(flatten)]
    pub params: QueryParams,

    /// Session token to continue a previous multi-turn exchange
    #[arg(long)]
    pub session: Option<String>,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting interactive chat session");

        // Fail on missing KB_ID before the first prompt, not the first send.
        let client = BedrockAgentClient::from_config(config)?;

        let mut conversation = Conversation::new();
        if let Some(ref session) = self.session {
            conversation.set_session_id(session.clone());
        }

        println!("Ask a question ( /history, /clear, /quit ):");

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            write!(stdout, "> ")?;
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF ends the session
                break;
            }
            let input = line.trim();

            match input {
                "/quit" | "/exit" => break,
                "/history" => {
                    render_log(&conversation);
                    continue;
                }
                "/clear" => {
                    conversation.clear();
                    println!("(conversation cleared)");
                    continue;
                }
                "" => continue,
                _ => {}
            }

            let options = match self.params.to_options(config) {
                Ok(options) => options,
                Err(e) => {
                    tracing::error!("Invalid parameters: {}", e);
                    continue;
                }
            };

            // One blocking exchange; on failure the transcript is unchanged
            // and the error has already been logged.
            if submit(input, options, &mut conversation, &client)
                .await
                .is_ok()
            {
                render_log(&conversation);
            }
        }

        tracing::info!("Chat session ended after {} entries", conversation.len());
        Ok(())
    }
}

/// Render the full conversation log, newest exchange first.
fn render_log(conversation: &Conversation) {
    println!();
    for entry in conversation.entries() {
        println!("{}: {}", entry.speaker.label(), entry.text);
        println!();
    }
}
