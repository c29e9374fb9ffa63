//! Chat session handling for kbchat.
//!
//! This crate owns the interaction shell's state and submission logic:
//! - `Conversation`: the explicit per-session conversation log, newest
//!   exchange first, plus the service session token.
//! - `submit`: one submission end to end — validate, call the adapter,
//!   extract, record. A failed submission leaves the conversation exactly
//!   as it was.

pub mod session;
pub mod shell;

pub use session::{Conversation, ConversationEntry, Speaker};
pub use shell::submit;
