//! `agrovault-assistant` — the conversational gateway.
//!
//! Translates a client message plus history into the external model's
//! request shape, invokes it once (no retry, no persisted state), and
//! extracts a reply string through a fixed fallback chain.

pub mod gateway;
pub mod gemini;
pub mod model;
pub mod prompt;

pub use gateway::{ChatGateway, SYSTEM_PROMPT};
pub use gemini::GeminiClient;
pub use model::{Candidate, ModelClient, ModelReply};
pub use prompt::{ChatTurn, Prompt, PromptTurn, TurnRole};
