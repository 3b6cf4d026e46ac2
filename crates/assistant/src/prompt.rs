//! Conversation turns and the outbound prompt shape.

use serde::{Deserialize, Serialize};

/// A history entry as the client sends it: free-form role plus text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Role tag the model understands. Anything the client sends that is not
/// literally `"user"` normalizes to `Model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }

    fn from_client_role(role: &str) -> Self {
        if role == "user" {
            TurnRole::User
        } else {
            TurnRole::Model
        }
    }
}

/// One normalized turn of the outbound conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTurn {
    pub role: TurnRole,
    pub text: String,
}

/// Ordered request payload for the model: history turns, the new message as
/// a final user turn, and the system instruction attached out-of-band.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub turns: Vec<PromptTurn>,
    pub system: String,
}

impl Prompt {
    pub fn build(message: &str, history: &[ChatTurn], system: &str) -> Self {
        let mut turns: Vec<PromptTurn> = history
            .iter()
            .map(|turn| PromptTurn {
                role: TurnRole::from_client_role(&turn.role),
                text: turn.content.clone(),
            })
            .collect();

        turns.push(PromptTurn {
            role: TurnRole::User,
            text: message.to_string(),
        });

        Self {
            turns,
            system: system.to_string(),
        }
    }
}
