//! The conversational gateway: validate, build the prompt, call, extract.

use std::sync::Arc;

use agrovault_core::{ServiceError, ServiceResult};

use crate::model::ModelClient;
use crate::prompt::{ChatTurn, Prompt};

/// Fixed persona and scope instruction, attached out-of-band from the
/// conversation turns.
pub const SYSTEM_PROMPT: &str = "You are AgroVault AI Assistant, a helpful chatbot for a smart agricultural warehouse management platform. You help warehouse managers and consumers with:
- Inventory management and stock queries
- Sensor readings and environmental monitoring
- Logistics and shipment tracking
- Quality reports and crop storage best practices
- General agricultural storage knowledge
Keep responses concise and helpful. Use bullet points when listing multiple items.";

/// One request per invocation, no persisted state between calls.
#[derive(Clone)]
pub struct ChatGateway {
    client: Option<Arc<dyn ModelClient>>,
}

impl ChatGateway {
    pub fn new(client: Option<Arc<dyn ModelClient>>) -> Self {
        Self { client }
    }

    /// A gateway with no model client; every `converse` call reports
    /// `Unconfigured`.
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Relay a message (plus history) to the model and return the reply text.
    pub async fn converse(&self, message: &str, history: &[ChatTurn]) -> ServiceResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::validation("Message is required"));
        }

        let client = self.client.as_ref().ok_or_else(|| {
            ServiceError::unconfigured(
                "Model client is not configured. Set GOOGLE_API_KEY or GEMINI_API_KEY.",
            )
        })?;

        let prompt = Prompt::build(message, history, SYSTEM_PROMPT);
        tracing::debug!(turns = prompt.turns.len(), "relaying chat message to model");

        let reply = client.generate(&prompt).await?;

        reply
            .extract_text()
            .ok_or_else(|| ServiceError::empty_reply("No text response from model."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::model::ModelReply;

    /// Stub client returning a canned reply (or failure) and recording
    /// nothing; one request per test.
    struct StubModel {
        result: ServiceResult<ModelReply>,
    }

    #[async_trait]
    impl ModelClient for StubModel {
        async fn generate(&self, _prompt: &Prompt) -> ServiceResult<ModelReply> {
            self.result.clone()
        }
    }

    fn gateway_with(result: ServiceResult<ModelReply>) -> ChatGateway {
        ChatGateway::new(Some(Arc::new(StubModel { result })))
    }

    fn user_turn(content: &str) -> ChatTurn {
        ChatTurn {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_message_fails_validation() {
        let gw = gateway_with(Ok(ModelReply::direct("unused")));
        for message in ["", "   ", "\n\t"] {
            let err = gw.converse(message, &[]).await.unwrap_err();
            assert_eq!(err, ServiceError::validation("Message is required"));
        }
    }

    #[tokio::test]
    async fn missing_client_reports_unconfigured() {
        let gw = ChatGateway::unconfigured();
        let err = gw.converse("hello", &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unconfigured(_)));
    }

    #[tokio::test]
    async fn direct_text_reply_is_returned() {
        let gw = gateway_with(Ok(ModelReply::direct("hello back")));
        let reply = gw.converse("hello", &[user_turn("hi")]).await.unwrap();
        assert_eq!(reply, "hello back");
    }

    #[tokio::test]
    async fn nested_candidate_text_is_used_when_direct_is_empty() {
        let mut stub_reply = ModelReply::nested("from candidate");
        stub_reply.text = Some(String::new());

        let gw = gateway_with(Ok(stub_reply));
        let reply = gw.converse("hello", &[]).await.unwrap();
        assert_eq!(reply, "from candidate");
    }

    #[tokio::test]
    async fn reply_without_text_is_empty_reply() {
        let gw = gateway_with(Ok(ModelReply::default()));
        let err = gw.converse("hello", &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::EmptyReply(_)));
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let gw = gateway_with(Err(ServiceError::upstream("provider down")));
        let err = gw.converse("hello", &[]).await.unwrap_err();
        assert_eq!(err, ServiceError::upstream("provider down"));
    }
}
