//! Model client boundary and the provider's variable response shape.

use async_trait::async_trait;
use serde::Deserialize;

use agrovault_core::ServiceResult;

use crate::prompt::Prompt;

/// External conversational model. One operation: generate a reply from an
/// ordered list of role-tagged turns plus a system instruction.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> ServiceResult<ModelReply>;
}

/// Provider response, which arrives in one of two shapes: a top-level
/// convenience text field, or text nested under candidates/parts. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelReply {
    pub text: Option<String>,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl ModelReply {
    /// Convenience constructor for stubs and tests.
    pub fn direct(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A reply with text only in the first candidate's first part.
    pub fn nested(text: impl Into<String>) -> Self {
        Self {
            text: None,
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }

    /// Reply-text fallback chain: the top-level text field if non-empty,
    /// else the first candidate's first part's text if non-empty, else
    /// nothing. Absent or oddly shaped structure reads as `None`.
    pub fn extract_text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            if !text.is_empty() {
                return Some(text.clone());
            }
        }

        let part = self.candidates.first()?.content.as_ref()?.parts.first()?;
        match &part.text {
            Some(text) if !text.is_empty() => Some(text.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_text_wins() {
        let reply = ModelReply {
            text: Some("direct".to_string()),
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some("nested".to_string()),
                    }],
                }),
            }],
        };
        assert_eq!(reply.extract_text().as_deref(), Some("direct"));
    }

    #[test]
    fn empty_direct_text_falls_back_to_nested() {
        let mut reply = ModelReply::nested("from the candidate");
        reply.text = Some(String::new());
        assert_eq!(reply.extract_text().as_deref(), Some("from the candidate"));
    }

    #[test]
    fn no_usable_text_yields_none() {
        assert_eq!(ModelReply::default().extract_text(), None);

        // Candidate present but hollow at each level.
        let hollow = ModelReply {
            text: None,
            candidates: vec![Candidate { content: None }],
        };
        assert_eq!(hollow.extract_text(), None);

        let empty_parts = ModelReply {
            text: None,
            candidates: vec![Candidate {
                content: Some(CandidateContent { parts: vec![] }),
            }],
        };
        assert_eq!(empty_parts.extract_text(), None);

        let empty_text = ModelReply::nested("");
        assert_eq!(empty_text.extract_text(), None);
    }

    #[test]
    fn only_the_first_candidate_and_part_are_consulted() {
        let reply = ModelReply {
            text: None,
            candidates: vec![
                Candidate {
                    content: Some(CandidateContent {
                        parts: vec![
                            CandidatePart { text: None },
                            CandidatePart {
                                text: Some("second part".to_string()),
                            },
                        ],
                    }),
                },
                Candidate {
                    content: Some(CandidateContent {
                        parts: vec![CandidatePart {
                            text: Some("second candidate".to_string()),
                        }],
                    }),
                },
            ],
        };
        assert_eq!(reply.extract_text(), None);
    }

    #[test]
    fn decodes_provider_json() {
        let reply: ModelReply = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "hello back"}]}, "finishReason": "STOP"}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }))
        .unwrap();
        assert_eq!(reply.extract_text().as_deref(), Some("hello back"));
    }
}
