//! Advisory chat side-channel.
//!
//! Independent of the main pipeline; reuses the same text provider. Provider
//! errors never reach the caller verbatim — the feature degrades to a fixed
//! apologetic message plus the step-based suggestions.

use serde::Serialize;
use tracing::warn;

use crate::llm_client::TextGenerator;
use crate::writing::models::ChatMessage;
use crate::writing::prompts::{build_chat_prompt, ChatContext};

/// Fallback reply used whenever the provider call fails.
const FALLBACK_MESSAGE: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again in a moment.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub suggestions: Vec<&'static str>,
}

/// Fixed follow-up prompts keyed by wizard step (1 = topic, 2 = instructions,
/// 3 = word count, 4 = reference files). Anything else gets the default set.
pub fn suggestions_for_step(step: u32) -> Vec<&'static str> {
    match step {
        1 => vec![
            "Help me choose a research topic",
            "What makes a good academic title?",
            "How specific should my topic be?",
        ],
        2 => vec![
            "What citation style should I use?",
            "How do I write clear instructions?",
            "What academic level should I specify?",
        ],
        3 => vec![
            "How many words for my paper type?",
            "What affects reading time?",
            "Tips for paper length planning",
        ],
        4 => vec![
            "What reference files help most?",
            "How to use uploaded documents?",
            "Best practices for sources",
        ],
        _ => vec![
            "Help with academic writing",
            "Citation and formatting tips",
            "Research strategies",
        ],
    }
}

/// Produces one assistant reply plus suggested follow-ups.
/// Never fails: provider errors are swallowed into the fallback reply.
pub async fn respond(
    generator: &dyn TextGenerator,
    message: &str,
    context: Option<&ChatContext>,
    history: &[ChatMessage],
) -> ChatReply {
    let step = context.and_then(|c| c.current_step).unwrap_or(1);
    let suggestions = suggestions_for_step(step);

    let prompt = build_chat_prompt(message, context, history);

    match generator.generate(&prompt).await {
        Ok(reply) => ChatReply {
            message: reply,
            suggestions,
        },
        Err(e) => {
            warn!("Chat provider call failed, serving fallback: {e}");
            ChatReply {
                message: FALLBACK_MESSAGE.to_string(),
                suggestions,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 500,
                message: "provider down".to_string(),
            })
        }
    }

    #[test]
    fn test_step_one_suggestions_are_the_fixed_topic_set() {
        assert_eq!(
            suggestions_for_step(1),
            vec![
                "Help me choose a research topic",
                "What makes a good academic title?",
                "How specific should my topic be?",
            ]
        );
    }

    #[test]
    fn test_each_step_has_exactly_three_suggestions() {
        for step in [1, 2, 3, 4, 9] {
            assert_eq!(suggestions_for_step(step).len(), 3);
        }
    }

    #[test]
    fn test_unknown_step_falls_back_to_default_set() {
        assert_eq!(suggestions_for_step(0), suggestions_for_step(99));
    }

    #[tokio::test]
    async fn test_reply_carries_provider_text_and_step_suggestions() {
        let ctx = ChatContext {
            current_step: Some(3),
            ..Default::default()
        };
        let reply = respond(
            &FixedGenerator("Aim for 1500 words."),
            "How long should it be?",
            Some(&ctx),
            &[],
        )
        .await;
        assert_eq!(reply.message, "Aim for 1500 words.");
        assert_eq!(reply.suggestions, suggestions_for_step(3));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_fallback() {
        // No history, no context: defaults to the step-1 suggestion set.
        let reply = respond(&FailingGenerator, "Help me start", None, &[]).await;
        assert_eq!(reply.message, FALLBACK_MESSAGE);
        assert_eq!(reply.suggestions, suggestions_for_step(1));
    }
}
