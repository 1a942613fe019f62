//! rig-backed Gemini implementation of [`CompletionClient`].

use async_trait::async_trait;
use rig::agent::Agent;
use rig::client::CompletionClient as _;
use rig::completion::{Chat, Message};
use rig::providers::gemini;

use super::session::{CompletionClient, Turn};
use crate::errors::{is_error_reply, CompletionError};

/// Type alias for agents built from the Gemini provider.
pub type GeminiAgent = Agent<gemini::completion::CompletionModel>;

/// Build a Gemini agent with `preamble` sent as its system instruction.
pub fn build_persona_agent(
    client: &gemini::Client,
    model: &str,
    name: &str,
    preamble: &str,
) -> GeminiAgent {
    client.agent(model).name(name).preamble(preamble).build()
}

/// One persona's Gemini chat session.
pub struct GeminiSession {
    agent: GeminiAgent,
}

impl GeminiSession {
    pub fn new(agent: GeminiAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl CompletionClient for GeminiSession {
    async fn send(&self, prompt: &str, history: &[Turn]) -> Result<String, CompletionError> {
        self.agent
            .chat(prompt.to_string(), history_messages(history))
            .await
            .map_err(|e| CompletionError::from_provider_message(e.to_string()))
    }
}

/// Replay prior turns as chat history. Turns that failed are left out, so
/// the provider only sees exchanges that actually happened.
pub(crate) fn history_messages(turns: &[Turn]) -> Vec<Message> {
    turns
        .iter()
        .filter(|turn| !is_error_reply(&turn.response))
        .flat_map(|turn| {
            [
                Message::user(turn.prompt.clone()),
                Message::assistant(turn.response.clone()),
            ]
        })
        .collect()
}
