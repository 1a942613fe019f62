//! Persona-bound conversational agent.
//!
//! A `SessionAgent` owns one `CompletionClient` whose persona preamble was
//! bound at construction, plus the append-only transcript of its own turns.
//! `ask` never fails: a completion error comes back as inline text starting
//! with [`API_ERROR_MARKER`](crate::errors::API_ERROR_MARKER).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::CompletionError;

/// One prompt/response exchange in an agent's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub prompt: String,
    pub response: String,
}

/// External completion backend with a persona already bound to it.
///
/// `history` holds the caller's prior turns, oldest first; the persona
/// instruction is not part of it.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn send(&self, prompt: &str, history: &[Turn]) -> Result<String, CompletionError>;
}

/// A named persona with a private conversational session.
pub struct SessionAgent {
    name: String,
    instruction: String,
    client: Box<dyn CompletionClient>,
    transcript: Vec<Turn>,
    timeout: Option<Duration>,
}

impl SessionAgent {
    /// `instruction` must be the same preamble the client was built with.
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        client: Box<dyn CompletionClient>,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            client,
            transcript: Vec::new(),
            timeout: None,
        }
    }

    /// Bound each completion by `timeout`. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Turns so far, oldest first. Failed completions are recorded too.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Send `prompt` in this agent's session and return the newest answer.
    pub async fn ask(&mut self, prompt: &str) -> String {
        info!(agent = %self.name, "{} is thinking...", self.name);

        let response = match self.complete(prompt).await {
            Ok(text) => {
                debug!(agent = %self.name, chars = text.len(), "completion received");
                text
            }
            Err(e) => {
                warn!(agent = %self.name, error = %e, "completion failed, answering inline");
                e.inline()
            }
        };

        self.transcript.push(Turn {
            prompt: prompt.to_string(),
            response: response.clone(),
        });
        response
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let call = self.client.send(prompt, &self.transcript);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| CompletionError::Timeout(limit))?,
            None => call.await,
        }
    }
}

impl std::fmt::Debug for SessionAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAgent")
            .field("name", &self.name)
            .field("turns", &self.transcript.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::errors::is_error_reply;

    /// Echoes the prompt and records how much history it was handed.
    #[derive(Default)]
    struct EchoClient {
        history_lens: Arc<Mutex<Vec<usize>>>,
    }

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn send(&self, prompt: &str, history: &[Turn]) -> Result<String, CompletionError> {
            self.history_lens.lock().unwrap().push(history.len());
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn send(&self, _prompt: &str, _history: &[Turn]) -> Result<String, CompletionError> {
            Err(CompletionError::RateLimited("quota exceeded".into()))
        }
    }

    struct SlowClient;

    #[async_trait]
    impl CompletionClient for SlowClient {
        async fn send(&self, _prompt: &str, _history: &[Turn]) -> Result<String, CompletionError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("too late".into())
        }
    }

    #[tokio::test]
    async fn ask_appends_to_transcript() {
        let mut agent = SessionAgent::new(
            "Analyst",
            "You are a Legal Analyst.",
            Box::new(EchoClient::default()),
        );

        assert_eq!(agent.ask("first").await, "echo: first");
        assert_eq!(agent.ask("second").await, "echo: second");

        let turns = agent.transcript();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].prompt, "first");
        assert_eq!(turns[1].response, "echo: second");
    }

    #[tokio::test]
    async fn history_grows_between_calls() {
        let client = EchoClient::default();
        let lens = client.history_lens.clone();

        let mut agent = SessionAgent::new("Analyst", "persona", Box::new(client));
        agent.ask("a").await;
        agent.ask("b").await;
        agent.ask("c").await;

        assert_eq!(*lens.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn failure_is_returned_inline() {
        let mut agent = SessionAgent::new("Compliance", "persona", Box::new(FailingClient));
        let answer = agent.ask("audit").await;
        assert!(is_error_reply(&answer));
        assert!(answer.contains("quota exceeded"));
        assert_eq!(agent.transcript().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_returned_inline() {
        let mut agent = SessionAgent::new("Negotiator", "persona", Box::new(SlowClient))
            .with_timeout(Some(Duration::from_secs(5)));
        let answer = agent.ask("draft").await;
        assert!(is_error_reply(&answer));
        assert!(answer.contains("5s"));
    }
}
