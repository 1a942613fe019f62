//! Agent construction for the three review personas.
//!
//! Every agent gets its own rig Gemini agent (and therefore its own session)
//! built from one shared client. Nothing is shared between sessions.

pub mod rig_session;
pub mod session;

use anyhow::Result;
use rig::providers::gemini;

use crate::config::GuardConfig;
use crate::pipeline::ReviewAgents;
use crate::prompts;
use rig_session::GeminiSession;
use session::SessionAgent;

pub use session::{CompletionClient, Turn};

/// Builds persona agents from a validated `GuardConfig`.
///
/// rig spawns a tool server per agent, so every `build_*` method must be
/// called inside a Tokio runtime.
pub struct AgentFactory {
    client: gemini::Client,
    config: GuardConfig,
}

impl AgentFactory {
    pub fn new(config: &GuardConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn build_session(&self, name: &str, preamble: &str) -> SessionAgent {
        let agent = rig_session::build_persona_agent(&self.client, &self.config.model, name, preamble);
        SessionAgent::new(name, preamble, Box::new(GeminiSession::new(agent)))
            .with_timeout(self.config.request_timeout)
    }

    /// Legal analyst: extracts clauses verbatim.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn build_analyst(&self) -> SessionAgent {
        self.build_session("Analyst", prompts::ANALYST_PREAMBLE)
    }

    /// Compliance officer auditing against `playbook`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn build_compliance(&self, playbook: &str) -> SessionAgent {
        self.build_session("Compliance", &prompts::compliance_preamble(playbook))
    }

    /// Negotiator: drafts redlines and the cover email.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn build_negotiator(&self) -> SessionAgent {
        self.build_session("Negotiator", prompts::NEGOTIATOR_PREAMBLE)
    }

    /// Fresh agents for one pipeline run.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn build_review_agents(&self, playbook: &str) -> ReviewAgents {
        ReviewAgents {
            analyst: self.build_analyst(),
            compliance: self.build_compliance(playbook),
            negotiator: self.build_negotiator(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GuardConfig {
        GuardConfig::from_lookup(|var| (var == "GOOGLE_API_KEY").then(|| "test-key".to_string()))
            .expect("config with key")
    }

    #[tokio::test]
    async fn factory_builds_named_personas() {
        let factory = AgentFactory::new(&test_config()).expect("factory");
        let agents = factory.build_review_agents(prompts::POLICY_PLAYBOOK);

        assert_eq!(agents.analyst.name(), "Analyst");
        assert_eq!(agents.compliance.name(), "Compliance");
        assert_eq!(agents.negotiator.name(), "Negotiator");

        assert_eq!(agents.analyst.instruction(), prompts::ANALYST_PREAMBLE);
        assert!(agents.compliance.instruction().contains(prompts::POLICY_PLAYBOOK));
        assert!(agents.negotiator.transcript().is_empty());
    }
}
