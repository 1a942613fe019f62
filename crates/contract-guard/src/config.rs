use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rig::providers::gemini;

use crate::errors::ConfigError;
use crate::presenter::PresenterKind;

/// Value shipped in the template; must be replaced before the tool runs.
pub const API_KEY_PLACEHOLDER: &str = "PASTE_YOUR_KEY_HERE";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_OUTPUT_PATH: &str = "Negotiation_Draft.txt";

const ENV_API_KEY: &str = "GOOGLE_API_KEY";
const ENV_MODEL: &str = "CONTRACT_GUARD_MODEL";
const ENV_BASE_URL: &str = "CONTRACT_GUARD_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "CONTRACT_GUARD_TIMEOUT_SECS";
const ENV_OUTPUT: &str = "CONTRACT_GUARD_OUTPUT";
const ENV_PRESENTER: &str = "CONTRACT_GUARD_PRESENTER";

/// Run configuration, resolved and validated once at startup.
#[derive(Clone)]
pub struct GuardConfig {
    pub api_key: String,
    /// Gemini model used by all three agents.
    pub model: String,
    pub base_url: String,
    /// Per-request completion timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Where the negotiation draft is written when violations are found.
    pub output_path: PathBuf,
    pub presenter: PresenterKind,
}

impl fmt::Debug for GuardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("output_path", &self.output_path)
            .field("presenter", &self.presenter)
            .finish()
    }
}

impl GuardConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY).unwrap_or_else(|| API_KEY_PLACEHOLDER.to_string());
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() || api_key == API_KEY_PLACEHOLDER {
            return Err(ConfigError::MissingCredential { var: ENV_API_KEY });
        }

        let request_timeout = match lookup(ENV_TIMEOUT_SECS) {
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: ENV_TIMEOUT_SECS,
                    reason: format!("{raw:?}: {e}"),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let presenter = match lookup(ENV_PRESENTER) {
            None => PresenterKind::Plain,
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                var: ENV_PRESENTER,
                reason,
            })?,
        };

        Ok(Self {
            api_key,
            model: lookup(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
            output_path: lookup(ENV_OUTPUT)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            presenter,
        })
    }

    /// Build the rig Gemini client shared by every agent of a run.
    pub fn build_client(&self) -> Result<gemini::Client> {
        gemini::Client::builder()
            .api_key(self.api_key.as_str())
            .base_url(&self.base_url)
            .build()
            .context("Failed to build Gemini client")
    }
}

/// Check whether the Gemini API answers a model listing with this key.
pub async fn check_endpoint(config: &GuardConfig) -> bool {
    let models_url = format!("{}/v1beta/models", config.base_url.trim_end_matches('/'));
    match reqwest::Client::new()
        .get(&models_url)
        .header("x-goog-api-key", &config.api_key)
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}
