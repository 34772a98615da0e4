//! Environment-backed configuration for the agent transport.

use std::env;
use std::time::Duration;

use crate::agents::{AgentError, OpenRouterAgent, DEFAULT_REQUEST_TIMEOUT, OPENROUTER_API_URL};

/// Variable holding the OpenRouter API key.
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
/// Variable overriding the chat-completions endpoint, for gateways and stubs.
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";

/// Transport settings for the OpenRouter agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for AgentSettings {
    fn default() -> Self {
        AgentSettings {
            base_url: OPENROUTER_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AgentSettings {
    /// Settings from the environment, falling back to defaults. A blank
    /// override variable counts as unset.
    pub fn from_env() -> AgentSettings {
        let mut settings = AgentSettings::default();
        if let Ok(url) = env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                settings.base_url = url.trim().to_string();
            }
        }
        settings
    }

    /// Build the provider agent these settings describe.
    pub fn build_agent(&self) -> Result<OpenRouterAgent, AgentError> {
        OpenRouterAgent::with_endpoint(self.base_url.clone(), self.request_timeout)
    }
}

/// API key from the environment, if set and non-blank.
pub fn api_key_from_env() -> Option<String> {
    env::var(ENV_API_KEY)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_or_blank_key_reads_as_none() {
        env::remove_var(ENV_API_KEY);
        assert_eq!(api_key_from_env(), None);

        env::set_var(ENV_API_KEY, "   ");
        assert_eq!(api_key_from_env(), None);

        env::remove_var(ENV_API_KEY);
    }

    #[test]
    #[serial]
    fn key_is_trimmed() {
        env::set_var(ENV_API_KEY, "  sk-or-123  ");
        assert_eq!(api_key_from_env(), Some("sk-or-123".to_string()));

        env::remove_var(ENV_API_KEY);
    }

    #[test]
    #[serial]
    fn base_url_override_applies() {
        env::remove_var(ENV_BASE_URL);
        assert_eq!(AgentSettings::from_env().base_url, OPENROUTER_API_URL);

        env::set_var(ENV_BASE_URL, "http://127.0.0.1:9999/v1/chat/completions");
        assert_eq!(
            AgentSettings::from_env().base_url,
            "http://127.0.0.1:9999/v1/chat/completions"
        );

        env::remove_var(ENV_BASE_URL);
    }
}
