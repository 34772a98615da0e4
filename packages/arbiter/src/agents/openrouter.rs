//! OpenRouter-backed agent.
//!
//! Speaks the chat-completions protocol: one system message fixing the
//! assistant's role, one user message carrying the position, and the reply's
//! first choice taken as the agent's raw text. Blank replies are returned as
//! `Ok("")` so they fall through to the orchestrator's no-move handling
//! rather than surfacing as a transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AgentError, MoveAgent, MoveRequest};

/// Public chat-completions endpoint.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Deadline for a single completion request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You are an AI playing chess. Respond with a valid chess move in \
     Standard Algebraic Notation (SAN) followed by a brief commentary, analysis, or trash talk.";

/// Agent that asks an OpenRouter-hosted model for its move.
pub struct OpenRouterAgent {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OpenRouterAgent {
    /// Agent pointing at the public OpenRouter endpoint.
    pub fn new() -> Result<OpenRouterAgent, AgentError> {
        Self::with_endpoint(OPENROUTER_API_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Agent with an overridden endpoint and timeout. Tests and self-hosted
    /// gateways point this at their own URL.
    pub fn with_endpoint(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<OpenRouterAgent, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(OpenRouterAgent {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::Timeout(self.timeout)
        } else {
            AgentError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl MoveAgent for OpenRouterAgent {
    fn name(&self) -> &'static str {
        "OpenRouterAgent"
    }

    fn requires_credential(&self) -> bool {
        true
    }

    async fn request_move(&self, request: &MoveRequest) -> Result<String, AgentError> {
        let credential = request
            .credential
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AgentError::MissingCredential)?;

        let prompt = build_user_prompt(request);
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        debug!(model = %request.model, side = %request.side_to_move, "requesting chat completion");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(chars = content.len(), "received chat completion");
        Ok(content)
    }
}

/// The user message for a position. Wording is part of the agent contract;
/// models have been observed to answer it reliably.
fn build_user_prompt(request: &MoveRequest) -> String {
    let mut prompt = format!(
        "You are playing chess as {}. Current board position in FEN: {}.",
        request.side_to_move.label(),
        request.fen
    );
    if let Some(last) = &request.last_move_san {
        prompt.push_str(&format!(" Your opponent's last move was: {last}."));
    }
    prompt.push_str(
        " What is your next legal chess move in SAN format (e.g., \"e4\", \"Nf3\", \"O-O\")? \
         Also provide a brief commentary about the current position or your strategic thinking.",
    );
    prompt
}

/// Map a non-2xx response to an error, preferring the provider's own
/// `error.message` over the bare status text.
fn error_for_status(status: StatusCode, body: &str) -> AgentError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AgentError::RateLimited;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|detail| detail.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    AgentError::Http {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: ChatReplyMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
