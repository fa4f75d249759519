//! Chat backend clients.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible. The HTTP backend posts the user's message to the
//! companion service and decodes the instruction it answers with; the
//! offline backend answers from [`ScriptedReplies`].
//!
//! Either way [`ChatBackend::send`] always yields an instruction: failures
//! are logged and replaced by the fallback.

use eunoia_core::config::BackendConfig;
use eunoia_core::reply::{ReplyError, ReplySource, ScriptedReplies, decode_reply, resolve_reply};
use eunoia_types::Instruction;
use serde::Serialize;
use tracing::debug;

/// A chat backend that turns a user message into an instruction.
#[derive(Debug, Clone)]
pub enum ChatBackend {
    /// The companion service over HTTP.
    Http(HttpChatBackend),
    /// Canned keyword replies, no network.
    Offline(ScriptedReplies),
}

impl ChatBackend {
    /// Build the backend selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        if config.offline {
            Ok(Self::Offline(ScriptedReplies::new()))
        } else {
            Ok(Self::Http(HttpChatBackend::new(config)?))
        }
    }

    /// Send `message` and return the instruction to apply.
    ///
    /// Never fails: errors are logged and the fallback instruction is
    /// returned instead.
    pub async fn send(&self, message: &str) -> Instruction {
        let result = match self {
            Self::Http(backend) => backend.send(message).await,
            Self::Offline(scripted) => {
                let mut scripted = *scripted;
                scripted.reply(message)
            }
        };
        resolve_reply(result)
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            Self::Offline(_) => "offline",
        }
    }
}

/// Body of a chat request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    message: &'a str,
    user_id: &'a str,
}

/// Client for the companion chat endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    url: String,
    user_id: String,
}

impl HttpChatBackend {
    /// Create a client with the configured endpoint, user, and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            url: config.chat_url.clone(),
            user_id: config.user_id.clone(),
        })
    }

    /// Post `message` and decode the reply body.
    async fn send(&self, message: &str) -> Result<Instruction, ReplyError> {
        let body = ChatRequest {
            message,
            user_id: &self.user_id,
        };
        debug!(url = %self.url, "Sending chat message");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReplyError::Unavailable {
                message: format!("chat request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReplyError::Unavailable {
                message: format!("chat backend returned {status}"),
            });
        }

        let text = response.text().await.map_err(|e| ReplyError::Unavailable {
            message: format!("chat response read failed: {e}"),
        })?;
        decode_reply(&text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case() {
        let body = ChatRequest {
            message: "hello",
            user_id: "anonymous",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "hello", "userId": "anonymous" }));
    }

    #[test]
    fn offline_config_selects_scripted_replies() {
        let config = BackendConfig {
            offline: true,
            ..BackendConfig::default()
        };
        let backend = ChatBackend::from_config(&config).unwrap();
        assert_eq!(backend.name(), "offline");
    }

    #[tokio::test]
    async fn offline_backend_answers_without_network() {
        let backend = ChatBackend::Offline(ScriptedReplies::new());
        let instruction = backend.send("I'm happy today").await;
        assert_eq!(instruction.emotion, "HAPPY");
    }

    #[tokio::test]
    async fn unreachable_backend_falls_back() {
        let config = BackendConfig {
            chat_url: "http://127.0.0.1:9/api/chat/send".to_owned(),
            timeout_ms: 500,
            ..BackendConfig::default()
        };
        let backend = ChatBackend::from_config(&config).unwrap();
        let instruction = backend.send("hello").await;
        assert_eq!(instruction, Instruction::fallback());
    }
}
