use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{NotifyError, Result};

const SEND_TIMEOUT: Duration = Duration::from_secs(20);
const PIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Serialize)]
struct PinChatMessage<'a> {
    chat_id: &'a str,
    message_id: i64,
    disable_notification: bool,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    result: Option<T>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Minimal Bot API client: one send and one pin.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// Post `text` as HTML without link previews. Returns the new message id.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<i64> {
        const METHOD: &str = "sendMessage";
        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let resp = self
            .http
            .post(self.endpoint(METHOD))
            .timeout(SEND_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| publish_error(METHOD, transport_reason(e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| publish_error(METHOD, transport_reason(e)))?;

        if !status.is_success() {
            error!(%status, body = %body, "Telegram sendMessage failed");
            let description = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|r| r.description);
            let reason = match description {
                Some(d) => format!("HTTP {status}: {d}"),
                None => format!("HTTP {status}"),
            };
            return Err(publish_error(METHOD, reason));
        }

        let parsed: ApiResponse<SentMessage> = serde_json::from_str(&body)
            .map_err(|e| publish_error(METHOD, format!("unexpected response body: {e}")))?;
        let sent = parsed
            .result
            .ok_or_else(|| publish_error(METHOD, "response has no result".to_string()))?;
        debug!(message_id = sent.message_id, "message sent");
        Ok(sent.message_id)
    }

    /// Pin silently. Callers decide whether a failure matters.
    pub async fn pin_message(&self, chat_id: &str, message_id: i64) -> Result<()> {
        const METHOD: &str = "pinChatMessage";
        let payload = PinChatMessage {
            chat_id,
            message_id,
            disable_notification: true,
        };

        let resp = self
            .http
            .post(self.endpoint(METHOD))
            .timeout(PIN_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| publish_error(METHOD, transport_reason(e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(publish_error(METHOD, format!("HTTP {status}")));
        }
        Ok(())
    }
}

fn publish_error(method: &'static str, reason: String) -> NotifyError {
    NotifyError::Publish { method, reason }
}

/// reqwest errors embed the request URL, and ours carries the bot token.
fn transport_reason(err: reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_decode() || err.is_body() {
        "could not read response"
    } else {
        "request failed"
    };
    format!("{kind}: {}", err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:abc";

    #[tokio::test]
    async fn send_returns_message_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(serde_json::json!({
                "chat_id": "@builds",
                "text": "<b>hi</b>",
                "parse_mode": "HTML",
                "disable_web_page_preview": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 42, "chat": {"id": -100}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TelegramClient::new(&server.uri(), TOKEN);
        let id = client.send_message("@builds", "<b>hi</b>").await.unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn send_rejection_carries_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let client = TelegramClient::new(&server.uri(), TOKEN);
        let err = client.send_message("@nowhere", "hi").await.unwrap_err();
        assert_matches!(
            err,
            NotifyError::Publish { method: "sendMessage", ref reason } if reason.contains("chat not found")
        );
    }

    #[tokio::test]
    async fn send_without_result_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = TelegramClient::new(&server.uri(), TOKEN);
        assert_matches!(
            client.send_message("@builds", "hi").await,
            Err(NotifyError::Publish { .. })
        );
    }

    #[tokio::test]
    async fn pin_sends_silent_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/pinChatMessage"))
            .and(body_json(serde_json::json!({
                "chat_id": "@builds",
                "message_id": 42,
                "disable_notification": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TelegramClient::new(&format!("{}/", server.uri()), TOKEN);
        client.pin_message("@builds", 42).await.unwrap();
    }

    #[tokio::test]
    async fn transport_errors_hide_token() {
        // Nothing listens on the discard port.
        let client = TelegramClient::new("http://127.0.0.1:9", TOKEN);
        let err = client.send_message("@builds", "hi").await.unwrap_err();
        assert!(!err.to_string().contains(TOKEN));
    }
}
