//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use greenloop_ai::{CompletionOptions, CompletionProvider, ProviderError};

/// Longest error body kept in a [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Provider speaking the `/chat/completions` protocol (OpenAI and compatible
/// gateways).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(base_url),
            api_key: api_key.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn first_content(response: ChatResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ProviderError::InvalidResponse("response has no message content".to_string()))
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &options.model,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout)
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(status = status.as_u16(), error = %e, "failed to read error response body");
                    String::new()
                }
            };
            if let Some((idx, _)) = body.char_indices().nth(MAX_ERROR_BODY) {
                body.truncate(idx);
            }
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        first_content(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            chat_endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(chat_endpoint("http://localhost:8080/v1"), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn first_content_reads_the_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"[{\"title\":\"x\"}]"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(response).unwrap(), r#"[{"title":"x"}]"#);
    }

    #[test]
    fn empty_choices_are_an_invalid_response() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_content(response),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn request_serializes_as_chat_completion() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            temperature: 0.5,
            max_tokens: 100,
            messages: [
                ChatMessage { role: "system", content: "s" },
                ChatMessage { role: "user", content: "u" },
            ],
        };
        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["model"], "gpt-4o-mini");
        assert_eq!(v["max_tokens"], 100);
        assert_eq!(v["messages"][1]["role"], "user");
    }

    /// Serve one canned HTTP response on an ephemeral port.
    async fn one_shot_server(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/v1")
    }

    #[tokio::test]
    async fn error_status_keeps_the_body() {
        let base = one_shot_server(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 10\r\nconnection: close\r\n\r\noverloaded",
        )
        .await;
        let provider = OpenAiCompatibleProvider::new(&base, "key", Duration::from_secs(5)).unwrap();

        let err = provider.complete("s", "u", &CompletionOptions::default()).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Status {
                status: 503,
                body: "overloaded".into()
            }
        );
    }

    #[tokio::test]
    async fn unreadable_error_body_still_reports_the_status() {
        // Declares more bytes than it sends, then closes.
        let base = one_shot_server(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\nconnection: close\r\n\r\npartial",
        )
        .await;
        let provider = OpenAiCompatibleProvider::new(&base, "key", Duration::from_secs(5)).unwrap();

        let err = provider.complete("s", "u", &CompletionOptions::default()).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Status {
                status: 500,
                body: String::new()
            }
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_provider_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let provider =
            OpenAiCompatibleProvider::new("http://127.0.0.1:9/v1", "key", Duration::from_secs(2)).unwrap();
        let err = provider
            .complete("s", "u", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Unavailable(_) | ProviderError::Timeout(_)
        ));
    }
}
