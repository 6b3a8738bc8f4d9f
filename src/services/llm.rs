use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[async_trait]
pub trait LlmClient: Send + Sync + Debug {
    /// Sends one user message and returns the generated text.
    async fn chat(&self, user: &str) -> Result<String>;
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String, // "anthropic"
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Base URL of a running gateway. When set, the wizard optimizes through it.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
            api_key_env: default_api_key_env(),
            endpoint: None,
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}
fn default_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}
fn default_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_api_version() -> String {
    "2023-06-01".to_string()
}
fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

pub fn create_llm(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.provider.as_str() {
        "anthropic" => Ok(Box::new(AnthropicClient::new(config))),
        _ => Err(anyhow!("Unknown LLM provider: {}", config.provider)),
    }
}

// --- Anthropic ---
#[derive(Debug)]
pub struct AnthropicClient {
    base_url: String,
    model: String,
    max_tokens: u32,
    api_version: String,
    api_key_env: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_version: config.api_version.clone(),
            api_key_env: config.api_key_env.clone(),
            client: reqwest::Client::new(),
        }
    }

    // Read per call, never cached.
    fn api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .with_context(|| format!("{} is not set", self.api_key_env))?;
        if key.trim().is_empty() {
            return Err(anyhow!("{} is empty", self.api_key_env));
        }
        Ok(key)
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: String,
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn chat(&self, user: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let url = format!("{}/messages", self.base_url);

        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user,
            }],
        };

        debug!("POST {} (model {})", url, self.model);
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request_body)
            .send()
            .await
            .context("Failed to reach Anthropic API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Anthropic API error: {} {}", status, error_text));
        }

        let response_text = resp.text().await?;
        let result: AnthropicResponse = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                return Err(anyhow!(
                    "Failed to parse Anthropic response: {}. Body: {}",
                    e,
                    response_text
                ))
            }
        };

        result
            .content
            .into_iter()
            .next()
            .map(|segment| segment.text)
            .ok_or_else(|| anyhow!("Anthropic response contained no content segments"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        headers: Arc<Mutex<Option<HeaderMap>>>,
        body: Arc<Mutex<Option<Value>>>,
    }

    async fn spawn_upstream(status: StatusCode, reply: Value, captured: Captured) -> String {
        let app = Router::new().route(
            "/v1/messages",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                let reply = reply.clone();
                async move {
                    *captured.headers.lock().unwrap() = Some(headers);
                    *captured.body.lock().unwrap() = Some(body);
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn config_for(base_url: String, api_key_env: &str) -> LlmConfig {
        LlmConfig {
            base_url,
            api_key_env: api_key_env.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_chat_sends_messages_request() -> Result<()> {
        std::env::set_var("PROMPT_WIZARD_TEST_KEY_LLM_OK", "sk-test");
        let captured = Captured::default();
        let base_url = spawn_upstream(
            StatusCode::OK,
            json!({"content": [{"type": "text", "text": "Hello"}, {"type": "text", "text": "ignored"}]}),
            captured.clone(),
        )
        .await;

        let client = AnthropicClient::new(&config_for(base_url, "PROMPT_WIZARD_TEST_KEY_LLM_OK"));
        let text = client.chat("Write a poem").await?;
        assert_eq!(text, "Hello");

        let headers = captured.headers.lock().unwrap().clone().unwrap();
        assert_eq!(headers["x-api-key"], "sk-test");
        assert_eq!(headers["anthropic-version"], "2023-06-01");

        let body = captured.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "claude-3-sonnet-20240229");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Write a poem");
        Ok(())
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_text_field() {
        std::env::set_var("PROMPT_WIZARD_TEST_KEY_LLM_MALFORMED", "sk-test");
        let base_url = spawn_upstream(
            StatusCode::OK,
            json!({"content": [{"type": "tool_use"}]}),
            Captured::default(),
        )
        .await;

        let client =
            AnthropicClient::new(&config_for(base_url, "PROMPT_WIZARD_TEST_KEY_LLM_MALFORMED"));
        let err = client.chat("Write a poem").await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse Anthropic response"));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_content() {
        std::env::set_var("PROMPT_WIZARD_TEST_KEY_LLM_EMPTY", "sk-test");
        let base_url =
            spawn_upstream(StatusCode::OK, json!({"content": []}), Captured::default()).await;

        let client = AnthropicClient::new(&config_for(base_url, "PROMPT_WIZARD_TEST_KEY_LLM_EMPTY"));
        assert!(client.chat("Write a poem").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let captured = Captured::default();
        let base_url =
            spawn_upstream(StatusCode::OK, json!({"content": []}), captured.clone()).await;

        let client =
            AnthropicClient::new(&config_for(base_url, "PROMPT_WIZARD_TEST_KEY_NEVER_SET"));
        let err = client.chat("Write a poem").await.unwrap_err();

        assert!(err.to_string().contains("PROMPT_WIZARD_TEST_KEY_NEVER_SET"));
        assert!(captured.body.lock().unwrap().is_none());
    }

    #[test]
    fn test_unknown_provider() {
        let config = LlmConfig {
            provider: "gemini".to_string(),
            ..Default::default()
        };
        assert!(create_llm(&config).is_err());
    }
}
