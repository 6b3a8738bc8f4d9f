use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::core::config::Config;
use crate::services::llm::{create_llm, LlmClient};
use crate::services::prompt::optimization_request;

pub const OPTIMIZE_FAILED_MESSAGE: &str = "Failed to optimize prompt";

/// Every optimization failure collapses into this one kind. The cause is kept
/// for logging only.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("Failed to optimize prompt")]
    Failed(#[source] anyhow::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[async_trait]
pub trait PromptOptimizer: Send + Sync + Debug {
    async fn optimize(&self, prompt: &str) -> Result<String, OptimizeError>;
}

/// Rewrites prompts by calling the completion API directly.
#[derive(Debug)]
pub struct Optimizer {
    llm: Box<dyn LlmClient>,
}

impl Optimizer {
    pub fn new(llm: Box<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PromptOptimizer for Optimizer {
    async fn optimize(&self, prompt: &str) -> Result<String, OptimizeError> {
        let request = optimization_request(prompt);
        match self.llm.chat(&request).await {
            Ok(text) => {
                info!(
                    "Prompt optimized ({} -> {} chars)",
                    prompt.chars().count(),
                    text.chars().count()
                );
                Ok(text)
            }
            Err(e) => {
                error!("Prompt optimization failed: {:#}", e);
                Err(OptimizeError::Failed(e))
            }
        }
    }
}

/// Rewrites prompts through a running gateway's `/api/optimize` endpoint.
#[derive(Debug)]
pub struct RemoteOptimizer {
    url: String,
    client: reqwest::Client,
}

impl RemoteOptimizer {
    pub fn new(endpoint: &str) -> Self {
        Self {
            url: format!("{}/api/optimize", endpoint.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    async fn request(&self, prompt: &str) -> anyhow::Result<String> {
        let resp = self
            .client
            .post(&self.url)
            .json(&OptimizeRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        if !resp.status().is_success() {
            return Err(anyhow!("Gateway returned {}", resp.status()));
        }

        let body: OptimizeResponse = resp.json().await.context("Malformed gateway response")?;
        Ok(body.optimized_prompt)
    }
}

#[async_trait]
impl PromptOptimizer for RemoteOptimizer {
    async fn optimize(&self, prompt: &str) -> Result<String, OptimizeError> {
        self.request(prompt).await.map_err(|e| {
            error!("Remote prompt optimization failed: {:#}", e);
            OptimizeError::Failed(e)
        })
    }
}

/// Picks the remote gateway when one is configured, the direct client otherwise.
pub fn create_optimizer(config: &Config) -> anyhow::Result<Box<dyn PromptOptimizer>> {
    match &config.llm.endpoint {
        Some(endpoint) => {
            info!("Optimizing through gateway at {}", endpoint);
            Ok(Box::new(RemoteOptimizer::new(endpoint)))
        }
        None => Ok(Box::new(Optimizer::new(create_llm(&config.llm)?))),
    }
}
