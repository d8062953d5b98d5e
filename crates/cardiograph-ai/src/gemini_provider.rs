use crate::report_provider::{ReportProvider, ReportResult};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use cardiograph_core::ReportConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the Generative Language API
    pub api_key: String,
    /// Base URL (default: https://generativelanguage.googleapis.com/v1beta)
    pub api_base: String,
    /// Model to use (e.g., "gemini-2.0-flash")
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum retries for failed requests
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or_default(),
            api_base: GEMINI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl From<&ReportConfig> for GeminiConfig {
    fn from(config: &ReportConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_key: config.api_key.clone().unwrap_or(defaults.api_key),
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        }
    }
}

/// Report provider backed by the Gemini generateContent API.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> ReportResult<Self> {
        if config.api_key.is_empty() {
            return Err(anyhow!(
                "Gemini API key is required. Set GOOGLE_API_KEY environment variable."
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ReportResult<Self> {
        Self::new(GeminiConfig::default())
    }

    /// Send a generateContent request with retry logic
    async fn send_request(&self, prompt: &str) -> ReportResult<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_secs(2u64.pow(attempt - 1));
                tokio::time::sleep(delay).await;
            }

            match self.try_request(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        warn!(
                            "Gemini request failed (attempt {}/{}), retrying...",
                            attempt + 1,
                            self.config.max_retries + 1
                        );
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("All retry attempts failed")))
    }

    async fn try_request(&self, prompt: &str) -> ReportResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = parsed
            .candidates
            .into_iter()
            .flatten()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(anyhow!("Gemini returned an empty response"));
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl ReportProvider for GeminiProvider {
    async fn generate_report(&self, prompt: &str) -> ReportResult<String> {
        self.send_request(prompt).await
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}
