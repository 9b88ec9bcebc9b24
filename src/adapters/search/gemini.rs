//! Gemini Search Provider - listing generation via Google's generative API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-3-flash-preview")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = GeminiSearchProvider::new(config)?;
//! ```
//!
//! The request carries a JSON response schema so the model answers with a
//! `{product, listings}` object. Only the schema's shape is trusted; the
//! domain validates every field afterwards.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::catalog::all_retailers;
use crate::domain::search::{RawSearchResponse, SearchError};
use crate::ports::SearchProvider;

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini-backed search provider.
pub struct GeminiSearchProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiSearchProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Unavailable` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn send_request(&self, body: &GenerateRequest) -> Result<Response, SearchError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::unavailable(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    SearchError::unavailable(format!("Connection failed: {}", e))
                } else {
                    SearchError::unavailable(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, SearchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(SearchError::unavailable(format!(
            "Status {}: {}",
            status, error_body
        )))
    }
}

#[async_trait]
impl SearchProvider for GeminiSearchProvider {
    async fn search(&self, query: &str) -> Result<RawSearchResponse, SearchError> {
        let body = GenerateRequest::for_query(query);
        tracing::debug!(model = %self.config.model, query = %query, "Requesting listings");

        let response = self.send_request(&body).await?;
        let response = self.handle_response_status(response).await?;
        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SearchError::malformed(format!("Failed to parse response: {}", e)))?;

        parse_generated(generated)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn for_query(query: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(query),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_prompt(query: &str) -> String {
    let names: Vec<&str> = all_retailers().iter().map(|r| r.name).collect();
    format!(
        "Generate realistic product information and pricing for these {} specific retailers: {}. \
         Target the specific item: \"{}\". Ensure varied pricing and delivery times across \
         fashion, tech, and home retailers.",
        names.len(),
        names.join(", "),
        query
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "product": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "image": { "type": "STRING" }
                },
                "required": ["name", "description", "image"]
            },
            "listings": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "storeName": { "type": "STRING" },
                        "price": { "type": "NUMBER" },
                        "shippingDays": { "type": "NUMBER" },
                        "shippingCost": { "type": "NUMBER" },
                        "rating": { "type": "NUMBER" },
                        "reviewCount": { "type": "NUMBER" },
                        "returnPolicy": { "type": "STRING" }
                    },
                    "required": ["storeName", "price", "shippingDays", "rating"]
                }
            }
        },
        "required": ["product", "listings"]
    })
}

fn parse_generated(generated: GenerateResponse) -> Result<RawSearchResponse, SearchError> {
    let text: String = generated
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .ok_or_else(|| SearchError::malformed("No candidates in response"))?;

    if text.trim().is_empty() {
        return Err(SearchError::malformed("Empty candidate text"));
    }

    serde_json::from_str(&text)
        .map_err(|e| SearchError::malformed(format!("Candidate is not a search response: {}", e)))
}
