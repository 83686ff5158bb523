//! HTTP reflection providers: local Ollama and hosted Gemini

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::core::reflection::{
    build_prompt, parse_reflection, FallbackGenerator, ReflectionGenerator, ReflectionRequest,
};
use crate::error::GenerationError;
use crate::types::Reflection;

/// Shared client with the configured request timeout
pub fn http_client(timeout_secs: u64) -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| GenerationError::Transport(e.to_string()))
}

/// Enabled providers in fallback order (Ollama first)
pub fn build_generator(config: &GeneratorConfig) -> Result<FallbackGenerator, GenerationError> {
    let client = http_client(config.timeout_secs)?;
    let mut providers: Vec<Arc<dyn ReflectionGenerator>> = Vec::new();
    if config.ollama_enabled {
        providers.push(Arc::new(OllamaGenerator::new(
            client.clone(),
            &config.ollama_url,
            &config.ollama_model,
        )));
    }
    if config.gemini_enabled {
        let key = std::env::var(&config.gemini_api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        providers.push(Arc::new(GeminiGenerator::new(
            client,
            &config.gemini_url,
            &config.gemini_model,
            key,
            &config.gemini_api_key_env,
        )));
    }
    Ok(FallbackGenerator::new(providers))
}

/// Header carrying the Gemini API key; the key never goes into the URL
const GEMINI_KEY_HEADER: &str = "x-goog-api-key";

/// Transport errors drop the URL so request details never reach logs or clients
fn transport(e: reqwest::Error) -> GenerationError {
    GenerationError::Transport(e.without_url().to_string())
}

async fn send_json<B: Serialize + ?Sized>(
    request: reqwest::RequestBuilder,
    body: &B,
) -> Result<String, GenerationError> {
    let resp = request.json(body).send().await.map_err(transport)?;
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(GenerationError::Status {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}

// =============================================================================
// OLLAMA
// =============================================================================

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

/// Local model via `POST {base}/api/generate`, non-streaming
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ReflectionGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: &ReflectionRequest) -> Result<Reflection, GenerationError> {
        let prompt = build_prompt(request);
        let url = format!("{}/api/generate", self.base_url);
        debug!(model = self.model.as_str(), "calling ollama");

        let body = send_json(
            self.client.post(&url),
            &OllamaRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            },
        )
        .await?;
        let parsed: OllamaResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Malformed(e.to_string()))?;
        parse_reflection(&parsed.response)
    }
}

// =============================================================================
// GEMINI
// =============================================================================

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiTextPart>,
}

#[derive(Deserialize)]
struct GeminiTextPart {
    #[serde(default)]
    text: String,
}

/// Hosted model via `generateContent`. Needs an API key.
pub struct GeminiGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    key_env: String,
}

impl GeminiGenerator {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        key_env: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            key_env: key_env.to_string(),
        }
    }
}

#[async_trait]
impl ReflectionGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &ReflectionRequest) -> Result<Reflection, GenerationError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingCredential(self.key_env.clone()))?;
        let prompt = build_prompt(request);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(model = self.model.as_str(), "calling gemini");

        let body = send_json(
            self.client.post(&url).header(GEMINI_KEY_HEADER, key),
            &GeminiRequest {
                contents: vec![GeminiContent {
                    parts: vec![GeminiPart { text: &prompt }],
                }],
            },
        )
        .await?;
        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Malformed(e.to_string()))?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .ok_or_else(|| GenerationError::Malformed("no candidates in response".to_string()))?;
        parse_reflection(&text)
    }
}
