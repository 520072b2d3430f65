//! LLM-backed scorer
//!
//! Supports the Gemini generateContent API, the Anthropic Messages
//! API, and any OpenAI-compatible chat-completions endpoint.

use super::EsgScorer;
use crate::config::LlmConfig;
use crate::error::{EsgError, Result};
use crate::types::{AnalysisResult, NewsImpact};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// LLM scorer over a single provider.
pub struct LlmScorer {
    http: Client,
    provider: LlmProvider,
}

#[derive(Debug, Clone)]
pub enum LlmProvider {
    Gemini {
        api_key: String,
        model: String,
    },
    Anthropic {
        api_key: String,
        model: String,
    },
    /// OpenAI-compatible API (OpenAI, DeepSeek, Ollama, vLLM, etc.)
    Compatible {
        api_key: Option<String>,
        model: String,
        base_url: String,
    },
}

// ============ Request/Response types ============

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl LlmScorer {
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            http: Client::new(),
            provider,
        }
    }

    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let provider = match config.provider.to_lowercase().as_str() {
            "gemini" | "google" => LlmProvider::Gemini {
                api_key: config.api_key.clone(),
                model: config
                    .model
                    .clone()
                    .unwrap_or_else(|| "gemini-3-flash-preview".to_string()),
            },
            "anthropic" | "claude" => LlmProvider::Anthropic {
                api_key: config.api_key.clone(),
                model: config
                    .model
                    .clone()
                    .unwrap_or_else(|| "claude-sonnet-4-20250514".to_string()),
            },
            "openai" | "gpt" => LlmProvider::Compatible {
                api_key: Some(config.api_key.clone()),
                model: config.model.clone().unwrap_or_else(|| "gpt-4o-mini".to_string()),
                base_url: config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| "https://api.openai.com".to_string()),
            },
            "deepseek" => LlmProvider::Compatible {
                api_key: Some(config.api_key.clone()),
                model: config
                    .model
                    .clone()
                    .unwrap_or_else(|| "deepseek-chat".to_string()),
                base_url: "https://api.deepseek.com".to_string(),
            },
            "compatible" | "custom" | "ollama" => LlmProvider::Compatible {
                api_key: if config.api_key.is_empty() {
                    None
                } else {
                    Some(config.api_key.clone())
                },
                model: config
                    .model
                    .clone()
                    .ok_or_else(|| EsgError::Config("model required for compatible provider".into()))?,
                base_url: config
                    .base_url
                    .clone()
                    .ok_or_else(|| EsgError::Config("base_url required for compatible provider".into()))?,
            },
            _ => {
                return Err(EsgError::Config(format!(
                    "Unknown LLM provider: {}",
                    config.provider
                )))
            }
        };

        Ok(Self::new(provider))
    }

    pub(super) fn build_report_prompt(text: &str) -> String {
        format!(
            r#"Analyze the following corporate ESG information/report and provide an evaluation.
Evaluate across Environmental, Social, and Governance dimensions.

You must provide:
1. A concise, high-level executive summary (2-3 sentences) suitable for a quick briefing.
2. A detailed analysis summary of the core ESG performance.
3. Specific scores (0-100) for E, S, and G.
4. A suggested overall rating (AAA, AA, A, BBB, BB, B, or CCC).
5. A list of risk warnings if applicable (an empty list if none).

Respond with ONLY a JSON object in this exact format:
{{"scores": {{"environmental": <0-100>, "social": <0-100>, "governance": <0-100>}}, "executiveSummary": "<2-3 sentence briefing>", "summary": "<detailed findings>", "suggestedRating": "<AAA|AA|A|BBB|BB|B|CCC>", "riskWarnings": ["<warning>"]}}

Text: {text}"#
        )
    }

    pub(super) fn build_news_prompt(title: &str, summary: &str) -> String {
        format!(
            r#"Analyze the sentiment and ESG impact of this news item.
Return the primary affected dimension (ENVIRONMENT, SOCIAL, or GOVERNANCE) and an impact score from -20 to +20, negative for damaging news.

Respond with ONLY a JSON object in this exact format:
{{"dimension": "<ENVIRONMENT|SOCIAL|GOVERNANCE>", "impact": <-20 to 20>}}

News Title: {title}
Summary: {summary}"#
        )
    }

    async fn call_gemini(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let resp = self
            .http
            .post(format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
            ))
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let text = resp.text().await?;
        tracing::debug!("Gemini raw response: {}", truncate_for_log(&text, 500));

        let response: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            EsgError::Scoring(format!(
                "Gemini response parse error: {} - response: {}",
                e,
                truncate_for_log(&text, 200)
            ))
        })?;

        response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| EsgError::Scoring("Empty response from Gemini".into()))
    }

    async fn call_anthropic(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: model.to_string(),
            max_tokens: 1024,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response: AnthropicResponse = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        response
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| EsgError::Scoring("Empty response from Anthropic".into()))
    }

    async fn call_compatible(
        &self,
        base_url: &str,
        api_key: Option<&str>,
        model: &str,
        prompt: &str,
    ) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            response_format: Some(ResponseFormat {
                r#type: "json_object".to_string(),
            }),
        };

        let mut req = self
            .http
            .post(format!("{base_url}/v1/chat/completions"))
            .header("content-type", "application/json");

        if let Some(key) = api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let resp = req.json(&request).send().await?;
        let text = resp.text().await?;
        tracing::debug!("LLM raw response: {}", truncate_for_log(&text, 500));

        let response: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            EsgError::Scoring(format!(
                "Chat response parse error: {} - response: {}",
                e,
                truncate_for_log(&text, 200)
            ))
        })?;

        response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| EsgError::Scoring("Empty response from LLM".into()))
    }

    async fn call_llm(&self, prompt: &str) -> Result<String> {
        match &self.provider {
            LlmProvider::Gemini { api_key, model } => {
                self.call_gemini(api_key, model, prompt).await
            }
            LlmProvider::Anthropic { api_key, model } => {
                self.call_anthropic(api_key, model, prompt).await
            }
            LlmProvider::Compatible {
                api_key,
                model,
                base_url,
            } => {
                self.call_compatible(base_url, api_key.as_deref(), model, prompt)
                    .await
            }
        }
    }
}

/// Truncate provider output for logs and error messages without
/// splitting a UTF-8 sequence. A localized error page must not panic
/// the parse path.
pub(super) fn truncate_for_log(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Extract the JSON object span from model output. Models sometimes
/// wrap the payload in prose or markdown fences.
pub(super) fn extract_json(response: &str) -> &str {
    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &response[start..=end],
        _ => response,
    }
}

pub(super) fn parse_analysis(response: &str) -> Result<AnalysisResult> {
    let result: AnalysisResult = serde_json::from_str(extract_json(response))?;
    result.validate()?;
    Ok(result)
}

pub(super) fn parse_news_impact(response: &str) -> Result<NewsImpact> {
    let impact: NewsImpact = serde_json::from_str(extract_json(response))?;
    impact.validate()?;
    Ok(impact)
}

#[async_trait]
impl EsgScorer for LlmScorer {
    async fn analyze_report(&self, text: &str) -> Result<AnalysisResult> {
        let prompt = Self::build_report_prompt(text);
        let response = self.call_llm(&prompt).await?;
        parse_analysis(&response)
    }

    async fn score_news_impact(&self, title: &str, summary: &str) -> Result<NewsImpact> {
        let prompt = Self::build_news_prompt(title, summary);
        let response = self.call_llm(&prompt).await?;
        parse_news_impact(&response)
    }

    fn name(&self) -> &str {
        match &self.provider {
            LlmProvider::Gemini { .. } => "Gemini",
            LlmProvider::Anthropic { .. } => "Claude",
            LlmProvider::Compatible { model, .. } => model,
        }
    }
}
