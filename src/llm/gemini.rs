use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{GenerateRequest, GenerateResponse, Provider};
use crate::config::environment::EnvironmentVariables;

/// Provider for the Gemini `generateContent` REST API.
pub struct GeminiProvider {
    client: reqwest::Client,
    env: Arc<EnvironmentVariables>,
}

impl GeminiProvider {
    pub fn new(env: Arc<EnvironmentVariables>) -> Self {
        Self {
            client: reqwest::Client::new(),
            env,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.env.gemini_base_url.trim_end_matches('/'),
            self.env.gemini_model
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "modelVersion", default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[async_trait::async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let api_key: &str = self.env.gemini_api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!("GEMINI_API_KEY environment variable not set")
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| anyhow::anyhow!("invalid API key header: {e}"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: req.prompt.clone(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<GeminiError>(&error_body) {
                return Err(anyhow::anyhow!(
                    "Gemini API error ({}): {}",
                    status,
                    err.error.message
                ));
            }
            return Err(anyhow::anyhow!(
                "Gemini API error ({}): {}",
                status,
                error_body
            ));
        }

        let resp: GeminiResponse = response.json().await?;

        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Gemini API returned no candidates"))?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(GenerateResponse {
            content,
            model: resp
                .model_version
                .unwrap_or_else(|| self.env.gemini_model.to_string()),
            finish_reason: candidate.finish_reason.unwrap_or_default(),
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
