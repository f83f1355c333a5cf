use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{GenerateRequest, GenerateResponse, Provider};

/// Client that wraps a provider with retry and backoff behavior.
#[derive(Clone)]
pub struct LlmClient {
    provider: Arc<dyn Provider>,
    max_retries: u32,
}

impl fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider.name())
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl LlmClient {
    pub fn new(provider: Arc<dyn Provider>, max_retries: u32) -> Self {
        Self {
            provider,
            // At least one attempt
            max_retries: max_retries.max(1),
        }
    }

    pub async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let mut last_err = None;

        for attempt in 0..self.max_retries {
            match self.provider.generate(req).await {
                Ok(resp) => return Ok(resp),
                Err(err) => {
                    let class = classify_error(&err);

                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        provider = self.provider.name(),
                        error = %err,
                        class,
                        "LLM call failed"
                    );

                    // Bad credentials or a malformed request won't heal on retry
                    if !is_retryable(class) {
                        return Err(err);
                    }

                    last_err = Some(err);

                    if attempt + 1 < self.max_retries {
                        let base = Duration::from_secs(1) * 2u32.pow(attempt);
                        let base = base.min(Duration::from_secs(10));
                        // 25% jitter to avoid thundering herd
                        let jitter_ms = fastrand::u64(0..=base.as_millis() as u64 / 4);
                        let delay = base + Duration::from_millis(jitter_ms);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("all retries exhausted")))
    }
}

fn is_retryable(class: &'static str) -> bool {
    !matches!(class, "auth_error" | "invalid_request")
}

fn classify_error(err: &anyhow::Error) -> &'static str {
    let msg = err.to_string().to_lowercase();
    if msg.contains("rate limit") || msg.contains("429") {
        "rate_limit"
    } else if msg.contains("timeout") || msg.contains("timed out") || msg.contains("deadline") {
        "timeout"
    } else if msg.contains("401")
        || msg.contains("403")
        || msg.contains("auth")
        || msg.contains("api key")
        || msg.contains("api_key")
    {
        "auth_error"
    } else if msg.contains("400") || msg.contains("422") || msg.contains("invalid") {
        "invalid_request"
    } else if msg.contains("500")
        || msg.contains("502")
        || msg.contains("503")
        || msg.contains("server")
    {
        "server_error"
    } else if msg.contains("connect")
        || msg.contains("dns")
        || msg.contains("network")
        || msg.contains("reset")
    {
        "network_error"
    } else {
        "unknown_error"
    }
}
