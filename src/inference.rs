//! Opaque inference capability.
//!
//! The intake pipeline only needs one thing from a model provider: hand it a
//! prompt plus a response schema, get back raw JSON text or an error. The
//! trait keeps the provider swappable and lets tests drive every failure
//! mode without a network.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::InferenceConfig;

/// Schema-constrained generative inference call.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Issue one inference call and return the raw JSON response text.
    async fn infer(&self, prompt: &str, response_schema: &Value) -> Result<String>;
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn infer(&self, prompt: &str, response_schema: &Value) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            },
        });

        debug!(model = %self.model, "sending inference request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("Failed to send inference request")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("Inference API error {}: {}", status, text);
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to decode inference response")?;

        let text = payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string);

        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => bail!("Empty inference response"),
        }
    }
}

pub mod mock {
    //! Scriptable in-memory client for tests.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Queued canned responses; each `infer` call pops the next one. An
    /// exhausted queue, or a queued `Err`, surfaces as a call failure.
    pub struct MockInferenceClient {
        responses: Mutex<VecDeque<Result<String, String>>>,
        calls: AtomicUsize,
    }

    impl MockInferenceClient {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }
        }

        /// Client that answers every call with the same JSON text.
        pub fn with_response(text: impl Into<String>) -> Self {
            let client = Self::new();
            client.push_ok(text);
            client
        }

        /// Client whose every call fails.
        pub fn failing(message: impl Into<String>) -> Self {
            let client = Self::new();
            client.push_err(message);
            client
        }

        pub fn push_ok(&self, text: impl Into<String>) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(text.into()));
        }

        pub fn push_err(&self, message: impl Into<String>) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(message.into()));
        }

        /// Number of `infer` calls received so far.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Default for MockInferenceClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl InferenceClient for MockInferenceClient {
        async fn infer(&self, _prompt: &str, _response_schema: &Value) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut queue = self.responses.lock().unwrap();
            match queue.pop_front() {
                Some(Ok(text)) => {
                    // A single queued response repeats forever so simple
                    // tests don't have to count calls.
                    if queue.is_empty() {
                        queue.push_back(Ok(text.clone()));
                    }
                    Ok(text)
                }
                Some(Err(message)) => {
                    if queue.is_empty() {
                        queue.push_back(Err(message.clone()));
                    }
                    bail!("{}", message)
                }
                None => bail!("MockInferenceClient: no more responses in queue"),
            }
        }
    }
}
