//! Natural-language task intake.
//!
//! `TaskParser` turns free text into [`ParsedTaskData`], preferring a
//! schema-constrained inference call and collapsing every possible failure
//! onto the deterministic local parser. The adapter boundary is infallible:
//! callers always get well-formed fields, never an error.

use chrono::Local;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::inference::InferenceClient;
use crate::model::Priority;
use crate::parser::{self, ParsedTaskData};

/// Generic breakdown returned when no inference capability is available.
const FALLBACK_STEPS: [&str; 4] = [
    "Analyze requirements",
    "Plan execution",
    "Execute task",
    "Review output",
];

/// Steps returned when an inference call for a breakdown fails midway.
const FAILED_BREAKDOWN_STEPS: [&str; 3] = ["Manual Step 1", "Manual Step 2", "Check Completion"];

/// Why a remote parse attempt was abandoned. Internal only; every variant
/// resolves to the local parser's output.
#[derive(Debug, Error)]
enum ParseFailure {
    #[error("inference call failed: {0}")]
    Inference(#[from] anyhow::Error),
    #[error("undecodable inference payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Loosely-typed mirror of the response schema. Absent fields pick up the
/// same defaults the local parser uses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteParsed {
    title: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteBreakdown {
    #[serde(default)]
    steps: Vec<String>,
}

/// Task intake front door: remote parse with guaranteed local fallback.
pub struct TaskParser {
    client: Option<Arc<dyn InferenceClient>>,
}

impl TaskParser {
    /// Parser with no inference capability; every parse is local.
    pub fn local_only() -> Self {
        Self { client: None }
    }

    pub fn new(client: Option<Arc<dyn InferenceClient>>) -> Self {
        Self { client }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Parse a raw task input. Never fails.
    pub async fn parse(&self, raw: &str) -> ParsedTaskData {
        let Some(client) = &self.client else {
            return parser::parse(raw);
        };
        match self.parse_remote(client.as_ref(), raw).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "remote parse failed, using local parser");
                parser::parse(raw)
            }
        }
    }

    async fn parse_remote(
        &self,
        client: &dyn InferenceClient,
        raw: &str,
    ) -> Result<ParsedTaskData, ParseFailure> {
        let schema = parse_response_schema();
        let prompt = format!(
            "Parse this task input into structured data. Current date is {}. Input: \"{}\"",
            Local::now().to_rfc3339(),
            raw
        );

        let text = client.infer(&prompt, &schema).await?;
        let remote: RemoteParsed = serde_json::from_str(&text)?;

        let priority = remote
            .priority
            .as_deref()
            .map(Priority::coerce)
            .unwrap_or(Priority::Medium);
        let category = match remote.category {
            Some(c) if !c.is_empty() => c,
            _ => "Other".to_string(),
        };

        Ok(ParsedTaskData {
            title: remote.title,
            priority,
            category,
            due_date: remote.due_date,
            notes: remote.notes.unwrap_or_default(),
        })
    }

    /// Break a task title into 3-5 short actionable steps.
    ///
    /// Falls back to a fixed generic list when no capability is configured,
    /// and to a minimal manual list when a call fails.
    pub async fn breakdown(&self, title: &str) -> Vec<String> {
        let Some(client) = &self.client else {
            return FALLBACK_STEPS.iter().map(|s| s.to_string()).collect();
        };

        let schema = breakdown_response_schema();
        let prompt = format!(
            "Break down the task \"{}\" into 3-5 simple, actionable sub-tasks. Keep them short.",
            title
        );

        let steps = match client.infer(&prompt, &schema).await {
            Ok(text) => serde_json::from_str::<RemoteBreakdown>(&text)
                .map(|b| b.steps)
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "breakdown call failed");
                return FAILED_BREAKDOWN_STEPS
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
            }
        };

        if steps.is_empty() {
            FAILED_BREAKDOWN_STEPS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            steps
        }
    }
}

/// Response schema for structured task parsing.
fn parse_response_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "The core task name without time/priority keywords."
            },
            "priority": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
            "category": {
                "type": "STRING",
                "description": "Short single-word category if implied, otherwise 'Other'."
            },
            "dueDate": {
                "type": "STRING",
                "description": "ISO 8601 date string if a time is mentioned, otherwise null."
            },
            "notes": {
                "type": "STRING",
                "description": "Additional context not part of the core title."
            }
        },
        "required": ["title", "priority", "category"]
    })
}

/// Response schema for the task breakdown call.
fn breakdown_response_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "steps": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3 to 5 concrete, actionable sub-steps."
            }
        }
    })
}
