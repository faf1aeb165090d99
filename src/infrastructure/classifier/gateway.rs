//! Classifier gateway: turns task titles into impact/effort
//! categorizations via the external classification provider.
//!
//! Classification is best-effort. Whatever goes wrong — network failure,
//! non-JSON output, wrong enum values, a short batch — the gateway logs a
//! warning and returns Medium/Medium instead of propagating an error.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::client::ClassifierClient;
use super::errors::ClassifierApiError;
use super::types::MessageRequest;
use crate::domain::models::{Level, TaskCategorization};
use crate::domain::ports::TaskClassifier;

const SYSTEM_PROMPT: &str = "You are an expert project manager and business analyst \
specializing in task prioritization. Analyze tasks based on their business impact and \
implementation effort to provide accurate categorization.";

const CATEGORY_DEFINITIONS: &str = r#"IMPACT refers to business value/urgency:
- High: Critical to business goals, has immediate consequences, or generates significant value
- Medium: Important but not critical, contributes to goals but with less urgency
- Low: Nice to have, minimal business impact, can be delayed

EFFORT refers to time/complexity:
- High: Takes days/weeks, requires significant resources, complex implementation
- Medium: Takes hours/days, moderate complexity, requires some planning
- Low: Takes minutes/hours, simple, straightforward to implement"#;

const SINGLE_MAX_TOKENS: u32 = 200;
const BATCH_MAX_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.3;

/// Raw wire shape of a single categorization.
#[derive(Debug, Deserialize)]
struct RawCategorization {
    impact: String,
    effort: String,
}

impl RawCategorization {
    /// Strict enum-membership check; anything else is a contract breach.
    fn validate(&self) -> Option<TaskCategorization> {
        Some(TaskCategorization::new(
            Level::from_str(&self.impact)?,
            Level::from_str(&self.effort)?,
        ))
    }
}

pub struct ClassifierGateway {
    client: ClassifierClient,
    model: String,
}

impl ClassifierGateway {
    pub fn new(client: ClassifierClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn single_prompt(title: &str) -> String {
        format!(
            r#"Analyze this task and categorize it based on business impact and effort required. Return JSON: {{"impact": "High|Medium|Low", "effort": "High|Medium|Low"}}.

{CATEGORY_DEFINITIONS}

Examples:
- "Fix critical production bug" -> {{"impact": "High", "effort": "Low"}}
- "Build new reporting dashboard" -> {{"impact": "Medium", "effort": "High"}}
- "Update button color" -> {{"impact": "Low", "effort": "Low"}}
- "Implement user authentication" -> {{"impact": "High", "effort": "High"}}

Task: "{title}"

Return only valid JSON with no additional text."#
        )
    }

    fn batch_prompt(titles: &[String]) -> String {
        let numbered = titles
            .iter()
            .enumerate()
            .map(|(index, title)| format!("{}. \"{title}\"", index + 1))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Analyze these tasks and categorize each one based on business impact and effort required. Return JSON array: [{{"impact": "High|Medium|Low", "effort": "High|Medium|Low"}}].

{CATEGORY_DEFINITIONS}

Tasks:
{numbered}

Return only valid JSON array with no additional text."#
        )
    }

    async fn try_classify(&self, title: &str) -> Result<TaskCategorization, ClassifierApiError> {
        let request = MessageRequest::user_message(
            &self.model,
            SYSTEM_PROMPT,
            Self::single_prompt(title),
            SINGLE_MAX_TOKENS,
        )
        .with_temperature(TEMPERATURE);

        let response = self.client.send_message(request).await?;
        let text = response.text().ok_or_else(|| {
            ClassifierApiError::MalformedResponse("empty response content".to_string())
        })?;

        let raw: RawCategorization = serde_json::from_str(text).map_err(|e| {
            ClassifierApiError::MalformedResponse(format!("invalid JSON: {e}"))
        })?;

        raw.validate().ok_or_else(|| {
            ClassifierApiError::MalformedResponse(format!(
                "invalid levels: impact={}, effort={}",
                raw.impact, raw.effort
            ))
        })
    }

    async fn try_classify_batch(
        &self,
        titles: &[String],
    ) -> Result<Vec<TaskCategorization>, ClassifierApiError> {
        let request = MessageRequest::user_message(
            &self.model,
            SYSTEM_PROMPT,
            Self::batch_prompt(titles),
            BATCH_MAX_TOKENS,
        )
        .with_temperature(TEMPERATURE);

        let response = self.client.send_message(request).await?;
        let text = response.text().ok_or_else(|| {
            ClassifierApiError::MalformedResponse("empty response content".to_string())
        })?;

        let raw: Vec<RawCategorization> = serde_json::from_str(text).map_err(|e| {
            ClassifierApiError::MalformedResponse(format!("invalid JSON array: {e}"))
        })?;

        if raw.len() != titles.len() {
            return Err(ClassifierApiError::MalformedResponse(format!(
                "expected {} categorizations, got {}",
                titles.len(),
                raw.len()
            )));
        }

        // Individually invalid items degrade to neutral; the batch as a
        // whole still counts as classified.
        Ok(raw
            .into_iter()
            .map(|item| item.validate().unwrap_or_default())
            .collect())
    }
}

#[async_trait]
impl TaskClassifier for ClassifierGateway {
    async fn classify(&self, title: &str) -> TaskCategorization {
        match self.try_classify(title).await {
            Ok(categorization) => categorization,
            Err(err) => {
                warn!(title, error = %err, "classification failed, using neutral fallback");
                TaskCategorization::neutral()
            }
        }
    }

    async fn classify_batch(&self, titles: &[String]) -> Vec<TaskCategorization> {
        if titles.is_empty() {
            return Vec::new();
        }

        match self.try_classify_batch(titles).await {
            Ok(categorizations) => categorizations,
            Err(err) => {
                warn!(
                    count = titles.len(),
                    error = %err,
                    "batch classification failed, using neutral fallback"
                );
                titles.iter().map(|_| TaskCategorization::neutral()).collect()
            }
        }
    }
}
