//! Request and response types for the classification provider API.
//!
//! A trimmed subset of the messages wire format: the gateway only ever
//! sends text and reads back the first text block.

use serde::{Deserialize, Serialize};

/// Message request to send to the classification API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Model identifier
    pub model: String,

    /// Array of messages in the conversation
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Temperature for sampling (0.0-1.0, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl MessageRequest {
    /// Build a single-turn user request.
    pub fn user_message(
        model: impl Into<String>,
        system: impl Into<String>,
        prompt: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.into(),
            }],
            max_tokens,
            system: Some(system.into()),
            temperature: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: String,

    /// Text content of the message
    pub content: String,
}

/// Content block in a response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Response from the classification API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Unique message ID
    pub id: String,

    /// Array of content blocks in the response
    pub content: Vec<ContentBlock>,

    /// Model that generated the response
    pub model: String,

    /// Reason for stopping generation
    #[serde(default)]
    pub stop_reason: Option<String>,

    /// Token usage statistics
    pub usage: Usage,
}

impl MessageResponse {
    /// The trimmed text of the first text block, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.iter().map(|block| {
            let ContentBlock::Text { text } = block;
            text.trim()
        }).next()
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
