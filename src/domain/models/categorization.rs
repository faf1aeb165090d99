//! Impact/effort categorization produced by the classifier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A High/Medium/Low level, used for both impact and effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Default for Level {
    fn default() -> Self {
        Self::Medium
    }
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Transient classification of a task: business impact and implementation
/// effort. Produced by the classifier gateway, consumed by the scoring
/// engine, never persisted structurally — only encoded into the stored
/// reasoning string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCategorization {
    pub impact: Level,
    pub effort: Level,
}

static IMPACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Impact: (High|Medium|Low)").expect("valid regex"));
static EFFORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Effort: (High|Medium|Low)").expect("valid regex"));

impl TaskCategorization {
    pub fn new(impact: Level, effort: Level) -> Self {
        Self { impact, effort }
    }

    /// The Medium/Medium fallback used whenever classification is
    /// unavailable or malformed.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Re-extract a categorization from a stored reasoning string.
    ///
    /// Used by the rescore path and the matrix view, which only have the
    /// persisted `ai_reasoning` text to work from. Missing or malformed
    /// levels default to Medium.
    pub fn from_reasoning(reasoning: &str) -> Self {
        let impact = IMPACT_RE
            .captures(reasoning)
            .and_then(|c| Level::from_str(&c[1]))
            .unwrap_or_default();
        let effort = EFFORT_RE
            .captures(reasoning)
            .and_then(|c| Level::from_str(&c[1]))
            .unwrap_or_default();
        Self { impact, effort }
    }
}
