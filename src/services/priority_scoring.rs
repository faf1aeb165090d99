//! Priority scoring engine.
//!
//! Pure and deterministic: maps an impact/effort categorization, the
//! user-requested priority, and due-date proximity to an integer score
//! in [1, 5] plus a human-readable justification. The caller supplies
//! `today` so the function never reads the clock itself.

use chrono::NaiveDate;

use crate::domain::models::{Level, PriorityLevel, TaskCategorization};

/// Inputs that went into a score, kept for inspection and testing.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityFactors {
    pub impact: Level,
    pub effort: Level,
    pub user_priority: PriorityLevel,
    pub has_due_date: bool,
    pub days_until_due: Option<i64>,
    pub is_overdue: bool,
}

/// Result of a scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityScore {
    /// Integer score in [1, 5]
    pub score: i32,
    /// Justification string, also the persisted `ai_reasoning`
    pub reasoning: String,
    pub factors: PriorityFactors,
}

/// Base score from the impact/effort matrix.
///
/// Quick wins (High impact, Low effort) rank highest; anything where the
/// effort outweighs the impact bottoms out at 1.
fn base_score(impact: Level, effort: Level) -> f64 {
    match (impact, effort) {
        (Level::High, Level::Low) => 5.0,
        (Level::High, Level::Medium) => 4.0,
        (Level::Medium, Level::Low) => 3.0,
        (Level::High, Level::High) => 3.0,
        (Level::Medium, Level::Medium) => 2.0,
        (Level::Low, Level::Low) => 2.0,
        _ => 1.0,
    }
}

/// Calculate the priority score for a task.
///
/// A missing categorization means classification was unavailable and
/// defaults to Medium/Medium. The due-date boost is additive after the
/// user-priority multiplier, with at most one bracket applying, and the
/// running value is capped at 5 before the final round-and-clamp.
pub fn calculate_priority_score(
    categorization: Option<&TaskCategorization>,
    user_priority: PriorityLevel,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> PriorityScore {
    let TaskCategorization { impact, effort } =
        categorization.copied().unwrap_or_default();

    let days_until_due = due_date.map(|due| due.signed_duration_since(today).num_days());
    let is_overdue = days_until_due.is_some_and(|days| days < 0);

    let factors = PriorityFactors {
        impact,
        effort,
        user_priority,
        has_due_date: due_date.is_some(),
        days_until_due,
        is_overdue,
    };

    let mut adjusted = base_score(impact, effort) * user_priority.weight();

    if let Some(days) = days_until_due {
        if is_overdue {
            adjusted = (adjusted + 2.0).min(5.0);
        } else if days <= 1 {
            adjusted = (adjusted + 1.5).min(5.0);
        } else if days <= 3 {
            adjusted = (adjusted + 1.0).min(5.0);
        } else if days <= 7 {
            adjusted = (adjusted + 0.5).min(5.0);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let score = (adjusted.round() as i32).clamp(1, 5);

    let mut parts = vec![format!("Impact: {}, Effort: {}", impact.as_str(), effort.as_str())];
    if let Some(days) = days_until_due {
        if is_overdue {
            parts.push(format!("Overdue by {} days", days.abs()));
        } else {
            parts.push(format!("Due in {days} days"));
        }
    }
    let reasoning = format!("AI Analysis: {}. Priority Score: {score}/5", parts.join(", "));

    PriorityScore {
        score,
        reasoning,
        factors,
    }
}

/// Map a priority score to its label.
pub fn score_to_priority_level(score: i32) -> PriorityLevel {
    if score >= 5 {
        PriorityLevel::Urgent
    } else if score >= 4 {
        PriorityLevel::High
    } else if score >= 3 {
        PriorityLevel::Medium
    } else {
        PriorityLevel::Low
    }
}
