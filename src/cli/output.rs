//! Terminal rendering for tasks: flat table, detail view, and the 3x3
//! impact/effort matrix.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;

use crate::domain::models::{Level, Task, TaskCategorization};

/// Render tasks as a flat table, newest first.
pub fn format_task_table(tasks: &[Task]) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["ID", "TITLE", "PRIORITY", "STATUS", "SCORE", "DUE"]
                .iter()
                .map(|h| Cell::new(h).set_alignment(CellAlignment::Left)),
        );

    for task in tasks {
        table.add_row(vec![
            short_id(task),
            task.title.clone(),
            task.priority.as_str().to_string(),
            task.status.as_str().to_string(),
            format!("{}/5", task.ai_priority_score),
            task.due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table.to_string()
}

/// Render one task with all fields.
pub fn format_task_detail(task: &Task) -> String {
    let mut lines = vec![
        format!("{}  {}", style("Task").bold(), task.id),
        format!("  Title:      {}", task.title),
        format!("  Priority:   {}", task.priority.as_str()),
        format!("  Status:     {}", task.status.as_str()),
        format!("  Score:      {}/5", task.ai_priority_score),
        format!("  Reasoning:  {}", task.ai_reasoning),
    ];
    if let Some(description) = &task.description {
        lines.insert(2, format!("  Details:    {description}"));
    }
    if let Some(due) = task.due_date {
        lines.push(format!("  Due:        {due}"));
    }
    lines.push(format!(
        "  Created:    {}",
        task.created_at.format("%Y-%m-%d %H:%M")
    ));
    lines.join("\n")
}

/// Quadrant label for an impact/effort cell.
fn cell_label(impact: Level, effort: Level) -> &'static str {
    match (impact, effort) {
        (Level::High, Level::Low) => "Do First",
        (Level::High, Level::Medium) => "Schedule",
        (Level::High, Level::High) => "Delegate",
        (Level::Medium, Level::Low) => "Quick Wins",
        (Level::Medium, Level::Medium) => "Consider",
        (Level::Medium, Level::High) => "Maybe Later",
        (Level::Low, Level::Low) => "Fill Time",
        (Level::Low, Level::Medium) => "Avoid",
        (Level::Low, Level::High) => "Don't Do",
    }
}

/// Render the 3x3 impact/effort matrix. Tasks are bucketed by the
/// categorization carried in their stored reasoning.
pub fn format_task_matrix(tasks: &[Task]) -> String {
    let impacts = [Level::High, Level::Medium, Level::Low];
    let efforts = [Level::Low, Level::Medium, Level::High];

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            std::iter::once(Cell::new(""))
                .chain(efforts.iter().map(|effort| {
                    Cell::new(format!("{} Effort", effort.as_str()))
                        .set_alignment(CellAlignment::Center)
                }))
                .collect::<Vec<_>>(),
        );

    for impact in impacts {
        let mut row = vec![Cell::new(format!("{} Impact", impact.as_str()))];
        for effort in efforts {
            let cell_tasks: Vec<&Task> = tasks
                .iter()
                .filter(|task| {
                    TaskCategorization::from_reasoning(&task.ai_reasoning)
                        == TaskCategorization::new(impact, effort)
                })
                .collect();

            let mut content = format!("{} ({})", cell_label(impact, effort), cell_tasks.len());
            for task in &cell_tasks {
                content.push_str(&format!("\n- {}", task.title));
            }
            row.push(Cell::new(content));
        }
        table.add_row(row);
    }

    table.to_string()
}

fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}

/// Count line shown above lists.
pub fn count_line(entity_name: &str, total: usize) -> String {
    format!(
        "{} {}:",
        style(total).bold(),
        if total == 1 {
            entity_name.to_string()
        } else {
            format!("{entity_name}s")
        }
    )
}
