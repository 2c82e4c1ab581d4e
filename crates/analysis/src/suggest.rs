//! Next-task suggestion — context formatting and suggestion parsing.
//!
//! The existing task list is rendered into a Japanese context block, a
//! generation engine proposes the next task, and the proposal is split into
//! title and description. Priority for the proposal comes from
//! `priority::combined_priority` on the generated text.

use tasklens_core::task::TaskSummary;

/// Render the task list into the generation context.
///
/// Each task contributes its title, an optional 説明 (description) line, a
/// 状態 (status) line — 不明 when the status is absent — and an optional
/// 優先度 (priority) line. Empty strings count as absent, matching the
/// truthiness of the wire format this mirrors.
pub fn format_tasks_context(tasks: &[TaskSummary]) -> String {
    let mut context = String::from("現在のタスク一覧:\n");

    for task in tasks {
        let status_text = task.status.map(|s| s.label_ja()).unwrap_or("不明");

        context.push_str(&format!("- {}\n", task.title));
        if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
            context.push_str(&format!("  説明: {description}\n"));
        }
        context.push_str(&format!("  状態: {status_text}\n"));
        if let Some(priority) = task.priority.as_deref().filter(|p| !p.is_empty()) {
            context.push_str(&format!("  優先度: {priority}\n"));
        }
    }

    context.push_str("\n上記のタスクリストを考慮して、次に取り組むべきタスクを提案してください。");
    context
}

/// Split a generated suggestion: first line → title, remainder →
/// description, both trimmed.
pub fn split_suggestion(text: &str) -> (String, String) {
    let mut lines = text.split('\n');
    let title = lines.next().unwrap_or("").trim().to_string();
    let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    (title, description)
}
