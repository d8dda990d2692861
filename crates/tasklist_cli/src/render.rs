use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::model::{Priority, Status, Task};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

fn row_for(task: &Task, editing: bool, palette: &Palette) -> TaskRow {
    let name = if editing {
        format!("{} (editing)", task.task)
    } else {
        task.task.clone()
    };

    let priority = match task.priority {
        Priority::High => palette.accentize("High"),
        other => other.to_string(),
    };

    let status = match task.status {
        Status::Complete => palette.mutedize("Complete"),
        Status::Incomplete => "Incomplete".to_string(),
    };

    TaskRow {
        key: task.key.to_string(),
        task: name,
        priority,
        deadline: task.deadline.clone(),
        status,
        timestamp: task.timestamp.clone(),
    }
}

/// Renders one page of the task table plus a page footer. `page` is 1-based
/// and clamped into range.
pub fn render_page(
    tasks: &[Task],
    editing_key: Option<u64>,
    palette: &Palette,
    page: usize,
    page_size: usize,
) -> String {
    let page_size = page_size.max(1);
    let page_count = tasks.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, page_count);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(tasks.len());

    let rows: Vec<TaskRow> = tasks[start..end]
        .iter()
        .map(|task| row_for(task, editing_key == Some(task.key), palette))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::ascii());

    format!(
        "{}\npage {} of {} ({} tasks)",
        table,
        page,
        page_count,
        tasks.len()
    )
}
