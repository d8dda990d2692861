use clap::{Parser, Subcommand};
use tasklist_core::error::AppError;
use tasklist_core::model::{Priority, Status};
use tasklist_core::store::CellPatch;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task row
    ///
    /// Example: tasklist add "Buy milk" --priority High --deadline 2024-01-01
    Add {
        task: Option<String>,
        #[arg(long, default_value_t = Priority::Low)]
        priority: Priority,
        #[arg(long, default_value = "")]
        deadline: String,
        #[arg(long, default_value_t = Status::Incomplete)]
        status: Status,
    },
    /// Put a row into edit mode
    ///
    /// Example: tasklist edit 1
    Edit {
        key: u64,
    },
    /// Leave edit mode for a row, keeping its committed cells
    ///
    /// Example: tasklist save 1
    Save {
        key: u64,
    },
    /// Drop the edit lock without reverting anything
    Cancel,
    /// Delete a row
    ///
    /// Example: tasklist delete 1
    Delete {
        key: u64,
    },
    /// Write one cell of a row
    ///
    /// Example: tasklist set 1 status Complete
    /// Example: tasklist set 1 deadline 2024-06-30
    Set {
        key: u64,
        field: String,
        value: String,
    },
    /// Render the task table
    ///
    /// Example: tasklist list --page 2
    List {
        /// 1-based page number
        #[arg(long)]
        page: Option<usize>,
    },
}

/// Parse a `<field> <value>` pair into a typed cell patch. Field names are
/// the table's column names; enum values are checked here so the store only
/// ever sees legal ones.
pub fn parse_cell_patch(field: &str, value: &str) -> Result<CellPatch, AppError> {
    let name = field.trim().to_ascii_lowercase();
    match name.as_str() {
        "task" => Ok(CellPatch::Task(value.to_string())),
        "priority" => Ok(CellPatch::Priority(value.parse()?)),
        "deadline" => Ok(CellPatch::Deadline(value.to_string())),
        "status" => Ok(CellPatch::Status(value.parse()?)),
        other => Err(AppError::invalid_input(format!(
            "unknown field '{other}' (expected task, priority, deadline or status)"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverride {
    Theme(String),
    PageSize(usize),
}

/// Parse a raw `KEY=VALUE` override string.
pub fn parse_config_override(raw: &str) -> Result<ConfigOverride, AppError> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;

    let key = key_raw.trim().to_ascii_lowercase().replace('-', "_");
    let value = value_raw.trim();

    match key.as_str() {
        "theme" => Ok(ConfigOverride::Theme(value.to_string())),
        "page_size" | "pagesize" => {
            let size = value.parse::<usize>().map_err(|_| {
                AppError::invalid_input(format!("page_size must be a number (got '{value}')"))
            })?;
            Ok(ConfigOverride::PageSize(size))
        }
        other => Err(AppError::invalid_input(format!(
            "unknown config field '{other}'"
        ))),
    }
}
