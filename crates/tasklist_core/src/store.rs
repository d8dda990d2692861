use crate::error::AppError;
use crate::model::{Priority, Status, Task};
use crate::storage::json_store;
use std::path::{Path, PathBuf};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A single-field update applied to one row, independent of row-level
/// save/cancel. Enum values are typed here; free-form parsing belongs to
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPatch {
    Task(String),
    Priority(Priority),
    Deadline(String),
    Status(Status),
}

/// Owns the ordered task list, the slot path, and the edit lock. Every
/// mutation rewrites the slot wholesale; the in-memory list stays
/// authoritative if a write fails.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    editing: Option<u64>,
}

impl TaskStore {
    /// Rehydrates from the slot at `path`. Absent or unparsable content
    /// starts the session with an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = json_store::load_tasks(&path);
        Self {
            path,
            tasks,
            editing: None,
        }
    }

    /// Opens the store at the default slot location.
    pub fn open() -> Result<Self, AppError> {
        Ok(Self::load(json_store::store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn editing_key(&self) -> Option<u64> {
        self.editing
    }

    pub fn is_editing(&self, key: u64) -> bool {
        self.editing == Some(key)
    }

    pub fn get(&self, key: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.key == key)
    }

    /// Appends a new row and persists. Empty strings are accepted; keys are
    /// assigned as `len + 1`, so a key freed by a deletion can be handed out
    /// again within the same session. New rows always start `Incomplete`,
    /// whatever status the caller asked for.
    pub fn add_task(
        &mut self,
        task: &str,
        priority: Priority,
        deadline: &str,
        _status: Status,
    ) -> Result<Task, AppError> {
        let task = Task {
            key: self.tasks.len() as u64 + 1,
            task: task.to_string(),
            priority,
            deadline: deadline.to_string(),
            status: Status::Incomplete,
            timestamp: now_stamp()?,
        };

        self.tasks.push(task.clone());
        self.persist()?;

        Ok(task)
    }

    /// Puts the row with `key` into edit mode. Does nothing while another
    /// row is already being edited, or when `key` is not in the list.
    pub fn begin_edit(&mut self, key: u64) {
        if self.editing.is_some() {
            return;
        }

        if self.tasks.iter().any(|task| task.key == key) {
            self.editing = Some(key);
        }
    }

    /// Leaves edit mode for `key` without touching the record (cell values
    /// were already applied through `commit_cell`) and rewrites the slot.
    pub fn save_edit(&mut self, key: u64) -> Result<(), AppError> {
        if self.editing == Some(key) {
            self.editing = None;
        }

        self.persist()
    }

    /// Clears the edit lock. Cell commits already applied are not reverted;
    /// edit mode is a presentation signal, not a transaction.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Removes the row with `key` and persists the remainder, preserving
    /// the relative order of the other rows. A key absent from the list is
    /// a silent no-op. Deleting the row currently in edit mode releases the
    /// edit lock.
    pub fn delete_task(&mut self, key: u64) -> Result<Option<Task>, AppError> {
        let Some(index) = self.tasks.iter().position(|task| task.key == key) else {
            return Ok(None);
        };

        let removed = self.tasks.remove(index);
        if self.editing == Some(key) {
            self.editing = None;
        }
        self.persist()?;

        Ok(Some(removed))
    }

    /// Replaces exactly one field on the row with `key` and persists. All
    /// other fields and rows are untouched. A key absent from the list is a
    /// silent no-op.
    pub fn commit_cell(&mut self, key: u64, patch: CellPatch) -> Result<Option<Task>, AppError> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.key == key) else {
            return Ok(None);
        };

        match patch {
            CellPatch::Task(value) => task.task = value,
            CellPatch::Priority(value) => task.priority = value,
            CellPatch::Deadline(value) => task.deadline = value,
            CellPatch::Status(value) => task.status = value,
        }

        let updated = task.clone();
        self.persist()?;

        Ok(Some(updated))
    }

    /// Serializes the whole list to the slot, overwriting prior content.
    pub fn persist(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }
}

fn now_stamp() -> Result<String, AppError> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc()
        .to_offset(offset)
        .format(TIMESTAMP_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}
