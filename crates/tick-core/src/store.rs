use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::task::{TaskId, TaskRecord};

/// Wire shape of one task in the persisted JSON array. Field names and
/// array order are part of the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTask {
    pub task_name: String,
    pub completed: bool,
}

/// In-memory task list, insertion order preserved. Duplicate names are
/// allowed; identity lives in [`TaskId`], not the name.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<TaskRecord>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a new record. Whitespace-only names are rejected; accepted
    /// names are stored verbatim, surrounding whitespace included.
    pub fn add(&mut self, name: &str) -> Option<TaskId> {
        if name.trim().is_empty() {
            debug!("rejected empty task name");
            return None;
        }

        let task = TaskRecord::new(name.to_string());
        let id = task.id;
        self.tasks.push(task);
        Some(id)
    }

    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() < before
    }

    pub fn set_completed(&mut self, id: TaskId, value: bool) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = value;
                true
            }
            None => false,
        }
    }

    /// Whitespace-only names are rejected; the old name stays.
    pub fn rename(&mut self, id: TaskId, new_name: &str) -> bool {
        if new_name.trim().is_empty() {
            debug!("rejected empty rename");
            return false;
        }

        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        debug!(before, after = self.tasks.len(), "cleared completed tasks");
        removed
    }

    pub fn serialize(&self) -> Vec<PersistedTask> {
        self.tasks
            .iter()
            .map(|task| PersistedTask {
                task_name: task.name.clone(),
                completed: task.completed,
            })
            .collect()
    }

    /// Writes the store as a pretty-printed UTF-8 JSON array. The write goes
    /// through a temp file in the target directory and is renamed into
    /// place, so a failed write never clobbers the previous file and the
    /// handle is released on every exit path.
    #[tracing::instrument(skip(self, path))]
    pub fn persist(&self, path: &Path) -> anyhow::Result<()> {
        debug!(file = %path.display(), count = self.tasks.len(), "persisting tasks");

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut temp, &self.serialize())?;
        temp.flush()?;

        temp.persist(path)
            .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

        Ok(())
    }

    /// Reads the store back from `path`. A missing file means no saved
    /// state; an unreadable or malformed file is logged and treated the
    /// same. Neither case surfaces an error to the caller.
    #[tracing::instrument(skip(path))]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(file = %path.display(), "no saved tasks");
            return Self::new();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed reading saved tasks; starting empty");
                return Self::new();
            }
        };

        let rows: Vec<PersistedTask> = match serde_json::from_str(&raw) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "saved tasks are not valid JSON; starting empty");
                return Self::new();
            }
        };

        let tasks: Vec<TaskRecord> = rows
            .into_iter()
            .map(|row| {
                let mut task = TaskRecord::new(row.task_name);
                task.completed = row.completed;
                task
            })
            .collect();

        debug!(file = %path.display(), count = tasks.len(), "loaded tasks");
        Self { tasks }
    }
}
