use serde::{Deserialize, Serialize};

use crate::store::TaskStore;
use crate::task::TaskRecord;

/// Display filter for the task list. The mode is ephemeral UI state and is
/// never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Localization key of the tab label for this mode.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Pure projection of the store through a filter mode, order preserved.
pub fn visible_tasks(store: &TaskStore, mode: FilterMode) -> Vec<&TaskRecord> {
    store
        .tasks()
        .iter()
        .filter(|task| match mode {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        })
        .collect()
}

/// Count of not-completed tasks over the WHOLE store. The count ignores the
/// current filter mode: switching tabs changes visibility, never the count.
pub fn active_count(store: &TaskStore) -> usize {
    store.tasks().iter().filter(|task| !task.completed).count()
}
