use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::filter::{self, FilterMode};
use crate::i18n::{Catalog, Localizer};
use crate::store::TaskStore;
use crate::task::{TaskId, TaskRecord};

/// Tagged command structure the rendering layer feeds into the controller.
/// Every variant carries its full payload; there is no optional-field
/// sniffing on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Add { name: String },
    Delete { id: TaskId },
    Toggle { id: TaskId, completed: bool },
    Edit { id: TaskId, name: String },
    ClearCompleted,
    Filter { mode: FilterMode },
    Language { code: String },
    Load { path: PathBuf },
}

/// Read view the collaborator renders from.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub visible: Vec<&'a TaskRecord>,
    pub active_count: usize,
    pub filter: FilterMode,
    pub strings: Catalog,
}

type ChangeListener = Box<dyn FnMut()>;

/// Sole entry point the rendering collaborator calls. Each state-changing
/// operation runs mutate → persist → notify, synchronously and in that
/// order; the filter mode and language are ephemeral and skip the persist
/// step. The controller is handed to its collaborator explicitly; there is
/// no process-wide instance.
pub struct AppController {
    store: TaskStore,
    data_path: PathBuf,
    filter: FilterMode,
    language: String,
    localizer: Localizer,
    on_change: Option<ChangeListener>,
}

impl AppController {
    pub fn new(data_path: PathBuf, localizer: Localizer) -> Self {
        let language = localizer.default_code().to_string();
        Self {
            store: TaskStore::new(),
            data_path,
            filter: FilterMode::default(),
            language,
            localizer,
            on_change: None,
        }
    }

    /// Registers the collaborator's re-render signal. It fires after every
    /// operation, including rejected ones, and carries no payload beyond
    /// "state changed".
    pub fn set_change_listener(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    #[tracing::instrument(skip(self))]
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Add { name } => {
                self.add_task(&name);
            }
            Action::Delete { id } => {
                self.delete_task(id);
            }
            Action::Toggle { id, completed } => {
                self.toggle_task(id, completed);
            }
            Action::Edit { id, name } => {
                self.edit_task(id, &name);
            }
            Action::ClearCompleted => {
                self.clear_completed();
            }
            Action::Filter { mode } => self.set_filter(mode),
            Action::Language { code } => self.set_language(&code),
            Action::Load { path } => self.load_from_disk(&path),
        }
    }

    /// Appends a task. A whitespace-only name changes nothing and persists
    /// nothing, but the change listener still fires.
    pub fn add_task(&mut self, name: &str) -> Option<TaskId> {
        let added = self.store.add(name);
        match added {
            Some(id) => {
                info!(%id, "added task");
                self.persist();
            }
            None => debug!("add rejected; nothing to persist"),
        }
        self.notify();
        added
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let removed = self.store.remove(id);
        debug!(%id, removed, "delete task");
        self.persist();
        self.notify();
        removed
    }

    /// Persistence fires on every toggle; there is no debouncing.
    pub fn toggle_task(&mut self, id: TaskId, completed: bool) -> bool {
        let changed = self.store.set_completed(id, completed);
        debug!(%id, completed, changed, "toggle task");
        self.persist();
        self.notify();
        changed
    }

    pub fn edit_task(&mut self, id: TaskId, new_name: &str) -> bool {
        let renamed = self.store.rename(id, new_name);
        debug!(%id, renamed, "edit task");
        self.persist();
        self.notify();
        renamed
    }

    pub fn clear_completed(&mut self) -> usize {
        let removed = self.store.clear_completed();
        info!(removed, "cleared completed tasks");
        self.persist();
        self.notify();
        removed
    }

    /// The filter mode is ephemeral: no persist, notify only.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
        self.notify();
    }

    /// Unknown or empty codes resolve to the default language instead of
    /// erroring; the current language never ends up outside the known set.
    pub fn set_language(&mut self, code: &str) {
        let catalog = self.localizer.resolve(code);
        if catalog.code() != code {
            debug!(requested = %code, resolved = %catalog.code(), "language fallback");
        }
        self.language = catalog.code().to_string();
        self.notify();
    }

    /// Replaces the in-memory list with whatever `path` holds. Missing or
    /// malformed files land as an empty list; no error reaches the caller.
    pub fn load_from_disk(&mut self, path: &Path) {
        self.store = TaskStore::load(path);
        self.notify();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            visible: filter::visible_tasks(&self.store, self.filter),
            active_count: filter::active_count(&self.store),
            filter: self.filter,
            strings: self.localizer.resolve(&self.language),
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.persist(&self.data_path) {
            warn!(file = %self.data_path.display(), error = %err, "failed to persist tasks; keeping in-memory state");
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener();
        }
    }
}
