use uuid::Uuid;

/// Stable identity for a task, assigned at creation and never reused.
pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
}

impl TaskRecord {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            completed: false,
        }
    }
}
