use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::color::DEFAULT_TASK_COLOR;
use crate::id::{ListId, TaskId};
use crate::trimmed;

/// A unit of work with completion state, color tag and list memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, immutable once created.
    pub id: TaskId,
    /// Non-empty trimmed title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Hex color tag. An empty string means "no color".
    pub color: String,
    /// Lists the task belongs to, in insertion order and without duplicates.
    #[serde(default)]
    pub list_ids: Vec<ListId>,
    /// Creation timestamp in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    /// Build a fresh task. Returns `None` when the trimmed title is empty.
    #[must_use]
    pub fn new(
        title: &str,
        color: Option<&str>,
        list_id: Option<ListId>,
        created_at: OffsetDateTime,
    ) -> Option<Self> {
        let title = trimmed(title)?;
        Some(Self {
            id: TaskId::generate(),
            title,
            completed: false,
            color: color.unwrap_or(DEFAULT_TASK_COLOR).to_owned(),
            list_ids: list_id.into_iter().collect(),
            created_at,
        })
    }

    /// Whether the task is a member of `list_id`.
    #[must_use]
    pub fn in_list(&self, list_id: &ListId) -> bool {
        self.list_ids.contains(list_id)
    }
}

/// Mutations accepted by the task reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Prepend a fully built task.
    Add {
        /// Task to insert.
        task: Task,
    },
    /// Flip the completion flag.
    ToggleCompletion {
        /// Target task.
        task_id: TaskId,
    },
    /// Remove the task.
    Delete {
        /// Target task.
        task_id: TaskId,
    },
    /// Overwrite title and, when given, color.
    Update {
        /// Target task.
        task_id: TaskId,
        /// New title (trimmed before use).
        title: String,
        /// New color, if any.
        color: Option<String>,
    },
    /// Append a list membership.
    AddToList {
        /// Target task.
        task_id: TaskId,
        /// List to add.
        list_id: ListId,
    },
    /// Drop a list membership.
    RemoveFromList {
        /// Target task.
        task_id: TaskId,
        /// List to remove.
        list_id: ListId,
    },
    /// Drop a list membership from every task.
    RemoveListFromAll {
        /// List to remove.
        list_id: ListId,
    },
}

impl TaskAction {
    const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add_task",
            Self::ToggleCompletion { .. } => "toggle_task_completion",
            Self::Delete { .. } => "delete_task",
            Self::Update { .. } => "update_task",
            Self::AddToList { .. } => "add_task_to_list",
            Self::RemoveFromList { .. } => "remove_task_from_list",
            Self::RemoveListFromAll { .. } => "remove_list_from_all_tasks",
        }
    }
}

/// Pure task reducer: the same state and action always yield the same result.
///
/// Invalid input (blank titles, unknown ids, duplicate ids) returns an unchanged copy.
#[must_use]
pub fn reduce_tasks(state: &[Task], action: &TaskAction) -> Vec<Task> {
    match action {
        TaskAction::Add { task } => {
            if task.title.trim().is_empty() || state.iter().any(|t| t.id == task.id) {
                return state.to_vec();
            }
            let mut next = Vec::with_capacity(state.len() + 1);
            next.push(task.clone());
            next.extend_from_slice(state);
            next
        }
        TaskAction::ToggleCompletion { task_id } => map_task(state, task_id, |t| {
            t.completed = !t.completed;
        }),
        TaskAction::Delete { task_id } => state.iter().filter(|t| t.id != *task_id).cloned().collect(),
        TaskAction::Update {
            task_id,
            title,
            color,
        } => {
            let Some(title) = trimmed(title) else {
                return state.to_vec();
            };
            map_task(state, task_id, |t| {
                t.title.clone_from(&title);
                if let Some(color) = color {
                    t.color.clone_from(color);
                }
            })
        }
        TaskAction::AddToList { task_id, list_id } => map_task(state, task_id, |t| {
            if !t.in_list(list_id) {
                t.list_ids.push(list_id.clone());
            }
        }),
        TaskAction::RemoveFromList { task_id, list_id } => map_task(state, task_id, |t| {
            t.list_ids.retain(|id| id != list_id);
        }),
        TaskAction::RemoveListFromAll { list_id } => state
            .iter()
            .cloned()
            .map(|mut t| {
                t.list_ids.retain(|id| id != list_id);
                t
            })
            .collect(),
    }
}

fn map_task<F>(state: &[Task], task_id: &TaskId, mut f: F) -> Vec<Task>
where
    F: FnMut(&mut Task),
{
    state
        .iter()
        .cloned()
        .map(|mut t| {
            if t.id == *task_id {
                f(&mut t);
            }
            t
        })
        .collect()
}

/// Authoritative task collection, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing snapshot.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Current snapshot.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *task_id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run `action` through the reducer and replace the snapshot.
    /// Returns whether the snapshot changed.
    pub fn dispatch(&mut self, action: TaskAction) -> bool {
        let next = reduce_tasks(&self.tasks, &action);
        let changed = next != self.tasks;
        debug!(action = action.name(), changed, "task action dispatched");
        self.tasks = next;
        changed
    }

    /// Create a task and prepend it. Blank titles are ignored and yield `None`.
    pub fn add_task(
        &mut self,
        title: &str,
        color: Option<&str>,
        list_id: Option<ListId>,
    ) -> Option<TaskId> {
        let task = Task::new(title, color, list_id, OffsetDateTime::now_utc())?;
        let id = task.id.clone();
        self.dispatch(TaskAction::Add { task });
        Some(id)
    }

    /// Flip the completion flag of `task_id`.
    pub fn toggle_task_completion(&mut self, task_id: &TaskId) {
        self.dispatch(TaskAction::ToggleCompletion {
            task_id: task_id.clone(),
        });
    }

    /// Remove `task_id`.
    pub fn delete_task(&mut self, task_id: &TaskId) {
        self.dispatch(TaskAction::Delete {
            task_id: task_id.clone(),
        });
    }

    /// Overwrite the title (and color when given). Blank titles are ignored.
    pub fn update_task(&mut self, task_id: &TaskId, title: &str, color: Option<&str>) {
        self.dispatch(TaskAction::Update {
            task_id: task_id.clone(),
            title: title.to_owned(),
            color: color.map(str::to_owned),
        });
    }

    /// Add `list_id` to the task's memberships unless already present.
    pub fn add_task_to_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        self.dispatch(TaskAction::AddToList {
            task_id: task_id.clone(),
            list_id: list_id.clone(),
        });
    }

    /// Remove `list_id` from the task's memberships.
    pub fn remove_task_from_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        self.dispatch(TaskAction::RemoveFromList {
            task_id: task_id.clone(),
            list_id: list_id.clone(),
        });
    }

    /// Remove `list_id` from every task.
    pub fn remove_list_from_all_tasks(&mut self, list_id: &ListId) {
        self.dispatch(TaskAction::RemoveListFromAll {
            list_id: list_id.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str, completed: bool, lists: &[&str]) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.into(),
            completed,
            color: DEFAULT_TASK_COLOR.into(),
            list_ids: lists.iter().map(|l| ListId::from(*l)).collect(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn first(store: &TaskStore) -> &Task {
        store
            .tasks()
            .first()
            .unwrap_or_else(|| panic!("store must not be empty"))
    }

    #[test]
    fn add_task_prepends_with_defaults() {
        let mut store = TaskStore::new();
        store.add_task("Older", None, None);
        let id = store.add_task("  Buy milk ", None, None);

        let head = first(&store);
        assert_eq!(Some(&head.id), id.as_ref());
        assert_eq!(head.title, "Buy milk");
        assert!(!head.completed);
        assert!(head.list_ids.is_empty());
        assert_eq!(head.color, DEFAULT_TASK_COLOR);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_task_rejects_blank_titles() {
        let mut store = TaskStore::new();
        assert!(store.add_task("", None, None).is_none());
        assert!(store.add_task("   ", None, None).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn add_task_with_list_and_color() {
        let mut store = TaskStore::new();
        store.add_task("Pack", Some("#4682B4"), Some(ListId::from("list-trip")));
        let head = first(&store);
        assert_eq!(head.color, "#4682B4");
        assert_eq!(head.list_ids, vec![ListId::from("list-trip")]);
    }

    #[test]
    fn reducer_ignores_duplicate_ids() {
        let state = vec![task("1", "A", false, &[])];
        let next = reduce_tasks(
            &state,
            &TaskAction::Add {
                task: task("1", "B", false, &[]),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut store = TaskStore::from_tasks(vec![task("1", "A", false, &[])]);
        let id = TaskId::from("1");
        store.toggle_task_completion(&id);
        assert!(store.get(&id).is_some_and(|t| t.completed));
        store.toggle_task_completion(&id);
        assert!(store.get(&id).is_some_and(|t| !t.completed));
    }

    #[test]
    fn unknown_ids_are_noops() {
        let original = vec![task("1", "A", false, &["L1"])];
        let mut store = TaskStore::from_tasks(original.clone());
        let missing = TaskId::from("missing");
        assert!(!store.dispatch(TaskAction::ToggleCompletion {
            task_id: missing.clone()
        }));
        store.delete_task(&missing);
        store.update_task(&missing, "New", None);
        store.add_task_to_list(&missing, &ListId::from("L2"));
        store.remove_task_from_list(&missing, &ListId::from("L1"));
        assert_eq!(store.tasks(), original.as_slice());
    }

    #[test]
    fn delete_removes_only_target() {
        let mut store = TaskStore::from_tasks(vec![task("1", "A", false, &[]), task("2", "B", false, &[])]);
        store.delete_task(&TaskId::from("1"));
        assert_eq!(store.len(), 1);
        assert!(store.get(&TaskId::from("2")).is_some());
    }

    #[test]
    fn update_trims_and_keeps_title_on_blank() {
        let id = TaskId::from("1");
        let mut store = TaskStore::from_tasks(vec![task("1", "A", false, &[])]);
        store.update_task(&id, "   ", Some("#00BCD4"));
        assert!(store.get(&id).is_some_and(|t| t.title == "A" && t.color == DEFAULT_TASK_COLOR));

        store.update_task(&id, "  Renamed  ", None);
        assert!(store.get(&id).is_some_and(|t| t.title == "Renamed" && t.color == DEFAULT_TASK_COLOR));

        store.update_task(&id, "Recolored", Some("#00BCD4"));
        assert!(store.get(&id).is_some_and(|t| t.color == "#00BCD4"));
    }

    #[test]
    fn list_membership_is_idempotent_and_ordered() {
        let id = TaskId::from("1");
        let mut store = TaskStore::from_tasks(vec![task("1", "A", false, &[])]);
        store.add_task_to_list(&id, &ListId::from("L2"));
        store.add_task_to_list(&id, &ListId::from("L1"));
        store.add_task_to_list(&id, &ListId::from("L2"));
        let lists = store.get(&id).map(|t| t.list_ids.clone()).unwrap_or_default();
        assert_eq!(lists, vec![ListId::from("L2"), ListId::from("L1")]);

        store.remove_task_from_list(&id, &ListId::from("L2"));
        let lists = store.get(&id).map(|t| t.list_ids.clone()).unwrap_or_default();
        assert_eq!(lists, vec![ListId::from("L1")]);
    }

    #[test]
    fn remove_list_from_all_sweeps_everything() {
        let mut store = TaskStore::from_tasks(vec![
            task("1", "A", false, &["L1", "L2"]),
            task("2", "B", true, &["L1"]),
            task("3", "C", false, &[]),
        ]);
        store.remove_list_from_all_tasks(&ListId::from("L1"));
        assert!(store.tasks().iter().all(|t| !t.in_list(&ListId::from("L1"))));
        assert!(store.get(&TaskId::from("1")).is_some_and(|t| t.in_list(&ListId::from("L2"))));
    }

    #[test]
    fn task_serializes_camel_case() {
        let json = serde_json::to_value(task("1", "A", false, &["L1"]))
            .unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(json["listIds"][0], "L1");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }
}
