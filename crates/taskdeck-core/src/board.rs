use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterCriteria, filter_tasks};
use crate::id::{ListId, TaskId};
use crate::list::{ListStore, TaskList};
use crate::task::{Task, TaskStore};

/// Serializable copy of both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Tasks, newest first.
    pub tasks: Vec<Task>,
    /// Lists, in creation order.
    pub lists: Vec<TaskList>,
}

/// State holder owning the task and list collections.
///
/// Tasks reference lists by id only. Deleting a list through
/// [`Board::delete_list`] leaves stale ids on tasks; use
/// [`Board::delete_list_cascade`] to sweep them as well.
#[derive(Debug, Clone, Default)]
pub struct Board {
    tasks: TaskStore,
    lists: ListStore,
}

impl Board {
    /// Empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from a snapshot.
    ///
    /// Repeated task or list ids keep their first occurrence only.
    #[must_use]
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let mut task_ids = HashSet::new();
        let mut list_ids = HashSet::new();
        let tasks = snapshot
            .tasks
            .into_iter()
            .filter(|t| task_ids.insert(t.id.clone()))
            .collect();
        let lists = snapshot
            .lists
            .into_iter()
            .filter(|l| list_ids.insert(l.id.clone()))
            .collect();
        Self {
            tasks: TaskStore::from_tasks(tasks),
            lists: ListStore::from_lists(lists),
        }
    }

    /// Copy both collections.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.tasks.tasks().to_vec(),
            lists: self.lists.lists().to_vec(),
        }
    }

    /// Task collection.
    #[must_use]
    pub const fn task_store(&self) -> &TaskStore {
        &self.tasks
    }

    /// List collection.
    #[must_use]
    pub const fn list_store(&self) -> &ListStore {
        &self.lists
    }

    /// Current tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    /// Current lists, in creation order.
    #[must_use]
    pub fn lists(&self) -> &[TaskList] {
        self.lists.lists()
    }

    /// Run the filter pipeline over the current tasks.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Task> {
        filter_tasks(self.tasks.tasks(), criteria)
    }

    /// See [`TaskStore::add_task`].
    pub fn add_task(&mut self, title: &str, color: Option<&str>, list_id: Option<ListId>) -> Option<TaskId> {
        self.tasks.add_task(title, color, list_id)
    }

    /// See [`TaskStore::toggle_task_completion`].
    pub fn toggle_task_completion(&mut self, task_id: &TaskId) {
        self.tasks.toggle_task_completion(task_id);
    }

    /// See [`TaskStore::delete_task`].
    pub fn delete_task(&mut self, task_id: &TaskId) {
        self.tasks.delete_task(task_id);
    }

    /// See [`TaskStore::update_task`].
    pub fn update_task(&mut self, task_id: &TaskId, title: &str, color: Option<&str>) {
        self.tasks.update_task(task_id, title, color);
    }

    /// See [`TaskStore::add_task_to_list`].
    pub fn add_task_to_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        self.tasks.add_task_to_list(task_id, list_id);
    }

    /// See [`TaskStore::remove_task_from_list`].
    pub fn remove_task_from_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        self.tasks.remove_task_from_list(task_id, list_id);
    }

    /// See [`TaskStore::remove_list_from_all_tasks`].
    pub fn remove_list_from_all_tasks(&mut self, list_id: &ListId) {
        self.tasks.remove_list_from_all_tasks(list_id);
    }

    /// See [`ListStore::add_list`].
    pub fn add_list(&mut self, name: &str) -> Option<ListId> {
        self.lists.add_list(name)
    }

    /// See [`ListStore::update_list`].
    pub fn update_list(&mut self, id: &ListId, name: &str) {
        self.lists.update_list(id, name);
    }

    /// Remove the list only; task memberships are untouched.
    pub fn delete_list(&mut self, id: &ListId) {
        self.lists.delete_list(id);
    }

    /// Sweep `id` from every task, then remove the list.
    pub fn delete_list_cascade(&mut self, id: &ListId) {
        self.tasks.remove_list_from_all_tasks(id);
        self.lists.delete_list(id);
    }
}
