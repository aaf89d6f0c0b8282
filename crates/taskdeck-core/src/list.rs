use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::id::ListId;
use crate::trimmed;

/// A user-named grouping of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Identifier, immutable once created.
    pub id: ListId,
    /// Non-empty trimmed name.
    pub name: String,
}

/// Mutations accepted by the list reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Append a list.
    Add {
        /// List to append.
        list: TaskList,
    },
    /// Rename a list.
    Rename {
        /// Target list.
        id: ListId,
        /// New name (trimmed before use).
        name: String,
    },
    /// Remove a list. Task memberships are left untouched.
    Delete {
        /// Target list.
        id: ListId,
    },
}

/// Pure list reducer. Blank names, unknown ids and duplicate ids leave the state unchanged.
#[must_use]
pub fn reduce_lists(state: &[TaskList], action: &ListAction) -> Vec<TaskList> {
    match action {
        ListAction::Add { list } => {
            if list.name.trim().is_empty() || state.iter().any(|l| l.id == list.id) {
                return state.to_vec();
            }
            let mut next = state.to_vec();
            next.push(list.clone());
            next
        }
        ListAction::Rename { id, name } => {
            let Some(name) = trimmed(name) else {
                return state.to_vec();
            };
            state
                .iter()
                .cloned()
                .map(|mut l| {
                    if l.id == *id {
                        l.name.clone_from(&name);
                    }
                    l
                })
                .collect()
        }
        ListAction::Delete { id } => state.iter().filter(|l| l.id != *id).cloned().collect(),
    }
}

/// Authoritative list collection, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStore {
    lists: Vec<TaskList>,
}

impl ListStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing snapshot.
    #[must_use]
    pub const fn from_lists(lists: Vec<TaskList>) -> Self {
        Self { lists }
    }

    /// Current snapshot.
    #[must_use]
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// Look up a list by id.
    #[must_use]
    pub fn get(&self, id: &ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == *id)
    }

    /// Find a list by exact id or case-insensitive name.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&TaskList> {
        let key = key.trim();
        self.lists
            .iter()
            .find(|l| l.id == key)
            .or_else(|| self.lists.iter().find(|l| l.name.eq_ignore_ascii_case(key)))
    }

    /// Number of lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether the store holds no lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Run `action` through the reducer. Returns whether the snapshot changed.
    pub fn dispatch(&mut self, action: ListAction) -> bool {
        let next = reduce_lists(&self.lists, &action);
        let changed = next != self.lists;
        debug!(?action, changed, "list action dispatched");
        self.lists = next;
        changed
    }

    /// Create a list. Blank names are ignored and yield `None`.
    pub fn add_list(&mut self, name: &str) -> Option<ListId> {
        let name = trimmed(name)?;
        let list = TaskList {
            id: ListId::generate(),
            name,
        };
        let id = list.id.clone();
        self.dispatch(ListAction::Add { list });
        Some(id)
    }

    /// Rename a list. Blank names are ignored.
    pub fn update_list(&mut self, id: &ListId, name: &str) {
        self.dispatch(ListAction::Rename {
            id: id.clone(),
            name: name.to_owned(),
        });
    }

    /// Remove a list without touching task memberships.
    pub fn delete_list(&mut self, id: &ListId) {
        self.dispatch(ListAction::Delete { id: id.clone() });
    }
}
