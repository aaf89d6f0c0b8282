//! Domain types, reducers and the filter pipeline for taskdeck.

/// State holder combining tasks and lists.
pub mod board;
/// Task color palette.
pub mod color;
/// Filter pipeline and tab selector.
pub mod filter;
/// Identifier types.
pub mod id;
/// List model and reducer.
pub mod list;
/// Task model and reducer.
pub mod task;
/// Title search matcher.
pub mod text_matcher;

pub use board::{Board, BoardSnapshot};
pub use color::{ColorError, DEFAULT_TASK_COLOR, Palette, TaskColor};
pub use filter::{FilterCriteria, StatusFilter, TabFilter, filter_tasks, sort_incomplete_first};
pub use id::{IdError, ListId, TaskId};
pub use list::{ListAction, ListStore, TaskList, reduce_lists};
pub use task::{Task, TaskAction, TaskStore, reduce_tasks};
pub use text_matcher::TextMatcher;

/// Trim `value`, returning `None` when nothing is left.
pub(crate) fn trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
