//! Filter pipeline deriving the visible task subset.
//!
//! Stages run in a fixed order: tab, search, color. Each stage keeps the
//! relative order of its input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ListId;
use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// Reserved status buckets of the tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl StatusFilter {
    /// Wire value of the bucket.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parse one of the reserved keywords.
    #[must_use]
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    const fn keeps(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Top-level view selector: a status bucket or a specific list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabFilter {
    /// One of the reserved status buckets.
    Status(StatusFilter),
    /// Tasks belonging to the given list.
    List(ListId),
}

impl Default for TabFilter {
    fn default() -> Self {
        Self::Status(StatusFilter::All)
    }
}

impl TabFilter {
    /// Interpret `value`: reserved keywords select a status bucket, anything else is a list id.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        StatusFilter::from_keyword(value).map_or_else(|| Self::List(ListId::from(value)), Self::Status)
    }

    /// Whether this tab is one of the status buckets.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    /// List id selected by this tab, if any.
    #[must_use]
    pub const fn list_id(&self) -> Option<&ListId> {
        match self {
            Self::List(id) => Some(id),
            Self::Status(_) => None,
        }
    }

    fn keeps(&self, task: &Task) -> bool {
        match self {
            Self::Status(status) => status.keeps(task),
            Self::List(id) => task.in_list(id),
        }
    }
}

impl fmt::Display for TabFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => f.write_str(status.as_str()),
            Self::List(id) => write!(f, "{id}"),
        }
    }
}

/// Criteria combined by [`filter_tasks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Tab selector.
    pub tab: TabFilter,
    /// Raw search text; trimmed before use.
    pub search: String,
    /// Exact color to keep, or `None` for all colors.
    pub color: Option<String>,
}

impl FilterCriteria {
    /// Criteria selecting the given tab with no search or color narrowing.
    #[must_use]
    pub fn tab(tab: TabFilter) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    /// Replace the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Replace the color filter.
    #[must_use]
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }
}

/// Apply the tab, search and color stages to `tasks`, preserving order.
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    let mut result: Vec<&Task> = tasks.iter().filter(|t| criteria.tab.keeps(t)).collect();

    if let Some(matcher) = TextMatcher::new(&criteria.search) {
        result.retain(|t| matcher.matches(t));
    }

    if let Some(color) = criteria.color.as_deref() {
        result.retain(|t| t.color == color);
    }

    result
}

/// Stable sort placing incomplete tasks before completed ones.
pub fn sort_incomplete_first(tasks: &mut [&Task]) {
    tasks.sort_by_key(|t| t.completed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use time::OffsetDateTime;

    fn task(id: &str, title: &str, completed: bool, color: &str, lists: &[&str]) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.into(),
            completed,
            color: color.into(),
            list_ids: lists.iter().map(|l| ListId::from(*l)).collect(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", "A", false, "", &[]),
            task("2", "B", true, "", &["L1"]),
        ]
    }

    #[test]
    fn parse_reserved_keywords() {
        assert_eq!(TabFilter::parse("all"), TabFilter::Status(StatusFilter::All));
        assert_eq!(TabFilter::parse("active"), TabFilter::Status(StatusFilter::Active));
        assert_eq!(TabFilter::parse("completed"), TabFilter::Status(StatusFilter::Completed));
        let list = TabFilter::parse("L1");
        assert!(!list.is_status());
        assert_eq!(list.list_id(), Some(&ListId::from("L1")));
        assert_eq!(list.to_string(), "L1");
    }

    #[test]
    fn completed_tab_keeps_completed() {
        let tasks = sample();
        let criteria = FilterCriteria::tab(TabFilter::parse("completed"));
        assert_eq!(ids(&filter_tasks(&tasks, &criteria)), vec!["2"]);
    }

    #[test]
    fn list_tab_keeps_members() {
        let tasks = sample();
        let criteria = FilterCriteria::tab(TabFilter::parse("L1"));
        assert_eq!(ids(&filter_tasks(&tasks, &criteria)), vec!["2"]);
    }

    #[test]
    fn active_tab_keeps_order() {
        let tasks = vec![
            task("1", "A", false, "", &[]),
            task("2", "B", true, "", &[]),
            task("3", "C", false, "", &[]),
        ];
        let criteria = FilterCriteria::tab(TabFilter::parse("active"));
        assert_eq!(ids(&filter_tasks(&tasks, &criteria)), vec!["1", "3"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = vec![
            task("1", "Apple", false, "", &[]),
            task("2", "Banana", false, "", &[]),
        ];
        let all = FilterCriteria::default();
        assert_eq!(ids(&filter_tasks(&tasks, &all.clone().with_search("a"))), vec!["1", "2"]);
        assert_eq!(ids(&filter_tasks(&tasks, &all.clone().with_search("  APP "))), vec!["1"]);
        assert_eq!(ids(&filter_tasks(&tasks, &all.with_search("   "))), vec!["1", "2"]);
    }

    #[test]
    fn color_filter_is_exact() {
        let tasks = vec![
            task("1", "A", false, "#87CEEB", &[]),
            task("2", "B", false, "#4682B4", &[]),
            task("3", "C", false, "", &[]),
        ];
        let base = FilterCriteria::default();
        let sky = base.clone().with_color(Some("#87CEEB".into()));
        assert_eq!(ids(&filter_tasks(&tasks, &sky)), vec!["1"]);
        let lower = base.clone().with_color(Some("#87ceeb".into()));
        assert!(filter_tasks(&tasks, &lower).is_empty());
        let unset = base.with_color(Some(String::new()));
        assert_eq!(ids(&filter_tasks(&tasks, &unset)), vec!["3"]);
    }

    #[test]
    fn stages_compose() {
        let tasks = vec![
            task("1", "Call mom", false, "#87CEEB", &["L1"]),
            task("2", "Call plumber", true, "#87CEEB", &["L1"]),
            task("3", "Call bank", false, "#4682B4", &["L1"]),
            task("4", "Call dad", false, "#87CEEB", &[]),
        ];
        let criteria = FilterCriteria::tab(TabFilter::parse("L1"))
            .with_search("call")
            .with_color(Some("#87CEEB".into()));
        assert_eq!(ids(&filter_tasks(&tasks, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn incomplete_first_is_stable() {
        let tasks = vec![
            task("1", "A", true, "", &[]),
            task("2", "B", false, "", &[]),
            task("3", "C", true, "", &[]),
            task("4", "D", false, "", &[]),
        ];
        let mut view: Vec<&Task> = tasks.iter().collect();
        sort_incomplete_first(&mut view);
        assert_eq!(ids(&view), vec!["2", "4", "1", "3"]);
    }
}
