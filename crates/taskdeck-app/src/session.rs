//! Per-session view state over a [`Board`].
//!
//! Holds the selected tab, search text, color filter and the last toast
//! message, the profile display name, and wires the multi-step flows (adding into the current list,
//! deleting a list with its references).

use taskdeck_core::{
    Board, FilterCriteria, ListId, Palette, StatusFilter, TabFilter, Task, TaskId, TaskList,
    sort_incomplete_first,
};
use thiserror::Error;
use tracing::debug;

/// Errors raised by session operations that take user-facing color names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The name is neither a palette id nor a palette hex code.
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

/// Session state: board plus filter selections.
#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
    palette: Palette,
    criteria: FilterCriteria,
    display_name: String,
    toast: Option<String>,
}

impl Session {
    /// Fresh session with an empty board.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self::with_board(Board::new(), palette)
    }

    /// Session over an existing board.
    #[must_use]
    pub fn with_board(board: Board, palette: Palette) -> Self {
        Self {
            board,
            palette,
            criteria: FilterCriteria::default(),
            display_name: String::new(),
            toast: None,
        }
    }

    /// Underlying board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Palette used to resolve color names.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Active filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Selected tab.
    #[must_use]
    pub const fn tab(&self) -> &TabFilter {
        &self.criteria.tab
    }

    /// Select a tab.
    ///
    /// List tabs are taken as given; an id with no matching list shows no
    /// tasks and is never attached to new tasks.
    pub fn set_tab(&mut self, tab: TabFilter) {
        debug!(tab = %tab, "tab selected");
        self.criteria.tab = tab;
    }

    /// Replace the search text; blank clears it.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.criteria.search = query.into();
    }

    /// Narrow to one palette color, or clear the color filter with `None`.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownColor`] when `color` is not in the palette.
    pub fn set_color_filter(&mut self, color: Option<&str>) -> Result<(), SessionError> {
        self.criteria.color = color.map(|c| self.resolve_color(c)).transpose()?;
        Ok(())
    }

    /// List selected by the current tab, `None` for status tabs.
    #[must_use]
    pub const fn current_list_id(&self) -> Option<&ListId> {
        self.criteria.tab.list_id()
    }

    /// Tasks visible under the current criteria, incomplete first.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let mut visible = self.board.filter(&self.criteria);
        sort_incomplete_first(&mut visible);
        visible
    }

    /// Profile display name, empty when unset.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Store a trimmed display name; blank clears it.
    pub fn set_display_name(&mut self, name: &str) {
        name.trim().clone_into(&mut self.display_name);
        self.notify("Profile updated");
    }

    /// Header text: `<name>'s Tasks`, or `Your Tasks` without a name.
    #[must_use]
    pub fn header_title(&self) -> String {
        if self.display_name.is_empty() {
            "Your Tasks".to_owned()
        } else {
            format!("{}'s Tasks", self.display_name)
        }
    }

    /// Take the pending toast message, if any.
    pub fn take_toast(&mut self) -> Option<String> {
        self.toast.take()
    }

    /// Add a task, into the current list when a list tab is selected and
    /// that list exists.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownColor`] when `color` is not in the palette.
    pub fn add_task(&mut self, title: &str, color: Option<&str>) -> Result<Option<TaskId>, SessionError> {
        let color = match color {
            Some(c) => self.resolve_color(c)?,
            None => self.palette.default_color().to_owned(),
        };
        let list_id = self
            .current_list_id()
            .filter(|id| self.list_name(id).is_some())
            .cloned();
        let id = self.board.add_task(title, Some(&color), list_id);
        if id.is_some() {
            self.notify("Task added");
        }
        Ok(id)
    }

    /// Flip a task between done and undone.
    pub fn toggle_task(&mut self, task_id: &TaskId) {
        self.board.toggle_task_completion(task_id);
    }

    /// Delete a task.
    pub fn delete_task(&mut self, task_id: &TaskId) {
        if self.board.task_store().get(task_id).is_some() {
            self.board.delete_task(task_id);
            self.notify("Task deleted");
        }
    }

    /// Edit a task's title and optionally its color. Blank titles keep the current one.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownColor`] when `color` is not in the palette.
    pub fn edit_task(&mut self, task_id: &TaskId, title: &str, color: Option<&str>) -> Result<(), SessionError> {
        let color = color.map(|c| self.resolve_color(c)).transpose()?;
        let title = if title.trim().is_empty() {
            match self.board.task_store().get(task_id) {
                Some(task) => task.title.clone(),
                None => return Ok(()),
            }
        } else {
            title.to_owned()
        };
        self.board.update_task(task_id, &title, color.as_deref());
        Ok(())
    }

    /// Put a task in an existing list; unknown lists are ignored.
    pub fn add_task_to_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        if self.list_name(list_id).is_none() {
            return;
        }
        self.board.add_task_to_list(task_id, list_id);
    }

    /// Take a task out of a list.
    pub fn remove_task_from_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        self.board.remove_task_from_list(task_id, list_id);
    }

    /// Flip membership of a task in a list, announcing the result.
    pub fn toggle_task_list(&mut self, task_id: &TaskId, list_id: &ListId) {
        let Some(task) = self.board.task_store().get(task_id) else {
            return;
        };
        let Some(name) = self.list_name(list_id).map(str::to_owned) else {
            return;
        };
        if task.in_list(list_id) {
            self.board.remove_task_from_list(task_id, list_id);
            self.notify(format!("Removed from {name}"));
        } else {
            self.board.add_task_to_list(task_id, list_id);
            self.notify(format!("Added to {name}"));
        }
    }

    /// Create a list.
    pub fn add_list(&mut self, name: &str) -> Option<ListId> {
        let id = self.board.add_list(name);
        if id.is_some() {
            self.notify("List created");
        }
        id
    }

    /// Rename an existing list.
    pub fn rename_list(&mut self, id: &ListId, name: &str) {
        if name.trim().is_empty() || self.list_name(id).is_none() {
            return;
        }
        self.board.update_list(id, name);
        self.notify("List renamed");
    }

    /// Delete a list and its references; a tab showing it falls back to `all`.
    pub fn delete_list(&mut self, id: &ListId) {
        if self.list_name(id).is_none() {
            return;
        }
        self.board.delete_list_cascade(id);
        if self.current_list_id() == Some(id) {
            self.set_tab(TabFilter::Status(StatusFilter::All));
        }
        self.notify("List deleted");
    }

    /// Find a list by id or case-insensitive name.
    #[must_use]
    pub fn resolve_list(&self, key: &str) -> Option<&TaskList> {
        self.board.list_store().resolve(key)
    }

    fn list_name(&self, id: &ListId) -> Option<&str> {
        self.board.list_store().get(id).map(|l| l.name.as_str())
    }

    fn resolve_color(&self, key: &str) -> Result<String, SessionError> {
        self.palette
            .find(key)
            .map(|color| color.hex.clone())
            .ok_or_else(|| SessionError::UnknownColor(key.to_owned()))
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.toast = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Palette::default())
    }

    fn created<T>(value: Option<T>) -> T {
        value.unwrap_or_else(|| panic!("value must be created"))
    }

    #[test]
    fn add_task_uses_palette_and_toasts() -> Result<(), SessionError> {
        let mut s = session();
        let id = created(s.add_task("Water plants", Some("mint"))?);
        assert_eq!(s.take_toast().as_deref(), Some("Task added"));
        assert_eq!(s.take_toast(), None);
        assert!(s.board().task_store().get(&id).is_some_and(|t| t.color == "#7FDBDA"));

        assert_eq!(s.add_task("  ", None)?, None);
        assert_eq!(s.take_toast(), None);
        assert_eq!(
            s.add_task("Paint", Some("magenta")),
            Err(SessionError::UnknownColor("magenta".into()))
        );
        Ok(())
    }

    #[test]
    fn add_task_targets_current_list() -> Result<(), SessionError> {
        let mut s = session();
        let list = created(s.add_list("Garden"));
        s.set_tab(TabFilter::List(list.clone()));
        let id = created(s.add_task("Rake leaves", None)?);
        assert!(s.board().task_store().get(&id).is_some_and(|t| t.in_list(&list)));
        Ok(())
    }

    #[test]
    fn deleting_active_list_resets_tab() -> Result<(), SessionError> {
        let mut s = session();
        let list = created(s.add_list("Garden"));
        s.set_tab(TabFilter::List(list.clone()));
        s.add_task("Rake leaves", None)?;

        s.delete_list(&list);
        assert_eq!(s.tab(), &TabFilter::Status(StatusFilter::All));
        assert_eq!(s.take_toast().as_deref(), Some("List deleted"));
        assert!(s.board().tasks().iter().all(|t| t.list_ids.is_empty()));
        assert!(s.board().lists().is_empty());
        Ok(())
    }

    #[test]
    fn deleting_other_list_keeps_tab() {
        let mut s = session();
        let keep = created(s.add_list("Keep"));
        let other = created(s.add_list("Drop"));
        s.set_tab(TabFilter::List(keep.clone()));
        s.delete_list(&other);
        assert_eq!(s.current_list_id(), Some(&keep));
    }

    #[test]
    fn visible_tasks_lists_incomplete_first() -> Result<(), SessionError> {
        let mut s = session();
        let first = created(s.add_task("First", None)?);
        s.add_task("Second", None)?;
        s.toggle_task(&first);
        s.add_task("Third", None)?;

        let titles: Vec<&str> = s.visible_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);

        s.set_tab(TabFilter::parse("completed"));
        let titles: Vec<&str> = s.visible_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First"]);
        Ok(())
    }

    #[test]
    fn color_filter_resolves_names() -> Result<(), SessionError> {
        let mut s = session();
        s.add_task("Sky task", Some("sky"))?;
        s.add_task("Steel task", Some("#4682b4"))?;
        s.set_color_filter(Some("steel"))?;
        let titles: Vec<&str> = s.visible_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Steel task"]);
        s.set_color_filter(None)?;
        assert_eq!(s.visible_tasks().len(), 2);
        assert!(s.set_color_filter(Some("plaid")).is_err());
        Ok(())
    }

    #[test]
    fn toggle_task_list_flips_membership() -> Result<(), SessionError> {
        let mut s = session();
        let list = created(s.add_list("Errands"));
        let task = created(s.add_task("Post office", None)?);
        s.take_toast();

        s.toggle_task_list(&task, &list);
        assert_eq!(s.take_toast().as_deref(), Some("Added to Errands"));
        assert!(s.board().task_store().get(&task).is_some_and(|t| t.in_list(&list)));

        s.toggle_task_list(&task, &list);
        assert_eq!(s.take_toast().as_deref(), Some("Removed from Errands"));
        assert!(s.board().task_store().get(&task).is_some_and(|t| t.list_ids.is_empty()));
        Ok(())
    }

    #[test]
    fn unknown_lists_are_never_attached() -> Result<(), SessionError> {
        let mut s = session();
        s.set_tab(TabFilter::parse("ghost"));
        let id = created(s.add_task("Orphan", None)?);
        s.take_toast();

        let nope = ListId::from("list-nope");
        s.toggle_task_list(&id, &nope);
        s.add_task_to_list(&id, &nope);
        assert_eq!(s.take_toast(), None);
        assert!(s.board().task_store().get(&id).is_some_and(|t| t.list_ids.is_empty()));
        Ok(())
    }

    #[test]
    fn blank_edit_title_still_applies_color() -> Result<(), SessionError> {
        let mut s = session();
        let id = created(s.add_task("Paint", None)?);
        s.edit_task(&id, "   ", Some("steel"))?;
        let task = s.board().task_store().get(&id).map(|t| (t.title.as_str(), t.color.as_str()));
        assert_eq!(task, Some(("Paint", "#4682B4")));

        s.edit_task(&id, " Repaint ", None)?;
        let task = s.board().task_store().get(&id).map(|t| (t.title.as_str(), t.color.as_str()));
        assert_eq!(task, Some(("Repaint", "#4682B4")));
        Ok(())
    }

    #[test]
    fn display_name_drives_header() {
        let mut s = session();
        assert_eq!(s.header_title(), "Your Tasks");
        s.set_display_name("  Ada ");
        assert_eq!(s.display_name(), "Ada");
        assert_eq!(s.header_title(), "Ada's Tasks");
        assert_eq!(s.take_toast().as_deref(), Some("Profile updated"));
        s.set_display_name("   ");
        assert_eq!(s.header_title(), "Your Tasks");
    }

    #[test]
    fn rename_and_delete_ignore_unknown_targets() {
        let mut s = session();
        let missing = ListId::from("list-missing");
        s.rename_list(&missing, "Name");
        s.delete_list(&missing);
        s.delete_task(&TaskId::from("missing"));
        assert_eq!(s.take_toast(), None);
    }
}
