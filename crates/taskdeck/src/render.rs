use std::fmt::Write as _;

use taskdeck_app::Session;
use taskdeck_core::{Task, TaskList};

const EMPTY_MESSAGE: &str = "No tasks yet. Add one with `add <title>`.";

/// Render visible tasks as numbered rows. Numbers are valid task references in the shell.
pub fn task_rows(session: &Session, tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }
    let mut out = String::new();
    for (idx, task) in tasks.iter().enumerate() {
        let mark = if task.completed { 'x' } else { ' ' };
        let color = color_label(session, &task.color);
        let _ = write!(out, "{:>3}. [{mark}] {}  {color}", idx + 1, task.title);
        let names = list_names(session, task);
        if !names.is_empty() {
            let _ = write!(out, "  ({})", names.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Render lists with task counts, marking the selected tab.
pub fn list_rows(session: &Session, lists: &[TaskList]) -> String {
    if lists.is_empty() {
        return "No lists yet. Create one with `list add <name>`.\n".to_owned();
    }
    let current = session.current_list_id();
    let mut out = String::new();
    for list in lists {
        let marker = if current == Some(&list.id) { '*' } else { ' ' };
        let count = session
            .board()
            .tasks()
            .iter()
            .filter(|t| t.in_list(&list.id))
            .count();
        let _ = writeln!(out, "{marker} {} ({count})  {}", list.name, list.id);
    }
    out
}

/// One-line summary of the active filters.
pub fn filter_summary(session: &Session) -> String {
    let criteria = session.criteria();
    let tab = criteria.tab.list_id().map_or_else(
        || criteria.tab.to_string(),
        |id| {
            session
                .board()
                .list_store()
                .get(id)
                .map_or_else(|| id.to_string(), |l| l.name.clone())
        },
    );
    let mut out = format!("tab: {tab}");
    let search = criteria.search.trim();
    if !search.is_empty() {
        let _ = write!(out, ", search: \"{search}\"");
    }
    if let Some(color) = criteria.color.as_deref() {
        let _ = write!(out, ", color: {}", color_label(session, color));
    }
    out
}

fn color_label(session: &Session, hex: &str) -> String {
    session
        .palette()
        .find(hex)
        .map_or_else(|| hex.to_owned(), |c| c.id.clone())
}

fn list_names<'a>(session: &'a Session, task: &Task) -> Vec<&'a str> {
    task.list_ids
        .iter()
        .filter_map(|id| session.board().list_store().get(id))
        .map(|l| l.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::{Palette, TabFilter};

    #[test]
    fn rows_show_state_color_and_lists() {
        let mut session = Session::new(Palette::default());
        let list = session.add_list("Home");
        if let Some(list) = list {
            session.set_tab(TabFilter::List(list));
        }
        let _ = session.add_task("Sweep", Some("teal"));
        let rendered = task_rows(&session, &session.visible_tasks());
        assert_eq!(rendered, "  1. [ ] Sweep  teal  (Home)\n");
        assert!(filter_summary(&session).starts_with("tab: Home"));
    }

    #[test]
    fn empty_board_renders_hint() {
        let session = Session::new(Palette::default());
        assert!(task_rows(&session, &[]).starts_with("No tasks yet"));
        assert!(list_rows(&session, &[]).starts_with("No lists yet"));
        assert_eq!(filter_summary(&session), "tab: all");
    }
}
