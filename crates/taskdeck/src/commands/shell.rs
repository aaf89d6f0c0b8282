//! Interactive shell over a [`Session`].
//!
//! Each input line is split with shell quoting rules and parsed with clap.
//! Task references are either a row number from the last `ls` view or a
//! task id; list references are a list id or name.

use std::io::{BufRead, Write};

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use taskdeck_app::Session;
use taskdeck_core::{ListId, StatusFilter, TabFilter, TaskId};

use crate::render;

#[derive(Parser, Debug)]
#[command(name = "taskdeck", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    cmd: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Add a task (into the selected list when a list tab is active).
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// Palette color id or hex code.
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Toggle a task between done and undone.
    Done { task: String },

    /// Delete a task.
    Rm { task: String },

    /// Change a task's title and/or color.
    Edit {
        task: String,
        title: Vec<String>,
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Create, rename or delete lists.
    #[command(subcommand)]
    List(ListCommand),

    /// Add a task to a list, or remove it when it is already there.
    Tag { task: String, list: String },

    /// Remove a task from a list.
    Untag { task: String, list: String },

    /// Select a tab: all, active, completed, or a list.
    Tab { value: String },

    /// Filter by title text; no argument clears the search.
    Search { query: Vec<String> },

    /// Filter by color; no argument (or `all`) clears the filter.
    Color { value: Option<String> },

    /// Show visible tasks.
    Ls,

    /// Set the profile display name; no argument clears it.
    Profile { name: Vec<String> },

    /// Show lists.
    Lists,

    /// Print tasks and lists as JSON.
    Export,

    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    /// Create a list.
    Add {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Rename a list.
    Rename {
        list: String,
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Delete a list and remove it from every task.
    Rm { list: String },
}

enum Flow {
    Continue,
    Quit,
}

/// Read commands from `input` until EOF or `quit`, writing results to `output`.
pub fn run_shell<R, W>(session: &mut Session, input: &mut R, output: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "taskdeck shell. Type `help` for commands.")?;
    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let words = match shell_words::split(&line) {
            Ok(words) => words,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }

        let cmd = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.cmd,
            Err(err) => {
                write!(output, "{err}")?;
                continue;
            }
        };

        match execute(session, cmd, output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(output, "error: {err:#}")?,
        }
        if let Some(toast) = session.take_toast() {
            writeln!(output, "{toast}")?;
        }
    }
    Ok(())
}

fn execute<W: Write>(session: &mut Session, cmd: ShellCommand, output: &mut W) -> Result<Flow> {
    match cmd {
        ShellCommand::Add { title, color } => {
            if session.add_task(&title.join(" "), color.as_deref())?.is_none() {
                writeln!(output, "Task title must not be empty")?;
            }
        }
        ShellCommand::Done { task } => {
            let id = resolve_task(session, &task)?;
            session.toggle_task(&id);
        }
        ShellCommand::Rm { task } => {
            let id = resolve_task(session, &task)?;
            session.delete_task(&id);
        }
        ShellCommand::Edit { task, title, color } => {
            let id = resolve_task(session, &task)?;
            session.edit_task(&id, &title.join(" "), color.as_deref())?;
        }
        ShellCommand::List(ListCommand::Add { name }) => {
            if session.add_list(&name.join(" ")).is_none() {
                writeln!(output, "List name must not be empty")?;
            }
        }
        ShellCommand::List(ListCommand::Rename { list, name }) => {
            let id = resolve_list(session, &list)?;
            session.rename_list(&id, &name.join(" "));
        }
        ShellCommand::List(ListCommand::Rm { list }) => {
            let id = resolve_list(session, &list)?;
            session.delete_list(&id);
        }
        ShellCommand::Tag { task, list } => {
            let task = resolve_task(session, &task)?;
            let list = resolve_list(session, &list)?;
            session.toggle_task_list(&task, &list);
        }
        ShellCommand::Untag { task, list } => {
            let task = resolve_task(session, &task)?;
            let list = resolve_list(session, &list)?;
            session.remove_task_from_list(&task, &list);
        }
        ShellCommand::Tab { value } => {
            let tab = match StatusFilter::from_keyword(value.trim()) {
                Some(status) => TabFilter::Status(status),
                None => TabFilter::List(resolve_list(session, &value)?),
            };
            session.set_tab(tab);
            writeln!(output, "{}", render::filter_summary(session))?;
        }
        ShellCommand::Search { query } => {
            session.set_search(query.join(" "));
            writeln!(output, "{}", render::filter_summary(session))?;
        }
        ShellCommand::Color { value } => {
            let value = value.filter(|v| !v.trim().eq_ignore_ascii_case("all"));
            session.set_color_filter(value.as_deref())?;
            writeln!(output, "{}", render::filter_summary(session))?;
        }
        ShellCommand::Profile { name } => {
            session.set_display_name(&name.join(" "));
            writeln!(output, "{}", session.header_title())?;
        }
        ShellCommand::Ls => {
            writeln!(output, "{}", session.header_title())?;
            write!(output, "{}", render::task_rows(session, &session.visible_tasks()))?;
        }
        ShellCommand::Lists => {
            write!(output, "{}", render::list_rows(session, session.board().lists()))?;
        }
        ShellCommand::Export => {
            let json = serde_json::to_string_pretty(&session.board().snapshot())?;
            writeln!(output, "{json}")?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn resolve_task(session: &Session, key: &str) -> Result<TaskId> {
    let key = key.trim();
    if let Ok(row) = key.parse::<usize>()
        && let Some(task) = row.checked_sub(1).and_then(|idx| session.visible_tasks().get(idx).copied())
    {
        return Ok(task.id.clone());
    }
    session
        .board()
        .tasks()
        .iter()
        .find(|t| t.id == key)
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("unknown task: {key}"))
}

fn resolve_list(session: &Session, key: &str) -> Result<ListId> {
    session
        .resolve_list(key)
        .map(|l| l.id.clone())
        .ok_or_else(|| anyhow!("unknown list: {}", key.trim()))
}
