use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use taskdeck_app::{AppConfig, PreferenceStore, Session, SignInForm, ThemePreference};

use crate::Command;

mod shell;

pub use shell::run_shell;

/// Execute a top-level command.
pub fn run<R, W>(command: Command, config: &AppConfig, input: &mut R, output: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut prefs = PreferenceStore::load(config.data_dir()?);
    match command {
        Command::Login { email, password } => {
            let form = SignInForm::new(email, password);
            if let Some(message) = form.email_error() {
                bail!("{message}");
            }
            if !form.can_submit() {
                bail!("email and password are required");
            }
            prefs.sign_in()?;
            writeln!(output, "Signed in as {}", form.email.trim())?;
        }
        Command::Logout => {
            prefs.sign_out()?;
            writeln!(output, "Signed out")?;
        }
        Command::Status => {
            let state = if prefs.is_authenticated() {
                "signed in"
            } else {
                "signed out"
            };
            writeln!(output, "{state}")?;
            write_theme(output, prefs.theme())?;
        }
        Command::Theme { value: None } => write_theme(output, prefs.theme())?,
        Command::Theme { value: Some(value) } => {
            let theme: ThemePreference = value.parse()?;
            prefs.set_theme(theme)?;
            write_theme(output, theme)?;
        }
        Command::Shell => {
            if !prefs.is_authenticated() {
                bail!("not signed in; run `taskdeck login` first");
            }
            let mut session = Session::new(config.palette.build()?);
            run_shell(&mut session, input, output)?;
        }
    }
    Ok(())
}

fn write_theme<W: Write>(output: &mut W, theme: ThemePreference) -> Result<()> {
    writeln!(output, "theme: {theme} ({:?})", theme.resolve(None))?;
    Ok(())
}
