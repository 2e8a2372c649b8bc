use std::path::{Path, PathBuf};

use qraso_types::{AppEvent, CaptureCommand, RiskLabel, UploadOrigin};
use thiserror::Error;

use crate::render;
use crate::state::UiState;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scan(String),
    Upload(PathBuf, UploadOrigin),
    Paste,
    List,
    Detail(usize),
    Report(usize),
    Delete(usize),
    Clear,
    Copy(usize),
    Dashboard,
    View(usize),
    Close,
    Camera(CaptureCommand),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for the list of commands.")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a list position")]
    InvalidPosition(String),
    #[error("No result at position {0}")]
    NoSuchEntry(usize),
    #[error("No dashboard row {0}. Run `dashboard` first.")]
    NoSuchRow(usize),
    #[error("Only SUSPICIOUS results can be reported ({0} given)")]
    NotReportable(RiskLabel),
    #[error("No detail window is open")]
    NothingToClose,
}

/// What the UI loop does with a parsed command
#[derive(Debug, PartialEq)]
pub enum Action {
    Send(AppEvent),
    Render(String),
    Quit,
}

/// Terminals paste dropped files as quoted paths
fn unquote(path: &str) -> &str {
    let path = path.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = path
            .strip_prefix(quote)
            .and_then(|p| p.strip_suffix(quote))
        {
            return inner;
        }
    }
    path
}

fn position(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidPosition(arg.to_string())),
    }
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "scan" if arg.is_empty() => return Err(CommandError::MissingArgument("scan")),
        "scan" => Command::Scan(arg.to_string()),
        "upload" if arg.is_empty() => return Err(CommandError::MissingArgument("upload")),
        "upload" => Command::Upload(PathBuf::from(unquote(arg)), UploadOrigin::Selection),
        "paste" => Command::Paste,
        "list" | "ls" => Command::List,
        "detail" => Command::Detail(position("detail", arg)?),
        "report" => Command::Report(position("report", arg)?),
        "delete" | "rm" => Command::Delete(position("delete", arg)?),
        "clear" => Command::Clear,
        "copy" => Command::Copy(position("copy", arg)?),
        "dashboard" => Command::Dashboard,
        "view" => Command::View(position("view", arg)?),
        "close" => Command::Close,
        "camera" => match arg {
            "start" => Command::Camera(CaptureCommand::Start),
            "stop" => Command::Camera(CaptureCommand::Stop),
            "flip" => Command::Camera(CaptureCommand::Flip),
            "" => return Err(CommandError::MissingArgument("camera")),
            other => return Err(CommandError::Unknown(format!("camera {other}"))),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => {
            let dropped = unquote(line);
            if Path::new(dropped).is_file() {
                Command::Upload(PathBuf::from(dropped), UploadOrigin::Drop)
            } else {
                return Err(CommandError::Unknown(word.to_string()));
            }
        }
    };

    Ok(Some(command))
}

/// Resolve a command against the current UI state
pub fn apply(
    command: Command,
    state: &mut UiState,
    max_rows: usize,
) -> Result<Action, CommandError> {
    let action = match command {
        Command::Scan(text) => Action::Send(AppEvent::ManualScan(text)),
        Command::Upload(path, origin) => Action::Send(AppEvent::UploadPath { path, origin }),
        Command::Paste => Action::Send(AppEvent::PasteClipboard),
        Command::List => Action::Send(AppEvent::RefreshEntries),
        Command::Detail(n) => {
            state
                .toggle_detail(n)
                .ok_or(CommandError::NoSuchEntry(n))?;
            Action::Render(render::render_entries(state, max_rows))
        }
        Command::Report(n) => {
            let entry = state.entry_at(n).ok_or(CommandError::NoSuchEntry(n))?;
            if !entry.is_reportable() {
                return Err(CommandError::NotReportable(entry.record.label));
            }
            Action::Send(AppEvent::ReportEntry(entry.id))
        }
        Command::Delete(n) => {
            let entry = state.entry_at(n).ok_or(CommandError::NoSuchEntry(n))?;
            Action::Send(AppEvent::DeleteEntry(entry.id))
        }
        Command::Clear => Action::Send(AppEvent::DeleteAll),
        Command::Copy(n) => {
            let entry = state.entry_at(n).ok_or(CommandError::NoSuchEntry(n))?;
            Action::Send(AppEvent::CopyUrl(entry.id))
        }
        Command::Dashboard => Action::Send(AppEvent::LoadDashboard),
        Command::View(n) => {
            let row = state.open_modal(n).ok_or(CommandError::NoSuchRow(n))?;
            Action::Render(render::render_modal(row))
        }
        Command::Close => {
            if !state.close_modal() {
                return Err(CommandError::NothingToClose);
            }
            Action::Render(render::render_dashboard(&state.dashboard))
        }
        Command::Camera(cmd) => Action::Send(AppEvent::Capture(cmd)),
        Command::Help => Action::Render(render::HELP.to_string()),
        Command::Quit => Action::Quit,
    };

    Ok(action)
}
