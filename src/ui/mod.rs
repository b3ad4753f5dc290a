//! Line-oriented interactive front end.
//!
//! Two lists can be on screen: the latest refresh ("news") and the bookmarks
//! ("saved"). `open <n>` and `delete <n>` refer to whichever was shown last.

mod command;
mod render;

pub use command::{parse_command, Command, CommandError, HELP};
pub use render::{
    render_bookmarks, render_channels, render_entries, save_feedback, NOTHING_NEW, NO_BOOKMARKS,
};

use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::session::{RefreshStatus, Session};
use crate::translate::TranslationProvider;
use crate::util::article_url;

/// Whether the prompt loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// The list numbers currently refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    News,
    Saved,
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run<P: TranslationProvider>(session: &mut Session<P>) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = View::News;

    writeln!(
        stdout,
        "Channel: {}. Type 'refresh' to load news, 'help' for commands.",
        session.channel().name
    )?;

    loop {
        write!(stdout, "odm> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        if execute(session, &mut view, command, &mut stdout).await? == Action::Quit {
            break;
        }
    }
    Ok(())
}

/// Applies one command to the session, writing user-facing output to `out`.
pub async fn execute<P: TranslationProvider, W: Write>(
    session: &mut Session<P>,
    view: &mut View,
    command: Command,
    out: &mut W,
) -> std::io::Result<Action> {
    match command {
        Command::Refresh => {
            writeln!(out, "Fetching {}...", session.channel().name)?;
            match session.refresh().await {
                Ok(RefreshStatus::Updated(_)) => {
                    *view = View::News;
                    write!(out, "{}", render_entries(session.current()))?;
                }
                Ok(RefreshStatus::NothingNew) => {
                    *view = View::News;
                    writeln!(out, "{}", NOTHING_NEW)?;
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }
        Command::Channels => {
            write!(out, "{}", render_channels(session.channels(), session.channel()))?;
        }
        Command::Channel(key) => match session.select_channel(&key) {
            Some(channel) => writeln!(out, "Channel: {}", channel.name)?,
            None => writeln!(out, "No channel named '{}'", key)?,
        },
        Command::Save(index) => match session.save(index) {
            Some((outcome, entry)) => writeln!(out, "{}", save_feedback(outcome, entry))?,
            None => writeln!(out, "No news entry {}", index + 1)?,
        },
        Command::Saved => {
            *view = View::Saved;
            write!(out, "{}", render_bookmarks(session.bookmarks()))?;
        }
        Command::Delete(index) => match session.bookmarks_mut().remove_at(index) {
            Some(_) => {
                *view = View::Saved;
                write!(out, "{}", render_bookmarks(session.bookmarks()))?;
            }
            None => writeln!(out, "No saved article {}", index + 1)?,
        },
        Command::Open(index) => {
            let list = match view {
                View::News => session.current(),
                View::Saved => session.bookmarks().list(),
            };
            match list.get(index) {
                Some(entry) => open_link(&entry.link, out)?,
                None => writeln!(out, "No entry {}", index + 1)?,
            }
        }
        Command::Translate(enabled) => {
            session.set_translate(enabled);
            let state = if enabled { "on" } else { "off" };
            writeln!(out, "Translation {} (applies from the next refresh)", state)?;
        }
        Command::Limit(limit) => {
            let applied = session.set_item_limit(limit);
            writeln!(out, "Showing up to {} entries", applied)?;
        }
        Command::Days(days) => {
            let applied = session.set_day_window(days);
            writeln!(out, "Showing entries from the last {} days", applied)?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Action::Quit),
    }
    Ok(Action::Continue)
}

/// Opens `link` in the default browser.
///
/// Links come from remote feeds, so only absolute http(s) URLs are handed to
/// the platform opener.
fn open_link<W: Write>(link: &str, out: &mut W) -> std::io::Result<()> {
    let Some(url) = article_url(link) else {
        tracing::warn!(link = %link, "Refusing to open non-http link");
        return writeln!(out, "Cannot open this link");
    };
    match open::that(url.as_str()) {
        Ok(()) => writeln!(out, "Opened {}", url),
        Err(e) => writeln!(out, "Failed to open browser: {}", e),
    }
}
