// src/commands.rs

use crate::cli::SortArg;
use crate::config::Config;
use crate::controller::{LogController, LogSnapshot, LogSubscription};
use crate::error::{Result, RunlogError};
use crate::format::{format_entry, sort_mode_label};
use crate::input::RunInput;
use crate::sort::SortMode;
use crate::store::{EntryStore, SqliteStore};
use clap::ValueEnum;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const SESSION_HELP: &str = "Commands:
  add [DATE] KM MM:SS   record a run (DATE defaults to today)
  sort [date|distance|pace]
                        switch to the next sort order, or to the given one
  list                  show the log again
  help                  show this help
  quit                  leave the session";

/// Build a controller over the configured database and run the startup load.
async fn open_log(config: &Config) -> (LogController, LogSubscription) {
    debug!(path = %config.db_path.display(), "opening run log");
    let store: Arc<dyn EntryStore> = Arc::new(SqliteStore::new(&config.db_path));
    let (mut controller, subscription) = LogController::new(store, config.load_timeout);
    controller.load().await;
    (controller, subscription)
}

/// Handle the 'init' command
pub async fn handle_init(config: &Config) -> Result<()> {
    let store = SqliteStore::new(&config.db_path);
    let count = store.get_all().await?.len();
    println!("✓ Database ready at: {}", config.db_path.display());
    println!("{} run(s) recorded.", count);
    Ok(())
}

/// Handle the 'add' command
pub async fn handle_add(config: &Config, date: &str, distance: &str, time: &str) -> Result<()> {
    let input = RunInput::parse(date, distance, time)?;
    let (mut controller, mut subscription) = open_log(config).await;

    controller.add_entry(input)?;
    controller.settle().await;

    let mut saved = true;
    while let Ok(warning) = subscription.warnings.try_recv() {
        if matches!(warning, RunlogError::WriteFailed(_)) {
            saved = false;
        }
        eprintln!("{}", describe_warning(&warning));
    }
    if saved {
        println!("✓ Run recorded.");
    }
    Ok(())
}

/// Handle the 'list' command
pub async fn handle_list(config: &Config, sort: SortArg, num: Option<usize>) -> Result<()> {
    let (mut controller, mut subscription) = open_log(config).await;
    controller.set_sort_mode(sort.into());

    report_warnings(&mut subscription, &mut io::stderr())?;
    render_snapshot(&controller.snapshot(), num, &mut io::stdout())?;
    Ok(())
}

/// Handle the 'session' command
pub async fn handle_session(config: &Config) -> Result<()> {
    let (controller, subscription) = open_log(config).await;
    let stdin = BufReader::new(tokio::io::stdin());
    run_session(controller, subscription, stdin, &mut io::stdout()).await
}

#[derive(Debug, PartialEq)]
enum SessionCommand {
    Add(RunInput),
    Sort(Option<SortMode>),
    List,
    Help,
    Quit,
}

/// Parse one session line. `Ok(None)` for blank lines.
fn parse_session_command(line: &str) -> Result<Option<SessionCommand>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };
    let command = match (verb.to_lowercase().as_str(), args) {
        ("add" | "a", [distance, time]) => SessionCommand::Add(RunInput::parse("today", distance, time)?),
        ("add" | "a", [date, distance, time]) => {
            SessionCommand::Add(RunInput::parse(date, distance, time)?)
        }
        ("add" | "a", _) => {
            return Err(RunlogError::InvalidInput(
                "Usage: add [DATE] KM MM:SS".to_string(),
            ))
        }
        ("sort" | "s", []) => SessionCommand::Sort(None),
        ("sort" | "s", [mode]) => {
            let arg = SortArg::from_str(mode, true).map_err(|_| {
                RunlogError::InvalidInput(format!("Unknown sort order: {}", mode))
            })?;
            SessionCommand::Sort(Some(arg.into()))
        }
        ("list" | "l", []) => SessionCommand::List,
        ("help" | "h" | "?", _) => SessionCommand::Help,
        ("quit" | "q" | "exit", _) => SessionCommand::Quit,
        _ => {
            return Err(RunlogError::InvalidInput(format!(
                "Unknown command: {}. Type 'help' for a list of commands.",
                line.trim()
            )))
        }
    };
    Ok(Some(command))
}

/// Drive the controller from line-based input until `quit` or end of input.
pub async fn run_session<R, W>(
    mut controller: LogController,
    mut subscription: LogSubscription,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", SESSION_HELP)?;
    report_warnings(&mut subscription, out)?;
    render_if_changed(&mut subscription, out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_session_command(&line) {
            Ok(None) => continue,
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(SessionCommand::Add(input))) => controller.add_entry(input)?,
            Ok(Some(SessionCommand::Sort(Some(mode)))) => controller.set_sort_mode(mode),
            Ok(Some(SessionCommand::Sort(None))) => {
                controller.cycle_sort_mode();
            }
            Ok(Some(SessionCommand::List)) => render_snapshot(&controller.snapshot(), None, out)?,
            Ok(Some(SessionCommand::Help)) => writeln!(out, "{}", SESSION_HELP)?,
            Err(e) => writeln!(out, "{}", e)?,
        }

        report_warnings(&mut subscription, out)?;
        render_if_changed(&mut subscription, out)?;
    }

    controller.settle().await;
    report_warnings(&mut subscription, out)?;
    writeln!(out)?;
    Ok(())
}

fn render_if_changed<W: Write>(subscription: &mut LogSubscription, out: &mut W) -> Result<()> {
    if subscription.snapshots.has_changed().unwrap_or(false) {
        let snapshot = subscription.snapshots.borrow_and_update().clone();
        render_snapshot(&snapshot, None, out)?;
    }
    Ok(())
}

fn render_snapshot<W: Write>(snapshot: &LogSnapshot, limit: Option<usize>, out: &mut W) -> Result<()> {
    if snapshot.entries.is_empty() {
        writeln!(out, "No runs recorded yet.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{} - {} run(s)",
        sort_mode_label(snapshot.sort_mode),
        snapshot.entries.len()
    )?;
    let shown = limit.unwrap_or(snapshot.entries.len());
    for (index, entry) in snapshot.entries.iter().take(shown).enumerate() {
        writeln!(out, "{}", format_entry(index + 1, entry))?;
    }
    Ok(())
}

fn report_warnings<W: Write>(subscription: &mut LogSubscription, out: &mut W) -> Result<()> {
    while let Ok(warning) = subscription.warnings.try_recv() {
        writeln!(out, "{}", describe_warning(&warning))?;
    }
    Ok(())
}

fn describe_warning(warning: &RunlogError) -> String {
    match warning {
        RunlogError::StoreUnavailable(_) | RunlogError::StoreTimeout(_) => {
            format!("Warning: {}. History may be incomplete.", warning)
        }
        RunlogError::WriteFailed(_) => {
            format!("Warning: {}. It is listed for now but may be lost.", warning)
        }
        other => format!("Warning: {}", other),
    }
}
