use std::path::PathBuf;

use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::i18n;
use crate::orchestrator::SearchOrchestrator;
use crate::state::SearchMode;
use crate::ui::{self, ViewOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Image(PathBuf),
    Similar(String),
    More,
    Mode(SearchMode),
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A line without a known verb is input for the current mode.
pub fn parse_command(line: &str, mode: SearchMode) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "text" => Command::Text(rest.to_string()),
        "image" => Command::Image(PathBuf::from(rest)),
        "similar" => Command::Similar(rest.to_string()),
        "more" if rest.is_empty() => Command::More,
        "status" if rest.is_empty() => Command::Status,
        "help" | "?" if rest.is_empty() => Command::Help,
        "quit" | "exit" if rest.is_empty() => Command::Quit,
        "mode" => match SearchMode::from_name(rest) {
            Some(mode) => Command::Mode(mode),
            None => Command::Unknown(line.to_string()),
        },
        _ => match mode {
            SearchMode::Text => Command::Text(line.to_string()),
            SearchMode::Image => Command::Image(PathBuf::from(line)),
            SearchMode::Similar => Command::Similar(line.to_string()),
        },
    }
}

/// Runs one command. Search failures are already reflected in the
/// orchestrator's error banner, so they are only logged here.
pub async fn execute(orch: &SearchOrchestrator, command: Command) -> (Flow, Option<String>) {
    let locale = orch.locale();
    let outcome = match command {
        Command::Text(query) => orch.submit_text(&query).await,
        Command::Image(path) => orch.submit_image_file(&path).await,
        Command::Similar(id) => orch.find_similar(&id).await,
        Command::More => orch.show_more().await,
        Command::Mode(mode) => {
            orch.set_mode(mode).await;
            Ok(())
        }
        Command::Status | Command::Empty => Ok(()),
        Command::Help => return (Flow::Continue, Some(i18n::ts(locale, "help"))),
        Command::Quit => return (Flow::Quit, None),
        Command::Unknown(line) => {
            let message = i18n::t(locale, "error_unknown_command", &[("command", &line)]);
            return (Flow::Continue, Some(message));
        }
    };
    if let Err(e) = outcome {
        debug!("Command failed: {}", e);
    }
    (Flow::Continue, None)
}

pub async fn run_repl(orch: &SearchOrchestrator, dark_mode: bool) -> anyhow::Result<()> {
    let opts = ViewOptions {
        locale: orch.locale(),
        dark_mode,
    };
    println!("{}", ui::render(&orch.snapshot().await, opts));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mode = orch.snapshot().await.mode;
        let command = parse_command(&line, mode);
        let (flow, message) = execute(orch, command).await;
        if flow == Flow::Quit {
            break;
        }
        if let Some(message) = message {
            println!("{}", message);
            continue;
        }
        println!("{}", ui::render(&orch.snapshot().await, opts));
    }

    info!("Input closed, leaving REPL");
    Ok(())
}
