use std::{
    io::{self, BufRead},
    thread::{self, JoinHandle},
};

use client_core::{Action, SampleMessage};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: replaces the input and checks it.
    Check(String),
    /// Zero-based sample index.
    Sample(usize),
    ListSamples,
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a message and press enter to check it.
  :sample N   load sample N and check it shortly after
  :samples    list the sample messages
  :clear      reset the input and the result
  :help       show this help
  :quit       leave";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Ok(Command::Check(line.trim_end_matches(['\r', '\n']).to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("quit" | "q" | "exit", None) => Ok(Command::Quit),
        ("clear", None) => Ok(Command::Clear),
        ("samples", None) => Ok(Command::ListSamples),
        ("help" | "h", None) => Ok(Command::Help),
        ("sample", Some(number)) => match number.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Sample(n - 1)),
            _ => Err(format!("sample number must be 1 or greater, got '{number}'")),
        },
        ("sample", None) => Err("usage: :sample N".to_string()),
        _ => Err(format!("unknown command ':{rest}', try :help")),
    }
}

/// Actions a command turns into. Listing and help never reach the controller.
pub fn actions_for(command: Command) -> Vec<Action> {
    match command {
        Command::Check(text) => vec![Action::Edit(text), Action::Submit],
        Command::Sample(index) => vec![Action::PickSample(index)],
        Command::Clear => vec![Action::Clear],
        Command::Quit => vec![Action::Quit],
        Command::ListSamples | Command::Help => Vec::new(),
    }
}

pub fn sample_listing(samples: &[SampleMessage]) -> String {
    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| format!("  {}. {}: {}", i + 1, sample.label, sample.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads stdin on a plain thread and forwards actions until EOF or `:quit`.
pub fn spawn_stdin_reader(
    actions: UnboundedSender<Action>,
    samples: &'static [SampleMessage],
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        debug!(%err, "stdin read failed");
                        break;
                    }
                };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{message}");
                        continue;
                    }
                };
                match &command {
                    Command::ListSamples => println!("{}", sample_listing(samples)),
                    Command::Help => println!("{HELP}"),
                    _ => {}
                }
                let quit = command == Command::Quit;
                for action in actions_for(command) {
                    if actions.send(action).is_err() {
                        return;
                    }
                }
                if quit {
                    return;
                }
            }
            let _ = actions.send(Action::Quit);
        })
}
