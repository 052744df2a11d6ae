use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::output::{ExamOutput, Message};
use crate::quizmaster::Quizmaster;
use crate::settings::Settings;
use crate::storage::Storage;

#[cfg(test)]
mod tests;

lazy_static! {
    static ref ANSWER_KEY_REGEX: Regex = Regex::new("[^\\s,;]+").unwrap();
}

const ERROR_UNKNOWN_COMMAND: &str = "type `help` to see the available commands";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Import(PathBuf),
    Status,
    Clear,
    Start(Option<bool>),
    Show,
    Answer(Vec<String>),
    Next(Option<Vec<String>>),
    Prev(Option<Vec<String>>),
    Submit(Option<Vec<String>>),
    Report,
    Help,
    Quit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn split_keys(text: &str) -> Vec<String> {
    ANSWER_KEY_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_owned())
        .collect()
}

fn optional_keys(text: &str) -> Option<Vec<String>> {
    if text.is_empty() {
        None
    } else {
        Some(split_keys(text))
    }
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (name, rest) = match line.find(char::is_whitespace) {
        Some(index) => (&line[..index], line[index..].trim()),
        None => (line, ""),
    };

    let command = match name.trim_start_matches('!').to_lowercase().as_str() {
        "import" => {
            if rest.is_empty() {
                return Err(anyhow!("Filename cannot be blank"));
            }
            Command::Import(PathBuf::from(rest))
        }
        "status" => Command::Status,
        "clear" => Command::Clear,
        "start" => match rest.to_lowercase().as_str() {
            "" => Command::Start(None),
            "random" | "shuffle" => Command::Start(Some(true)),
            "ordered" | "fixed" => Command::Start(Some(false)),
            other => {
                return Err(anyhow!(
                    "Unknown exam order `{}`, use `random` or `ordered`",
                    other
                ))
            }
        },
        "show" => Command::Show,
        "answer" => Command::Answer(split_keys(rest)),
        "next" => Command::Next(optional_keys(rest)),
        "prev" => Command::Prev(optional_keys(rest)),
        "submit" => Command::Submit(optional_keys(rest)),
        "report" | "results" => Command::Report,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(anyhow!(
                "Unknown command `{}`, {}",
                other,
                ERROR_UNKNOWN_COMMAND
            ))
        }
    };
    Ok(command)
}

// Front end checks: typed keys must name options of the current question,
// and single-answer questions take at most one key.
fn resolve_keys<S: Storage, O: ExamOutput>(
    quizmaster: &Quizmaster<S, O>,
    typed: Vec<String>,
) -> Result<Vec<String>> {
    let view = quizmaster.current_question()?;
    let mut keys = BTreeSet::new();
    for key in typed {
        match view.resolve_key(&key) {
            Some(option_key) => keys.insert(option_key.to_owned()),
            None => {
                return Err(anyhow!(
                    "`{}` is not an option of question {}",
                    key,
                    view.number
                ))
            }
        };
    }
    if !view.is_multiple_choice && keys.len() > 1 {
        return Err(anyhow!("Question {} takes a single answer", view.number));
    }
    Ok(keys.into_iter().collect())
}

fn record_keys<S: Storage, O: ExamOutput>(
    quizmaster: &mut Quizmaster<S, O>,
    typed: Vec<String>,
) -> Result<()> {
    let keys = resolve_keys(quizmaster, typed)?;
    quizmaster.record_answer(keys)
}

pub fn execute<S, O, F>(
    quizmaster: &mut Quizmaster<S, O>,
    settings: &Settings,
    command: Command,
    confirm: F,
) -> Result<Flow>
where
    S: Storage,
    O: ExamOutput,
    F: FnOnce() -> bool,
{
    match command {
        Command::Import(path) => {
            quizmaster.import_bank_file(&path)?;
        }
        Command::Status => {
            quizmaster.bank_status();
        }
        Command::Clear => quizmaster.clear_bank()?,
        Command::Start(randomize) => {
            quizmaster.start_exam(randomize.unwrap_or(settings.randomize_by_default))?
        }
        Command::Show => {
            quizmaster.show_question()?;
        }
        Command::Answer(keys) => record_keys(quizmaster, keys)?,
        Command::Next(keys) => {
            if let Some(keys) = keys {
                record_keys(quizmaster, keys)?;
            }
            quizmaster.next()?;
        }
        Command::Prev(keys) => {
            if let Some(keys) = keys {
                record_keys(quizmaster, keys)?;
            }
            quizmaster.prev()?;
        }
        Command::Submit(keys) => {
            if let Some(keys) = keys {
                record_keys(quizmaster, keys)?;
            }
            let unanswered = quizmaster.unanswered_count()?;
            quizmaster
                .output()
                .say(&Message::SubmitConfirm { unanswered });
            if confirm() {
                quizmaster.submit()?;
            } else {
                quizmaster.output().say(&Message::SubmitCancelled);
            }
        }
        Command::Report => {
            quizmaster.show_report()?;
        }
        Command::Help => quizmaster.output().say(&Message::Help),
        Command::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue)
}

/// Parses and runs one line of input. Errors are reported through the output
/// and never end the session.
pub fn dispatch<S, O, F>(
    quizmaster: &mut Quizmaster<S, O>,
    settings: &Settings,
    line: &str,
    confirm: F,
) -> Flow
where
    S: Storage,
    O: ExamOutput,
    F: FnOnce() -> bool,
{
    let result = parse_command(line)
        .and_then(|command| execute(quizmaster, settings, command, confirm));
    match result {
        Ok(flow) => flow,
        Err(e) => {
            warn!("{:#}", e);
            quizmaster.output().say(&Message::Error(format!("{:#}", e)));
            Flow::Continue
        }
    }
}
