use anyhow::Result;
use log::info;
use std::io::{self, Write};

use quiz_bank::commands::{self, Flow};
use quiz_bank::output::terminal::TerminalOutput;
use quiz_bank::output::{ExamOutput, Message};
use quiz_bank::quizmaster::Quizmaster;
use quiz_bank::settings::Settings;
use quiz_bank::storage::FileStorage;

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn read_confirmation() -> bool {
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        _ => false,
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let settings = Settings::from_env()?;
    let data_dir = settings.storage_dir()?;
    info!("Using question bank storage at {:?}", data_dir);

    let output = TerminalOutput::new();
    let mut quizmaster = Quizmaster::new(FileStorage::new(data_dir), output, &settings);
    quizmaster.output().say(&Message::Help);
    quizmaster.bank_status();

    let mut line = String::new();
    loop {
        prompt()?;
        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let flow = commands::dispatch(&mut quizmaster, &settings, &line, read_confirmation);
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
