use anyhow::{anyhow, Context, Result};
use log::info;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::bank::{parse_with_mode, BankStatus, BankStore, ParseMode};
use crate::exam::{ExamSession, Phase, QuestionView, Report};
use crate::output::{ExamOutput, Message};
use crate::settings::Settings;
use crate::storage::Storage;


/// The commands a front end may issue: bank management and one exam at a time.
pub struct Quizmaster<S: Storage, O: ExamOutput> {
    bank: BankStore<S>,
    session: Option<ExamSession>,
    last_report: Option<Report>,
    parse_mode: ParseMode,
    output: O,
}

impl<S: Storage, O: ExamOutput> Quizmaster<S, O> {
    pub fn new(storage: S, output: O, settings: &Settings) -> Self {
        Quizmaster {
            bank: BankStore::open(storage, &settings.slot),
            session: None,
            last_report: None,
            parse_mode: settings.parse_mode,
            output,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn phase(&self) -> Phase {
        self.session
            .as_ref()
            .map(|s| s.phase())
            .unwrap_or(Phase::NotStarted)
    }

    /// Replaces the whole bank with the questions in `raw`. On failure the
    /// previous bank is left untouched.
    pub fn import_bank(&mut self, raw: &str) -> Result<usize> {
        let questions = parse_with_mode(raw, self.parse_mode)?;
        let count = questions.len();
        self.bank
            .replace(questions)
            .context("Could not save the imported question bank")?;
        info!("Imported {} questions", count);
        self.output.say(&Message::BankImported(count));
        self.output.say(&Message::BankStatus(self.bank.status()));
        Ok(count)
    }

    pub fn import_bank_file(&mut self, path: &Path) -> Result<usize> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Could not read question bank from {:?}", path))?;
        self.import_bank(&raw)
    }

    pub fn bank_status(&self) -> BankStatus {
        let status = self.bank.status();
        self.output.say(&Message::BankStatus(status));
        status
    }

    pub fn clear_bank(&mut self) -> Result<()> {
        self.bank
            .clear()
            .context("Could not delete the saved question bank")?;
        self.output.say(&Message::BankCleared);
        self.output.say(&Message::BankStatus(self.bank.status()));
        Ok(())
    }

    pub fn start_exam(&mut self, randomize: bool) -> Result<()> {
        if self.phase() == Phase::InProgress {
            return Err(anyhow!(
                "An exam is already in progress, submit it before starting another one"
            ));
        }
        let session = ExamSession::start(self.bank.questions(), randomize)?;
        self.output.say(&Message::ExamBegins {
            total: session.len(),
            randomized: randomize,
        });
        self.session = Some(session);
        self.show_question()?;
        Ok(())
    }

    fn active_session(&self) -> Result<&ExamSession> {
        self.session
            .as_ref()
            .filter(|s| s.phase() == Phase::InProgress)
            .context("There is no exam in progress, use `start` to begin one")
    }

    fn active_session_mut(&mut self) -> Result<&mut ExamSession> {
        self.session
            .as_mut()
            .filter(|s| s.phase() == Phase::InProgress)
            .context("There is no exam in progress, use `start` to begin one")
    }

    pub fn current_question(&self) -> Result<QuestionView> {
        Ok(self.active_session()?.view()?)
    }

    pub fn show_question(&self) -> Result<QuestionView> {
        let view = self.current_question()?;
        self.output.say(&Message::QuestionShown(view.clone()));
        Ok(view)
    }

    pub fn record_answer(&mut self, keys: Vec<String>) -> Result<()> {
        let selected: BTreeSet<String> = keys.into_iter().collect();
        let recorded = selected.iter().cloned().collect();
        self.active_session_mut()?.record_answer(selected)?;
        self.output.say(&Message::AnswerRecorded(recorded));
        Ok(())
    }

    pub fn next(&mut self) -> Result<QuestionView> {
        self.active_session_mut()?.next()?;
        self.show_question()
    }

    pub fn prev(&mut self) -> Result<QuestionView> {
        self.active_session_mut()?.prev()?;
        self.show_question()
    }

    pub fn unanswered_count(&self) -> Result<usize> {
        Ok(self.active_session()?.unanswered_count())
    }

    pub fn submit(&mut self) -> Result<Report> {
        let report = self.active_session_mut()?.submit()?;
        self.output.say(&Message::ExamResults(report.clone()));
        self.last_report = Some(report.clone());
        Ok(report)
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// Shows the results of the most recently submitted exam again.
    pub fn show_report(&self) -> Result<&Report> {
        let report = self
            .last_report()
            .context("No exam has been submitted yet")?;
        self.output.say(&Message::ExamResults(report.clone()));
        Ok(report)
    }
}
