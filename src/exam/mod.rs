use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::bank::Question;

pub mod score;
pub mod view;

pub use score::{score, Report, ScoreError};
pub use view::QuestionView;


/// Selected option keys for one question, `None` until the question is answered.
pub type AnswerSlot = Option<BTreeSet<String>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Submitted,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ExamError {
    #[error("The question bank is empty, import some questions first")]
    EmptyBank,
    #[error("There is no exam in progress")]
    NotInProgress,
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// One exam attempt over a frozen copy of the bank.
#[derive(Clone, Debug)]
pub struct ExamSession {
    questions: Vec<Question>,
    answers: Vec<AnswerSlot>,
    position: usize,
    phase: Phase,
}

impl ExamSession {
    pub fn start(bank: &[Question], randomize: bool) -> Result<ExamSession, ExamError> {
        ExamSession::start_with_rng(bank, randomize, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        bank: &[Question],
        randomize: bool,
        rng: &mut R,
    ) -> Result<ExamSession, ExamError> {
        if bank.is_empty() {
            return Err(ExamError::EmptyBank);
        }

        let mut questions = bank.to_vec();
        if randomize {
            questions.shuffle(rng);
        }

        info!(
            "Starting exam with {} questions ({})",
            questions.len(),
            if randomize { "shuffled" } else { "in bank order" }
        );
        Ok(ExamSession {
            answers: vec![None; questions.len()],
            questions,
            position: 0,
            phase: Phase::InProgress,
        })
    }

    fn ensure_in_progress(&self) -> Result<(), ExamError> {
        match self.phase {
            Phase::InProgress => Ok(()),
            _ => Err(ExamError::NotInProgress),
        }
    }

    pub fn current_question(&self) -> Result<&Question, ExamError> {
        self.ensure_in_progress()?;
        Ok(&self.questions[self.position])
    }

    pub fn view(&self) -> Result<QuestionView, ExamError> {
        let question = self.current_question()?;
        Ok(QuestionView::new(
            question,
            self.position,
            self.questions.len(),
            self.answers[self.position].as_ref(),
        ))
    }

    /// Overwrites the answer for the current question. Keys are stored as given.
    pub fn record_answer(&mut self, selected: BTreeSet<String>) -> Result<(), ExamError> {
        self.ensure_in_progress()?;
        self.answers[self.position] = Some(selected);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), ExamError> {
        self.ensure_in_progress()?;
        if self.position + 1 < self.questions.len() {
            self.position += 1;
        }
        Ok(())
    }

    pub fn prev(&mut self) -> Result<(), ExamError> {
        self.ensure_in_progress()?;
        if self.position > 0 {
            self.position -= 1;
        }
        Ok(())
    }

    pub fn submit(&mut self) -> Result<Report, ExamError> {
        self.ensure_in_progress()?;
        let report = score(&self.questions, &self.answers)?;
        self.phase = Phase::Submitted;
        info!(
            "Exam submitted: {}/{} correct ({}%)",
            report.correct_count, report.total, report.percentage
        );
        Ok(report)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerSlot] {
        &self.answers
    }

    pub fn unanswered_count(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_none()).count()
    }
}
