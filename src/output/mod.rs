use crate::bank::BankStatus;
use crate::exam::{QuestionView, Report};

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    AnswerRecorded(Vec<String>),
    BankCleared,
    BankImported(usize),
    BankStatus(BankStatus),
    Error(String),
    ExamBegins { total: usize, randomized: bool },
    ExamResults(Report),
    Help,
    QuestionShown(QuestionView),
    SubmitCancelled,
    SubmitConfirm { unanswered: usize },
}

pub trait ExamOutput {
    fn say(&self, message: &Message);
}
