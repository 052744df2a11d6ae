use std::collections::BTreeSet;
use thiserror::Error;

use crate::bank::Question;
use crate::exam::AnswerSlot;


#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ScoreError {
    #[error("Cannot score an exam without questions")]
    EmptyQuestionSet,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportItem {
    pub question_text: String,
    pub is_correct: bool,
    /// Empty when the question was left unanswered.
    pub user_answer: BTreeSet<String>,
    pub correct_answer: BTreeSet<String>,
    pub key_points: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    pub correct_count: usize,
    pub total: usize,
    pub percentage: u32,
    pub items: Vec<ReportItem>,
}

// Rounds half up, so that a perfect score is exactly 100.
fn compute_percentage(correct_count: usize, total: usize) -> u32 {
    ((correct_count * 200 + total) / (total * 2)) as u32
}

/// Grades every question by exact set equality between the selected keys and
/// the correct keys. Slots missing from `answers` count as unanswered.
pub fn score(questions: &[Question], answers: &[AnswerSlot]) -> Result<Report, ScoreError> {
    if questions.is_empty() {
        return Err(ScoreError::EmptyQuestionSet);
    }

    let items: Vec<ReportItem> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_answer = answers
                .get(index)
                .and_then(|slot| slot.clone())
                .unwrap_or_default();
            let correct_answer = question.correct_keys();
            ReportItem {
                question_text: question.question_text.clone(),
                is_correct: user_answer == correct_answer,
                user_answer,
                correct_answer,
                key_points: question.key_points.clone(),
            }
        })
        .collect();

    let correct_count = items.iter().filter(|item| item.is_correct).count();
    let total = items.len();
    Ok(Report {
        correct_count,
        total,
        percentage: compute_percentage(correct_count, total),
        items,
    })
}
