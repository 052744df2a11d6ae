use std::collections::BTreeSet;

use crate::bank::Question;

/// Everything a front end needs to draw the question under the cursor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionView {
    /// 1-based position within the exam.
    pub number: usize,
    pub total: usize,
    pub question_text: String,
    pub content: String,
    pub options: Vec<(String, String)>,
    pub is_multiple_choice: bool,
    /// Keys saved for this question so far, if any.
    pub selected: BTreeSet<String>,
}

impl QuestionView {
    pub fn new(
        question: &Question,
        position: usize,
        total: usize,
        selected: Option<&BTreeSet<String>>,
    ) -> Self {
        QuestionView {
            number: position + 1,
            total,
            question_text: question.question_text.clone(),
            content: question.content.clone(),
            options: question.options.clone(),
            is_multiple_choice: question.is_multiple_choice(),
            selected: selected.cloned().unwrap_or_default(),
        }
    }

    /// Finds the option key matching `typed`. An exact match wins, otherwise
    /// case is ignored.
    pub fn resolve_key(&self, typed: &str) -> Option<&str> {
        let mut keys = self.options.iter().map(|(key, _)| key.as_str());
        keys.clone()
            .find(|key| *key == typed)
            .or_else(|| keys.find(|key| key.eq_ignore_ascii_case(typed)))
    }
}
