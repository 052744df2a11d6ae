use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::bank::question::{Question, QuestionIssue};


const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseMode {
    /// Every element of the list becomes a question, problems are only logged.
    Lenient,
    /// The first problem in any element rejects the whole import.
    Strict,
}

impl Default for ParseMode {
    fn default() -> Self {
        ParseMode::Lenient
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("The question bank is not valid JSON: {0}")]
    MalformedSyntax(#[source] serde_json::Error),
    #[error("The question bank must be a list of questions, found {0}")]
    WrongShape(&'static str),
    #[error("Question #{number} is invalid: {issue}")]
    InvalidQuestion { number: usize, issue: QuestionIssue },
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

pub fn parse(raw: &str) -> Result<Vec<Question>, ParseError> {
    parse_with_mode(raw, ParseMode::Lenient)
}

pub fn parse_with_mode(raw: &str, mode: ParseMode) -> Result<Vec<Question>, ParseError> {
    let raw = raw.trim_start_matches(BYTE_ORDER_MARK);
    let value: Value = serde_json::from_str(raw).map_err(ParseError::MalformedSyntax)?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => return Err(ParseError::WrongShape(describe(&other))),
    };

    let mut questions = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let number = index + 1;
        let (question, issues) = Question::from_value(element);
        if mode == ParseMode::Strict {
            if let Some(issue) = issues.into_iter().next() {
                return Err(ParseError::InvalidQuestion { number, issue });
            }
        } else {
            for issue in &issues {
                warn!("Question #{}: {}", number, issue);
            }
        }
        questions.push(question);
    }

    Ok(questions)
}
