use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum QuestionIssue {
    #[error("expected a question object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` has the wrong type")]
    WrongFieldType(&'static str),
    #[error("correct answer `{0}` is not one of the options")]
    UnknownCorrectKey(String),
}

fn serialize_options<S>(options: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(options.iter().map(|(key, text)| (key, text)))
}

/// One entry of the question bank, in the same shape as the import file.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Question {
    pub question_text: String,
    pub content: String,
    /// Option keys and texts, in display order.
    #[serde(serialize_with = "serialize_options")]
    pub options: Vec<(String, String)>,
    pub correct_answer: Vec<String>,
    pub key_points: Vec<String>,
}

impl Question {
    /// Reads a question out of an arbitrary JSON value. Fields that are missing or
    /// have the wrong type fall back to their defaults and are reported as issues.
    pub fn from_value(value: &Value) -> (Question, Vec<QuestionIssue>) {
        let fields = match value.as_object() {
            Some(fields) => fields,
            None => return (Question::default(), vec![QuestionIssue::NotAnObject]),
        };

        let mut issues = Vec::new();
        let question = Question {
            question_text: read_text(fields, "question_text", true, &mut issues),
            content: read_text(fields, "content", false, &mut issues),
            options: read_options(fields, &mut issues),
            correct_answer: read_text_list(fields, "correct_answer", &mut issues),
            key_points: read_text_list(fields, "key_points", &mut issues),
        };
        issues.extend(question.validate());
        (question, issues)
    }

    pub fn validate(&self) -> Vec<QuestionIssue> {
        self.correct_answer
            .iter()
            .filter(|key| !self.has_option(key))
            .map(|key| QuestionIssue::UnknownCorrectKey(key.clone()))
            .collect()
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|(k, _)| k == key)
    }

    pub fn correct_keys(&self) -> BTreeSet<String> {
        self.correct_answer.iter().cloned().collect()
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.correct_keys().len() > 1
    }
}

fn read_field<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
    required: bool,
    issues: &mut Vec<QuestionIssue>,
) -> Option<&'a Value> {
    match fields.get(name) {
        None | Some(Value::Null) => {
            if required {
                issues.push(QuestionIssue::MissingField(name));
            }
            None
        }
        Some(value) => Some(value),
    }
}

fn read_text(
    fields: &Map<String, Value>,
    name: &'static str,
    required: bool,
    issues: &mut Vec<QuestionIssue>,
) -> String {
    match read_field(fields, name, required, issues) {
        Some(value) => to_text(value, name, issues).unwrap_or_default(),
        None => String::new(),
    }
}

/// Strings are taken as-is. Numbers and booleans are kept in their JSON text
/// form but still reported, anything else is dropped.
fn to_text(
    value: &Value,
    name: &'static str,
    issues: &mut Vec<QuestionIssue>,
) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(_) | Value::Bool(_) => {
            issues.push(QuestionIssue::WrongFieldType(name));
            Some(value.to_string())
        }
        _ => {
            issues.push(QuestionIssue::WrongFieldType(name));
            None
        }
    }
}

fn read_text_list(
    fields: &Map<String, Value>,
    name: &'static str,
    issues: &mut Vec<QuestionIssue>,
) -> Vec<String> {
    let values = match read_field(fields, name, true, issues) {
        Some(Value::Array(values)) => values,
        Some(_) => {
            issues.push(QuestionIssue::WrongFieldType(name));
            return Vec::new();
        }
        None => return Vec::new(),
    };

    values
        .iter()
        .filter_map(|value| to_text(value, name, issues))
        .collect()
}

fn read_options(
    fields: &Map<String, Value>,
    issues: &mut Vec<QuestionIssue>,
) -> Vec<(String, String)> {
    let entries = match read_field(fields, "options", true, issues) {
        Some(Value::Object(entries)) => entries,
        Some(_) => {
            issues.push(QuestionIssue::WrongFieldType("options"));
            return Vec::new();
        }
        None => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|(key, value)| {
            to_text(value, "options", issues).map(|text| (key.clone(), text))
        })
        .collect()
}
