use itertools::Itertools;
use std::collections::BTreeSet;

use crate::exam::{QuestionView, Report};
use crate::output::{ExamOutput, Message};

const HELP: &str = "**Commands**
- `import <path>` load a question bank from a JSON file
- `status` show how many questions are saved
- `clear` delete the saved question bank
- `start [random|ordered]` begin an exam
- `show` show the current question again
- `answer <keys>` select options for the current question, e.g. `answer A C`
- `next [keys]` / `prev [keys]` move between questions, saving the keys first if given
- `submit [keys]` hand in the exam, saving the keys first if given
- `report` show the results of the last submitted exam again
- `quit` leave";

#[derive(Clone, Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }

    fn format_keys(keys: &BTreeSet<String>) -> String {
        if keys.is_empty() {
            "Unanswered".to_owned()
        } else {
            keys.iter().join(", ")
        }
    }

    fn format_question(view: &QuestionView) -> String {
        let mut text = format!("Question {} / {}\n{}", view.number, view.total, view.question_text);
        if !view.content.is_empty() {
            text += &format!("\n{}", view.content);
        }
        for (key, option) in &view.options {
            let checked = view.selected.contains(key);
            let marker = match (view.is_multiple_choice, checked) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(o)",
                (false, false) => "( )",
            };
            text += &format!("\n  {} {}. {}", marker, key, option);
        }
        if view.is_multiple_choice {
            text += "\nSelect all that apply.";
        } else {
            text += "\nSelect one answer.";
        }
        text
    }

    fn format_report(report: &Report) -> String {
        let mut text = format!(
            "Score: {} points ({} correct out of {})",
            report.percentage, report.correct_count, report.total
        );
        for (index, item) in report.items.iter().enumerate() {
            let mark = if item.is_correct { "✅" } else { "❌" };
            text += &format!(
                "\n\n{} Q{}. {}\n   Your answer: {} | Correct answer: {}",
                mark,
                index + 1,
                item.question_text,
                Self::format_keys(&item.user_answer),
                item.correct_answer.iter().join(", ")
            );
            text += "\n   Key points:";
            for key_point in &item.key_points {
                text += &format!("\n   - {}", key_point);
            }
        }
        text
    }

    fn interpret_message(&self, message: &Message) -> String {
        use Message::*;
        match message {
            AnswerRecorded(keys) if keys.is_empty() => "Answer cleared.".into(),
            AnswerRecorded(keys) => format!("Answer saved: {}", keys.join(", ")),
            BankCleared => "Question bank cleared.".into(),
            BankImported(count) => format!("Loaded {} questions.", count),
            BankStatus(status) if status.count > 0 => {
                format!("✅ {} questions saved", status.count)
            }
            BankStatus(_) => "❌ No question bank loaded".into(),
            Error(description) => format!("⚠️ {}", description),
            ExamBegins { total, randomized } => format!(
                "📋 The exam begins: {} questions{}.",
                total,
                if *randomized { " in random order" } else { "" }
            ),
            ExamResults(report) => Self::format_report(report),
            Help => HELP.into(),
            QuestionShown(view) => Self::format_question(view),
            SubmitCancelled => "Submission cancelled, the exam continues.".into(),
            SubmitConfirm { unanswered: 0 } => "Submit your answers? [y/N]".into(),
            SubmitConfirm { unanswered } => format!(
                "{} questions are still unanswered. Submit anyway? [y/N]",
                unanswered
            ),
        }
    }
}

impl ExamOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        println!("{}\n", self.interpret_message(message));
    }
}
