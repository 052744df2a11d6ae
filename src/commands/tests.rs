use super::*;
use crate::exam::Phase;
use crate::output::mock::MockExamOutput;
use crate::storage::memory::MemoryStorage;

const BANK: &str = r#"[
    {
        "question_text": "Capital of France?",
        "options": { "a": "Lyon", "b": "Paris" },
        "correct_answer": ["b"],
        "key_points": ["Paris has been the capital since 987"]
    },
    {
        "question_text": "Which are rivers?",
        "options": { "A": "Seine", "B": "Alps", "C": "Loire" },
        "correct_answer": ["A", "C"],
        "key_points": []
    }
]"#;

struct Context {
    quizmaster: Quizmaster<MemoryStorage, MockExamOutput>,
    settings: Settings,
    output: MockExamOutput,
}

impl Context {
    fn new() -> Self {
        let settings = Settings::default();
        let output = MockExamOutput::new();
        let mut quizmaster = Quizmaster::new(MemoryStorage::new(), output.clone(), &settings);
        quizmaster.import_bank(BANK).unwrap();
        output.flush();
        Context {
            quizmaster,
            settings,
            output,
        }
    }

    fn run(&mut self, line: &str) -> Flow {
        dispatch(&mut self.quizmaster, &self.settings, line, || true)
    }

    fn run_declining(&mut self, line: &str) -> Flow {
        dispatch(&mut self.quizmaster, &self.settings, line, || false)
    }
}

fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn parses_commands() {
    assert_eq!(
        parse_command("import  banks/final exam.json ").unwrap(),
        Command::Import(PathBuf::from("banks/final exam.json"))
    );
    assert_eq!(parse_command("STATUS").unwrap(), Command::Status);
    assert_eq!(parse_command("!clear").unwrap(), Command::Clear);
    assert_eq!(parse_command("start").unwrap(), Command::Start(None));
    assert_eq!(
        parse_command("start random").unwrap(),
        Command::Start(Some(true))
    );
    assert_eq!(
        parse_command("start ordered").unwrap(),
        Command::Start(Some(false))
    );
    assert_eq!(
        parse_command("answer A, c").unwrap(),
        Command::Answer(keys(&["A", "c"]))
    );
    assert_eq!(parse_command("next").unwrap(), Command::Next(None));
    assert_eq!(
        parse_command("prev B").unwrap(),
        Command::Prev(Some(keys(&["B"])))
    );
    assert_eq!(parse_command("submit").unwrap(), Command::Submit(None));
    assert_eq!(
        parse_command("submit a;C").unwrap(),
        Command::Submit(Some(keys(&["a", "C"])))
    );
    assert_eq!(parse_command("report").unwrap(), Command::Report);
    assert_eq!(parse_command("quit").unwrap(), Command::Quit);
}

#[test]
fn rejects_bad_commands() {
    assert!(parse_command("import").is_err());
    assert!(parse_command("start sideways").is_err());
    assert!(parse_command("dance").is_err());
}

#[test]
fn splits_answer_keys() {
    assert_eq!(split_keys("A,B ; C  D"), keys(&["A", "B", "C", "D"]));
    assert!(split_keys("  ").is_empty());
}

#[test]
fn errors_are_reported_not_fatal() {
    let mut ctx = Context::new();
    assert_eq!(ctx.run("dance"), Flow::Continue);
    assert_eq!(ctx.run("next"), Flow::Continue);
    assert!(ctx.output.contains_error());
}

#[test]
fn quit_ends_the_loop() {
    let mut ctx = Context::new();
    assert_eq!(ctx.run("quit"), Flow::Quit);
}

#[test]
fn answer_keys_ignore_case() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.run("answer B");
    assert!(ctx
        .output
        .contains_message(&Message::AnswerRecorded(keys(&["b"]))));
}

#[test]
fn single_answer_questions_take_one_key() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.output.flush();
    ctx.run("answer a b");
    assert!(ctx.output.contains_error());
    assert_eq!(ctx.quizmaster.unanswered_count().unwrap(), 2);
}

#[test]
fn unknown_keys_are_refused() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.output.flush();
    ctx.run("answer z");
    assert!(ctx.output.contains_error());
}

#[test]
fn next_saves_keys_before_moving() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.run("next b");
    let view = ctx.quizmaster.current_question().unwrap();
    assert_eq!(view.number, 2);
    ctx.run("prev a c");
    let view = ctx.quizmaster.current_question().unwrap();
    assert_eq!(view.number, 1);
    assert!(view.selected.contains("b"));
    assert_eq!(ctx.quizmaster.unanswered_count().unwrap(), 0);
}

#[test]
fn declined_submission_keeps_exam_running() {
    let mut ctx = Context::new();
    ctx.run("start");
    ctx.output.flush();
    ctx.run_declining("submit");
    assert_eq!(ctx.quizmaster.phase(), Phase::InProgress);
    assert_eq!(
        ctx.output.flush(),
        [
            Message::SubmitConfirm { unanswered: 2 },
            Message::SubmitCancelled
        ]
    );
}

#[test]
fn full_exam_through_commands() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.run("answer B");
    ctx.run("next");
    ctx.run("answer C, A");
    ctx.run("submit");
    assert_eq!(ctx.quizmaster.phase(), Phase::Submitted);

    let report = ctx.quizmaster.last_report().unwrap();
    assert_eq!(report.correct_count, 2);
    assert_eq!(report.percentage, 100);
    assert!(!ctx.output.contains_error());
}

#[test]
fn submit_saves_keys_first() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.run("next");
    ctx.output.flush();
    ctx.run("submit c a");
    assert_eq!(ctx.quizmaster.phase(), Phase::Submitted);
    assert!(ctx
        .output
        .contains_message(&Message::SubmitConfirm { unanswered: 1 }));

    let report = ctx.quizmaster.last_report().unwrap();
    assert!(!report.items[0].is_correct);
    assert!(report.items[1].is_correct);
    assert_eq!(report.percentage, 50);
}

#[test]
fn submit_with_bad_keys_does_not_submit() {
    let mut ctx = Context::new();
    ctx.run("start ordered");
    ctx.output.flush();
    ctx.run("submit z");
    assert!(ctx.output.contains_error());
    assert_eq!(ctx.quizmaster.phase(), Phase::InProgress);
}

#[test]
fn report_command_repeats_results() {
    let mut ctx = Context::new();
    ctx.run("report");
    assert!(ctx.output.contains_error());

    ctx.run("start ordered");
    ctx.run("submit b");
    let report = ctx.quizmaster.last_report().unwrap().clone();
    ctx.output.flush();
    ctx.run("report");
    assert_eq!(ctx.output.flush(), [Message::ExamResults(report)]);
}

#[test]
fn numeric_keys_can_be_answered() {
    let mut ctx = Context::new();
    ctx.quizmaster
        .import_bank(r#"[{ "question_text": "Pick", "options": { "1": 1, "2": 2 }, "correct_answer": [2], "key_points": [] }]"#)
        .unwrap();
    ctx.run("start");
    ctx.run("submit 2");
    assert!(!ctx.output.contains_error());
    assert_eq!(ctx.quizmaster.last_report().unwrap().correct_count, 1);
}
