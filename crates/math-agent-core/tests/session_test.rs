use async_trait::async_trait;
use math_agent_core::{Notice, Phase, Session, SolveError, Solver, TextGenerator};
use std::sync::{Arc, Mutex};

/// Records every prompt and answers with a canned result.
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
    reply: Result<String, ()>,
}

impl RecordingGenerator {
    fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Ok(reply.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Err(()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, SolveError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(|_| SolveError::Api {
            status: 500,
            message: "internal".to_string(),
        })
    }
}

#[tokio::test]
async fn non_empty_question_makes_exactly_one_call() {
    let generator = RecordingGenerator::answering("x = -1 (double root)");
    let solver = Solver::new(generator.clone());
    let mut session = Session::new();

    let phase = session.solve(&solver, "Solve x^2 + 2x + 1 = 0").await;

    assert_eq!(phase, Phase::DisplayingResult);
    assert_eq!(
        generator.prompts(),
        vec!["You are a helpful math expert. Solve or explain this:\nSolve x^2 + 2x + 1 = 0"]
    );
    assert_eq!(session.answer(), Some("x = -1 (double root)"));
}

#[tokio::test]
async fn blank_questions_never_reach_the_solver() {
    let generator = RecordingGenerator::answering("unused");
    let solver = Solver::new(generator.clone());

    for input in ["", "   ", "\n\t"] {
        let mut session = Session::new();
        let phase = session.solve(&solver, input).await;

        assert_eq!(phase, Phase::Idle);
        assert!(matches!(session.notice(), Some(Notice::Warning(_))));
    }
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn solver_failure_is_visible_and_recoverable() {
    let failing = Solver::new(RecordingGenerator::failing());
    let mut session = Session::new();

    assert_eq!(session.solve(&failing, "1 + 1").await, Phase::Idle);
    match session.notice() {
        Some(Notice::Error(msg)) => assert!(msg.contains("500")),
        other => panic!("expected error notice, got {other:?}"),
    }

    let working = Solver::new(RecordingGenerator::answering("2"));
    assert_eq!(session.solve(&working, "1 + 1").await, Phase::DisplayingResult);
    assert!(session.notice().is_none());
}

#[tokio::test]
async fn full_flow_ends_with_report_ready() {
    let solver = Solver::new(RecordingGenerator::answering("x = -1 (double root)"));
    let mut session = Session::new();

    session.begin_input();
    assert_eq!(session.phase(), Phase::AwaitingInput);

    session.solve(&solver, "Solve x^2 + 2x + 1 = 0").await;
    let bytes = session.prepare_report().unwrap().as_bytes().to_vec();

    assert_eq!(session.phase(), Phase::ReportReady);
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let solver = Solver::new(RecordingGenerator::answering("42"));
    let mut first = Session::new();
    let second = Session::new();

    first.solve(&solver, "6 * 7").await;

    assert_eq!(first.phase(), Phase::DisplayingResult);
    assert_eq!(second.phase(), Phase::Idle);
    assert!(second.answer().is_none());
}
