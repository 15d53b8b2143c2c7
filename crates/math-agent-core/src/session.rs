//! Per-session state shared by any front end.
//!
//! ```text
//! Idle ──begin_input──▶ AwaitingInput ──begin_solve──▶ Submitted
//!   ▲                        │ (empty)                    │
//!   └────── warning ◀────────┘            finish_solve ───┤
//!   ▲                                                     │
//!   └──────── error ◀──────────── Err ────────────────────┤
//!                                                        Ok
//!                                                         ▼
//!                 ReportReady ◀──prepare_report── DisplayingResult
//! ```
//!
//! A session never runs two solves at once, and nothing in it is shared
//! with another session.

use tracing::{info, warn};

use crate::error::{SessionError, SolveError};
use crate::report::{self, Report};
use crate::solver::Solver;

pub const EMPTY_QUESTION_WARNING: &str = "Please enter a math question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingInput,
    Submitted,
    DisplayingResult,
    ReportReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    question: String,
    answer: Option<String>,
    report: Option<Report>,
    notice: Option<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_solving(&self) -> bool {
        self.phase == Phase::Submitted
    }

    pub fn begin_input(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::AwaitingInput;
        }
    }

    /// Guard and enter `Submitted`. Returns the question to send, or `None`
    /// when the input is blank (a warning is left behind) or a solve is
    /// already running.
    pub fn begin_solve(&mut self, input: &str) -> Option<String> {
        if self.is_solving() {
            return None;
        }
        if input.trim().is_empty() {
            self.phase = Phase::Idle;
            self.notice = Some(Notice::Warning(EMPTY_QUESTION_WARNING.to_string()));
            return None;
        }

        self.phase = Phase::Submitted;
        self.question = input.to_string();
        self.answer = None;
        self.report = None;
        self.notice = None;
        Some(self.question.clone())
    }

    pub fn finish_solve(&mut self, result: Result<String, SolveError>) {
        match result {
            Ok(answer) => {
                self.answer = Some(answer);
                self.phase = Phase::DisplayingResult;
            }
            Err(e) => {
                warn!("solve failed: {}", e);
                self.phase = Phase::Idle;
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    /// Run a whole solve in place: guard, call, record.
    pub async fn solve(&mut self, solver: &Solver, input: &str) -> Phase {
        if let Some(question) = self.begin_solve(input) {
            let result = solver.solve(&question).await;
            self.finish_solve(result);
        }
        self.phase
    }

    /// Build (or rebuild) the PDF from the held question and answer.
    pub fn prepare_report(&mut self) -> Result<&Report, SessionError> {
        let answer = match self.phase {
            Phase::DisplayingResult | Phase::ReportReady => {
                self.answer.as_deref().ok_or(SessionError::NoAnswer)?
            }
            _ => return Err(SessionError::NoAnswer),
        };

        let report = report::render(&self.question, answer)?;
        info!(pages = report.page_count(), "report ready");
        self.phase = Phase::ReportReady;
        let report = self.report.insert(report);
        Ok(&*report)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
