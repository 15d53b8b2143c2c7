use std::path::PathBuf;

use math_agent_core::{Config, Notice, Phase, Session, SolveError, Solver};
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Wrap};
use tracing::{info, warn};

use crate::markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Question input
    pub input: String,
    pub cursor: usize, // char index into `input`

    // Solution pane
    pub answer_scroll: u16,
    pub answer_height: u16, // inner height, updated during render
    pub answer_width: u16,  // inner width, updated during render
    pub solution_area: Option<Rect>,

    // Spinner frame while a solve is in flight (0-2)
    pub animation_frame: u8,

    // Last download result, shown when the session has no notice
    pub message: Option<(StatusKind, String)>,

    pub session: Session,
    pub solver: Solver,
    pub model: String,
    pub download_dir: PathBuf,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_solver(config, Solver::from_config(config))
    }

    pub fn with_solver(config: &Config, solver: Solver) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,

            input: String::new(),
            cursor: 0,

            answer_scroll: 0,
            answer_height: 0,
            answer_width: 0,
            solution_area: None,

            animation_frame: 0,

            message: None,

            session: Session::new(),
            solver,
            model: config.model.clone(),
            download_dir: config.resolved_download_dir(),
        }
    }

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.session.begin_input();
    }

    /// Guard the input and hand back the question to solve, if any.
    pub fn begin_solve(&mut self) -> Option<String> {
        let question = self.session.begin_solve(&self.input)?;
        self.input_mode = InputMode::Normal;
        self.message = None;
        self.answer_scroll = 0;
        self.animation_frame = 0;
        Some(question)
    }

    pub fn finish_solve(&mut self, result: Result<String, SolveError>) {
        self.session.finish_solve(result);
        self.answer_scroll = 0;
    }

    pub fn can_download(&self) -> bool {
        matches!(
            self.session.phase(),
            Phase::DisplayingResult | Phase::ReportReady
        )
    }

    /// Render the PDF and write it into the download directory.
    pub fn download(&mut self) {
        let report = match self.session.prepare_report() {
            Ok(report) => report,
            Err(e) => {
                self.message = Some((StatusKind::Warning, e.to_string()));
                return;
            }
        };

        match report.save_to_dir(&self.download_dir) {
            Ok(path) => {
                let omitted = report.omitted_chars();
                info!(path = %path.display(), pages = report.page_count(), omitted, "report saved");
                let mut msg =
                    format!("Saved {} ({})", path.display(), math_agent_core::Report::CONTENT_TYPE);
                if omitted > 0 {
                    // The PDF fonts only cover Latin-1
                    msg.push_str(&format!("; {omitted} non-Latin-1 characters omitted"));
                }
                self.message = Some((StatusKind::Info, msg));
            }
            Err(e) => {
                warn!("could not save report: {}", e);
                self.message = Some((
                    StatusKind::Error,
                    format!("Could not save {}: {}", math_agent_core::Report::FILE_NAME, e),
                ));
            }
        }
    }

    /// Session notices win over download messages.
    pub fn status(&self) -> Option<(StatusKind, &str)> {
        match self.session.notice() {
            Some(Notice::Warning(msg)) => Some((StatusKind::Warning, msg.as_str())),
            Some(Notice::Error(msg)) => Some((StatusKind::Error, msg.as_str())),
            None => self
                .message
                .as_ref()
                .map(|(kind, msg)| (*kind, msg.as_str())),
        }
    }

    pub fn dismiss_status(&mut self) {
        self.session.dismiss_notice();
        self.message = None;
    }

    pub fn tick_animation(&mut self) {
        if self.session.is_solving() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.answer_scroll = self
            .answer_scroll
            .saturating_add(lines)
            .min(self.max_answer_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.answer_scroll = self.max_answer_scroll();
    }

    fn max_answer_scroll(&self) -> u16 {
        let visible = if self.answer_height > 0 { self.answer_height } else { 20 };
        self.answer_line_count().saturating_sub(visible)
    }

    /// Rows the solution pane needs for the answer once word-wrapped,
    /// measured with the same paragraph settings the pane draws with.
    pub fn answer_line_count(&self) -> u16 {
        let Some(answer) = self.session.answer() else {
            return 0;
        };
        let wrap_width = if self.answer_width > 0 { self.answer_width } else { 50 };

        let rows = Paragraph::new(markdown::solution_text(answer))
            .wrap(Wrap { trim: false })
            .line_count(wrap_width);
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    /// Cursor as (row, column) within the possibly multi-line input
    pub fn cursor_position(&self) -> (usize, usize) {
        let before: String = self.input.chars().take(self.cursor).collect();
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|line| line.chars().count())
            .unwrap_or(0);
        (row, col)
    }
}
