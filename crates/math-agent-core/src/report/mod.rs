//! Report Renderer: turns a question/answer pair into a one-document PDF.
//!
//! Layout, top to bottom:
//! 1. centered bold title
//! 2. bold `Question:` block holding the sanitized question
//! 3. one regular-weight block per line of the sanitized answer
//!
//! Text is sanitized to Latin-1 first (see [`sanitize`]), which is lossy.

pub mod layout;
pub mod pdf;
pub mod sanitize;

pub use sanitize::sanitize;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ReportError;
use layout::{Font, FontStyle};
use pdf::{Align, PdfWriter};

pub const REPORT_TITLE: &str = "Math Agent - Solution Report";

const TITLE_FONT: Font = Font::new(FontStyle::Bold, 16.0);
const QUESTION_FONT: Font = Font::new(FontStyle::Bold, 14.0);
const ANSWER_FONT: Font = Font::new(FontStyle::Regular, 12.0);
const LINE_HEIGHT_MM: f32 = 10.0;
const AFTER_TITLE_MM: f32 = 10.0;
const AFTER_QUESTION_MM: f32 = 5.0;

/// Rendered PDF held in memory
#[derive(Debug, Clone)]
pub struct Report {
    bytes: Vec<u8>,
    page_count: usize,
    omitted_chars: usize,
}

impl Report {
    pub const FILE_NAME: &'static str = "math_solution.pdf";
    pub const CONTENT_TYPE: &'static str = "application/pdf";

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reader positioned at the first byte
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.bytes)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Characters above U+00FF that sanitizing dropped from the question
    /// and answer. Zero means the text made it into the PDF intact.
    pub fn omitted_chars(&self) -> usize {
        self.omitted_chars
    }

    /// Write the report as [`Report::FILE_NAME`] inside `dir`, replacing any
    /// earlier copy.
    pub fn save_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(Self::FILE_NAME);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

pub fn render(question: &str, answer: &str) -> Result<Report, ReportError> {
    let mut writer = PdfWriter::new();

    writer.set_font(TITLE_FONT);
    writer.line(REPORT_TITLE, LINE_HEIGHT_MM, Align::Center);
    writer.spacer(AFTER_TITLE_MM);

    let clean_question = sanitize(question);
    writer.set_font(QUESTION_FONT);
    writer.block(&format!("Question:\n{}", clean_question), LINE_HEIGHT_MM);
    writer.spacer(AFTER_QUESTION_MM);

    writer.set_font(ANSWER_FONT);
    let clean_answer = sanitize(answer);
    for segment in clean_answer.split('\n') {
        writer.block(segment, LINE_HEIGHT_MM);
    }

    let page_count = writer.page_count();
    let bytes = writer.finish()?;
    // Substitutions are one-for-one, so the shortfall is exactly the dropped chars
    let omitted_chars = question.chars().count() + answer.chars().count()
        - clean_question.chars().count()
        - clean_answer.chars().count();
    debug!(page_count, omitted_chars, bytes = bytes.len(), "rendered report");

    Ok(Report {
        bytes,
        page_count,
        omitted_chars,
    })
}
