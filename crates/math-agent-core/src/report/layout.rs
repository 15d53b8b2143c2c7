//! Page geometry, Helvetica metrics and line wrapping for the report.

use std::mem;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
pub const BOTTOM_MARGIN_MM: f32 = 15.0;
/// Horizontal padding inside a text cell
pub const CELL_PADDING_MM: f32 = 1.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    /// Resource name used in page content streams
    pub fn resource_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub style: FontStyle,
    pub size_pt: f32,
}

impl Font {
    pub const fn new(style: FontStyle, size_pt: f32) -> Self {
        Self { style, size_pt }
    }

    pub fn size_mm(&self) -> f32 {
        self.size_pt * MM_PER_PT
    }

    pub fn text_width_mm(&self, text: &str) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(glyph_width(c, self.style)))
            .sum();
        units as f32 * self.size_pt / 1000.0 * MM_PER_PT
    }
}

/// Usable text width of a full-width cell
pub fn content_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM
}

// Advance widths for U+0020..=U+007E, in 1/1000 em (Adobe AFM).
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(c: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };
    match c as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        code @ 0xA0..=0xFF => latin1_upper_width(code),
        _ => 278,
    }
}

// Regular-weight widths, reused for bold; close enough for wrapping.
fn latin1_upper_width(code: u32) -> u16 {
    match code {
        0xA0 | 0xB7 => 278,
        0xA6 => 260,
        0xA9 | 0xAE => 737,
        0xAA => 370,
        0xAC | 0xB1 | 0xD7 | 0xF7 => 584,
        0xB0 => 400,
        0xB6 => 537,
        0xBA => 365,
        0xBC..=0xBE => 834,
        0xBF | 0xDF => 611,
        0xA1 | 0xA8 | 0xAD | 0xAF | 0xB2..=0xB4 | 0xB8 | 0xB9 => 333,
        0xC0..=0xC5 | 0xC8..=0xCB | 0xDD | 0xDE => 667,
        0xC6 => 1000,
        0xC7 | 0xD0 | 0xD1 | 0xD9..=0xDC => 722,
        0xCC..=0xCF | 0xEC..=0xEF => 278,
        0xD2..=0xD6 | 0xD8 => 778,
        0xE6 => 889,
        0xE7 | 0xFD | 0xFF => 500,
        0xF8 => 611,
        _ => 556,
    }
}

/// Wrap `text` to `max_width_mm`. Embedded newlines force a break, words
/// are broken on single spaces, and a word wider than the line is split
/// between characters. Always yields at least one line.
pub fn wrap(text: &str, font: &Font, max_width_mm: f32) -> Vec<String> {
    let text = text.replace('\r', "");
    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, font, max_width_mm))
        .collect()
}

fn wrap_paragraph(paragraph: &str, font: &Font, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut at_line_start = true;
    // Set after a soft break until the next word lands; spaces there are swallowed
    let mut after_break = false;

    for word in paragraph.split(' ') {
        if after_break && word.is_empty() {
            continue;
        }
        if !at_line_start && !after_break {
            let candidate = format!("{} {}", current, word);
            if font.text_width_mm(&candidate) <= max_width_mm {
                current = candidate;
                continue;
            }
            lines.push(mem::take(&mut current));
            if word.is_empty() {
                after_break = true;
                continue;
            }
        }

        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && font.text_width_mm(&current) > max_width_mm {
                current.pop();
                lines.push(mem::take(&mut current));
                current.push(c);
            }
        }
        at_line_start = false;
        after_break = false;
    }

    if !after_break {
        lines.push(current);
    }
    lines
}
