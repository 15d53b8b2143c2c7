//! Minimal flowing-text PDF writer on top of `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::layout::{
    content_width_mm, wrap, Font, FontStyle, BOTTOM_MARGIN_MM, CELL_PADDING_MM, MARGIN_MM,
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
use crate::error::ReportError;

const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Writes lines top to bottom, starting a new page whenever the next line
/// would cross the bottom margin.
pub struct PdfWriter {
    pages: Vec<Vec<Operation>>,
    font: Font,
    /// Distance of the cursor from the top edge
    y_mm: f32,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            font: Font::new(FontStyle::Regular, 12.0),
            y_mm: MARGIN_MM,
        }
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Move down by `h_mm` without drawing.
    pub fn spacer(&mut self, h_mm: f32) {
        self.y_mm += h_mm;
    }

    /// One unwrapped line across the full width.
    pub fn line(&mut self, text: &str, h_mm: f32, align: Align) {
        self.break_page_if_needed(h_mm);

        let x_mm = match align {
            Align::Left => MARGIN_MM + CELL_PADDING_MM,
            Align::Center => {
                let full = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
                MARGIN_MM + (full - self.font.text_width_mm(text)) / 2.0
            }
        };
        // Vertically centered baseline, same placement as a classic text cell.
        let baseline_mm = self.y_mm + 0.5 * h_mm + 0.3 * self.font.size_mm();

        if !text.is_empty() {
            self.show_text(text, x_mm, baseline_mm);
        }
        self.y_mm += h_mm;
    }

    /// Wrapped block: every wrapped line gets height `h_mm`.
    pub fn block(&mut self, text: &str, h_mm: f32) {
        for line in wrap(text, &self.font, content_width_mm()) {
            self.line(&line, h_mm, Align::Left);
        }
    }

    fn break_page_if_needed(&mut self, h_mm: f32) {
        let limit = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;
        let page_is_fresh = self.y_mm <= MARGIN_MM;
        if self.y_mm + h_mm > limit && !page_is_fresh {
            self.pages.push(Vec::new());
            self.y_mm = MARGIN_MM;
        }
    }

    fn show_text(&mut self, text: &str, x_mm: f32, baseline_mm: f32) {
        let x = x_mm * PT_PER_MM;
        let y = (PAGE_HEIGHT_MM - baseline_mm) * PT_PER_MM;
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(self.font.style.resource_name().as_bytes().to_vec()),
                    real(self.font.size_pt),
                ],
            ),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_latin1(text))]),
            Operation::new("ET", vec![]),
        ];
        if let Some(page) = self.pages.last_mut() {
            page.extend(ops);
        }
    }

    /// Serialize every page into a complete PDF file.
    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = add_font(&mut doc, FontStyle::Regular);
        let bold_id = add_font(&mut doc, FontStyle::Bold);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FontStyle::Regular.resource_name() => regular_id,
                FontStyle::Bold.resource_name() => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            real(PAGE_WIDTH_MM * PT_PER_MM),
            real(PAGE_HEIGHT_MM * PT_PER_MM),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn add_font(doc: &mut Document, style: FontStyle) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Callers sanitize first; anything above U+00FF is skipped here.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}
