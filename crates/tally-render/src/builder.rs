use tally_core::page::PageSize;
use tally_core::templates::TemplateKind;

use crate::document::{Align, Color, Document, Element, Page, TextStyle};
use crate::{charset, metrics};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn uniform(mm: f32) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

/// Accumulates elements page by page with a vertical cursor.
///
/// Layouts draw at the cursor and call [`DocumentBuilder::ensure`] before
/// anything that must not straddle the bottom margin; the builder starts a
/// fresh page when it would.
pub struct DocumentBuilder {
    kind: TemplateKind,
    size: PageSize,
    margins: Margins,
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
    line_items: Vec<String>,
}

impl DocumentBuilder {
    pub fn new(kind: TemplateKind, size: PageSize, margins: Margins) -> Self {
        Self {
            kind,
            size,
            margins,
            pages: Vec::new(),
            current: Page::default(),
            cursor: margins.top,
            line_items: Vec::new(),
        }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn left(&self) -> f32 {
        self.margins.left
    }

    pub fn right(&self) -> f32 {
        self.size.width_mm - self.margins.right
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    pub fn remaining(&self) -> f32 {
        self.size.height_mm - self.margins.bottom - self.cursor
    }

    /// Number of pages started so far, including the one being drawn.
    pub fn page_number(&self) -> usize {
        self.pages.len() + 1
    }

    /// Break to a new page unless `height` still fits. Returns `true` when a
    /// break happened.
    pub fn ensure(&mut self, height: f32) -> bool {
        if height <= self.remaining() || self.current.elements.is_empty() {
            return false;
        }
        self.break_page();
        true
    }

    pub fn break_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor = self.margins.top;
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle, align: Align) {
        let text = encodable(text.into());
        if text.is_empty() {
            return;
        }
        self.current.elements.push(Element::Text {
            x,
            y,
            text,
            style,
            align,
        });
    }

    /// Draw one line at the cursor baseline and move the cursor down.
    pub fn line(&mut self, x: f32, text: impl Into<String>, style: TextStyle, align: Align) {
        let height = metrics::line_height_mm(&style);
        self.ensure(height);
        let baseline = self.cursor + style_ascent(&style);
        self.text(x, baseline, text, style, align);
        self.cursor += height;
    }

    /// Wrap `text` into `width` and draw it as consecutive lines.
    pub fn paragraph(&mut self, x: f32, width: f32, text: &str, style: TextStyle) {
        for line in metrics::wrap(text, width, &style) {
            self.line(x, line, style, Align::Left);
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Color) {
        self.current.elements.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    pub fn rule(&mut self, x: f32, y: f32, width: f32, thickness_pt: f32, color: Color) {
        self.current.elements.push(Element::Rule {
            x,
            y,
            width,
            thickness_pt,
            color,
        });
    }

    /// Full-width rule at the cursor.
    pub fn divider(&mut self, thickness_pt: f32, color: Color) {
        let (x, y, width) = (self.left(), self.cursor, self.content_width());
        self.rule(x, y, width, thickness_pt, color);
    }

    pub fn record_line_item(&mut self, description: &str) {
        self.line_items
            .push(charset::to_encodable(description).into_owned());
    }

    pub fn finish(mut self) -> Document {
        if !self.current.elements.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        Document {
            kind: self.kind,
            size: self.size,
            pages: self.pages,
            line_items: self.line_items,
        }
    }
}

fn encodable(text: String) -> String {
    if text.chars().all(charset::is_encodable) {
        return text;
    }
    let replaced = charset::to_encodable(&text).into_owned();
    tracing::debug!(original = %text, "replaced characters the PDF fonts cannot encode");
    replaced
}

/// Distance from the top of a line box to its baseline.
pub fn style_ascent(style: &TextStyle) -> f32 {
    tally_core::page::pt_to_mm(style.size_pt)
}
