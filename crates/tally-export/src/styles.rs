use serde::Serialize;

use tally_core::templates::TemplateKind;
use tally_render::{palette, FontFamily};

/// CSS values for the print surface, derived from the layout palette.
#[derive(Debug, Clone, Serialize)]
pub struct PrintTheme {
    /// Font stack for body text.
    pub font_stack: &'static str,

    /// Accent colour, `#rrggbb`.
    pub accent: String,

    pub ink: String,
    pub muted: String,
    pub tint: String,

    /// Content column width in millimetres (narrow for receipts).
    pub column_width_mm: f32,

    /// Whether the table header sits on an accent band.
    pub filled_header: bool,
}

impl PrintTheme {
    pub fn for_template(kind: TemplateKind) -> Self {
        let palette = palette(kind);
        let font_stack = match palette.family {
            FontFamily::Sans => "Helvetica, Arial, sans-serif",
            FontFamily::Serif => "\"Times New Roman\", Times, serif",
            FontFamily::Mono => "\"Courier New\", Courier, monospace",
        };
        Self {
            font_stack,
            accent: palette.accent.hex(),
            ink: palette.ink.hex(),
            muted: palette.muted.hex(),
            tint: palette.tint.hex(),
            column_width_mm: if kind.is_receipt() { 80.0 } else { 180.0 },
            filled_header: matches!(
                kind,
                TemplateKind::Modern | TemplateKind::Bold | TemplateKind::Corporate
            ),
        }
    }
}
