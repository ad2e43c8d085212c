mod bold;
mod classic;
mod common;
mod corporate;
mod minimal;
mod modern;
mod receipt;

use serde::Serialize;
use tally_core::form::InvoiceView;
use tally_core::templates::TemplateKind;

use crate::builder::DocumentBuilder;
use crate::document::{Color, FontFamily};

/// Colours and type family a layout is drawn with. The print surface reads
/// the same palette so both outputs share a look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub accent: Color,
    pub ink: Color,
    pub muted: Color,
    pub tint: Color,
    pub family: FontFamily,
}

pub fn palette(kind: TemplateKind) -> Palette {
    match kind {
        TemplateKind::Classic => Palette {
            accent: Color::rgb(0x33, 0x33, 0x33),
            ink: Color::rgb(0x1f, 0x1f, 0x1f),
            muted: Color::rgb(0x6b, 0x6b, 0x6b),
            tint: Color::rgb(0xee, 0xee, 0xee),
            family: FontFamily::Sans,
        },
        TemplateKind::Modern => Palette {
            accent: Color::rgb(0x25, 0x63, 0xeb),
            ink: Color::rgb(0x11, 0x18, 0x27),
            muted: Color::rgb(0x6b, 0x72, 0x80),
            tint: Color::rgb(0xef, 0xf6, 0xff),
            family: FontFamily::Sans,
        },
        TemplateKind::Minimal => Palette {
            accent: Color::rgb(0x99, 0x99, 0x99),
            ink: Color::rgb(0x22, 0x22, 0x22),
            muted: Color::rgb(0x88, 0x88, 0x88),
            tint: Color::WHITE,
            family: FontFamily::Sans,
        },
        TemplateKind::Bold => Palette {
            accent: Color::rgb(0xdc, 0x26, 0x26),
            ink: Color::BLACK,
            muted: Color::rgb(0x52, 0x52, 0x52),
            tint: Color::rgb(0xfe, 0xf2, 0xf2),
            family: FontFamily::Sans,
        },
        TemplateKind::Corporate => Palette {
            accent: Color::rgb(0x1e, 0x3a, 0x5f),
            ink: Color::rgb(0x1a, 0x1a, 0x1a),
            muted: Color::rgb(0x5f, 0x6b, 0x7a),
            tint: Color::rgb(0xe8, 0xee, 0xf5),
            family: FontFamily::Serif,
        },
        TemplateKind::Receipt => Palette {
            accent: Color::BLACK,
            ink: Color::BLACK,
            muted: Color::rgb(0x44, 0x44, 0x44),
            tint: Color::WHITE,
            family: FontFamily::Mono,
        },
    }
}

pub(crate) fn draw(kind: TemplateKind, b: &mut DocumentBuilder, view: &InvoiceView) {
    let palette = palette(kind);
    match kind {
        TemplateKind::Classic => classic::draw(b, view, &palette),
        TemplateKind::Modern => modern::draw(b, view, &palette),
        TemplateKind::Minimal => minimal::draw(b, view, &palette),
        TemplateKind::Bold => bold::draw(b, view, &palette),
        TemplateKind::Corporate => corporate::draw(b, view, &palette),
        TemplateKind::Receipt => receipt::draw(b, view, &palette),
    }
}

pub(crate) use receipt::MARGINS as RECEIPT_MARGINS;
