//! Approximate advance widths for the standard PDF base fonts, used to
//! right-align and wrap text without embedding font files.

use tally_core::page::pt_to_mm;

use crate::document::{FontFamily, FontWeight, TextStyle};

/// Helvetica advance widths in 1/1000 em for printable ASCII (32..=126).
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const COURIER: u16 = 600;
const FALLBACK: u16 = 556;

fn advance(ch: char, family: FontFamily, weight: FontWeight) -> f32 {
    if family == FontFamily::Mono {
        return f32::from(COURIER);
    }
    let base = match ch as u32 {
        code @ 32..=126 => HELVETICA[(code - 32) as usize],
        _ => FALLBACK,
    };
    let base = f32::from(base);
    let weighted = match weight {
        FontWeight::Regular => base,
        FontWeight::Bold => base * 1.06,
    };
    match family {
        FontFamily::Serif => weighted * 0.9,
        _ => weighted,
    }
}

/// Rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, style: &TextStyle) -> f32 {
    let em: f32 = text
        .chars()
        .map(|ch| advance(ch, style.family, style.weight))
        .sum();
    pt_to_mm(em / 1000.0 * style.size_pt)
}

/// Baseline-to-baseline distance for `style`, in millimetres.
pub fn line_height_mm(style: &TextStyle) -> f32 {
    pt_to_mm(style.size_pt * 1.3)
}

/// Greedy word wrap to `max_width_mm`. Explicit newlines are kept; words
/// wider than a full line are split by character.
pub fn wrap(text: &str, max_width_mm: f32, style: &TextStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, style) <= max_width_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width_mm(word, style) <= max_width_mm {
                current = word.to_string();
            } else {
                let mut pieces = split_word(word, max_width_mm, style);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn split_word(word: &str, max_width_mm: f32, style: &TextStyle) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if text_width_mm(&piece, style) > max_width_mm && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Shorten `text` with an ellipsis so it fits on one line.
pub fn truncate_to_width(text: &str, max_width_mm: f32, style: &TextStyle) -> String {
    if text_width_mm(text, style) <= max_width_mm {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if text_width_mm(&format!("{out}..."), style) > max_width_mm {
            out.pop();
            break;
        }
    }
    format!("{}...", out.trim_end())
}
