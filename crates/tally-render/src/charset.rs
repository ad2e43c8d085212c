//! The standard PDF fonts encode text as WinAnsi. Documents only ever hold
//! text from that repertoire, so the preview shows exactly what the PDF can
//! print.

use std::borrow::Cow;

/// Stands in for a character the base fonts cannot encode.
pub const REPLACEMENT: char = '?';

/// Characters WinAnsi places in `0x80..=0x9F`.
const WIN_ANSI_HIGH: [char; 27] = [
    '\u{20ac}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02c6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017d}', '\u{2018}',
    '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02dc}',
    '\u{2122}', '\u{0161}', '\u{203a}', '\u{0153}', '\u{017e}', '\u{0178}',
];

pub fn is_encodable(ch: char) -> bool {
    matches!(ch as u32, 0x20..=0x7e | 0xa0..=0xff) || WIN_ANSI_HIGH.contains(&ch)
}

/// `text` with every unencodable character replaced. Whitespace becomes a
/// plain space, anything else [`REPLACEMENT`].
pub fn to_encodable(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_encodable) {
        return Cow::Borrowed(text);
    }
    let replaced = text
        .chars()
        .map(|ch| match ch {
            ch if is_encodable(ch) => ch,
            ch if ch.is_whitespace() => ' ',
            _ => REPLACEMENT,
        })
        .collect();
    Cow::Owned(replaced)
}
