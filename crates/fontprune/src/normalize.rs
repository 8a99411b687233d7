//! Canonical forms for font-family names, weights and styles.

use crate::triplet::FontStyle;

/// CSS generic family keywords. These never name an embeddable font.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
];

const DEFAULT_WEIGHT: u16 = 400;

/// Strip surrounding quotes, whitespace and control characters from a family name.
///
/// Inner casing and spacing are preserved: `" 'Open Sans' "` becomes `Open Sans`.
pub fn normalize_family(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '\'' || c == '"' || c.is_whitespace() || c.is_control())
}

/// Case-insensitive check against the CSS generic families.
pub fn is_generic_family(name: &str) -> bool {
    GENERIC_FAMILIES
        .iter()
        .any(|generic| generic.eq_ignore_ascii_case(name))
}

/// Map a `font-style` value to [`FontStyle`]. `oblique` counts as italic.
pub fn normalize_font_style(raw: Option<&str>) -> FontStyle {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return FontStyle::Normal;
    };

    if value.eq_ignore_ascii_case("italic") || value.eq_ignore_ascii_case("oblique") {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    }
}

/// Map a `font-weight` value to one of 100, 200, ..., 900.
///
/// Keywords are resolved first. Numbers are read from the leading digits
/// (`700px` reads as 700), clamped to [100, 900] and rounded half-up to the
/// nearest hundred. Anything else is 400.
pub fn normalize_font_weight(raw: Option<&str>) -> u16 {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_WEIGHT;
    };

    match value.to_ascii_lowercase().as_str() {
        "normal" => return 400,
        "bold" | "bolder" => return 700,
        "lighter" => return 300,
        _ => {}
    }

    match parse_leading_integer(value) {
        Some(n) => {
            let clamped = n.clamp(100, 900);
            // clamped is positive, so integer division implements round-half-up
            ((clamped + 50) / 100 * 100) as u16
        }
        None => DEFAULT_WEIGHT,
    }
}

/// Parse an optionally signed run of leading ASCII digits.
///
/// Saturates instead of overflowing so absurdly long numbers still clamp.
fn parse_leading_integer(value: &str) -> Option<i64> {
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let magnitude = digits[..len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}
