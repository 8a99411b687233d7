//! The (family, weight, style) key that ties `@font-face` declarations to usage.

use std::fmt;

/// Normalized `font-style`: everything that is not italic or oblique is normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A font variant identity.
///
/// Two triplets are the same font only if all three fields match exactly.
/// `weight` is always one of 100, 200, ..., 900.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontTriplet {
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
}

impl FontTriplet {
    pub fn new(family: impl Into<String>, weight: u16, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            weight,
            style,
        }
    }
}

/// Renders as a report row: `Montserrat | 700 | italic`.
impl fmt::Display for FontTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.family, self.weight, self.style)
    }
}
