//! `@font-face` blocks: parsing them into triplets and patching survivors.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::declarations::{Dialect, FontDeclarations};
use crate::normalize::{normalize_font_style, normalize_font_weight};
use crate::triplet::FontTriplet;

/// `@font-face { … }` with the body in group 1. Bodies cannot nest braces.
pub(crate) static FONT_FACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@font-face\s*\{([^}]*)\}").unwrap());

/// Outlook ignores `@font-face` and falls back to Times New Roman unless told otherwise.
const COMPAT_PROPERTY: &str = "mso-font-alt";

pub const DEFAULT_FALLBACK_FONT: &str = "Arial";

/// One `@font-face` block found in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceDecl<'a> {
    /// The whole block, `@font-face` through the closing brace.
    pub text: &'a str,
    /// Byte range of `text` inside the stylesheet it was parsed from.
    pub span: Range<usize>,
    pub triplet: FontTriplet,
}

/// Parse every `@font-face` block of a stylesheet, in source order.
///
/// Blocks without a usable `font-family` are skipped. The identity is the
/// first family of the list; generic names are accepted here because a face
/// may legitimately be declared under any name.
pub fn parse_font_faces(css: &str) -> Vec<FontFaceDecl<'_>> {
    FONT_FACE_REGEX
        .captures_iter(css)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?.as_str();

            let decls = FontDeclarations::scan(body, Dialect::Rule);
            let family = decls.first_family()?;

            Some(FontFaceDecl {
                text: whole.as_str(),
                span: whole.range(),
                triplet: FontTriplet::new(
                    family,
                    normalize_font_weight(decls.weight),
                    normalize_font_style(decls.style),
                ),
            })
        })
        .collect()
}

/// Add `mso-font-alt: '<fallback>';` to every `@font-face` block that lacks it.
///
/// The property goes right after the last `;` of the body. Blocks without
/// `font-family`, blocks that already carry the property (any casing) and
/// blocks with no `;` at all are returned unchanged.
pub fn inject_compat_property(css: &str, fallback: &str) -> String {
    let declaration = format!("{COMPAT_PROPERTY}: '{fallback}';");

    FONT_FACE_REGEX
        .replace_all(css, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let Some(body) = caps.get(1) else {
                return whole.to_string();
            };

            let lowered = body.as_str().to_ascii_lowercase();
            if lowered.contains(COMPAT_PROPERTY) || !lowered.contains("font-family") {
                return whole.to_string();
            }

            let Some(last_semicolon) = body.as_str().rfind(';') else {
                return whole.to_string();
            };

            // offsets relative to the whole match
            let insert_at = body.start() - caps.get(0).map_or(0, |m| m.start()) + last_semicolon + 1;
            let mut patched = String::with_capacity(whole.len() + declaration.len() + 1);
            patched.push_str(&whole[..insert_at]);
            patched.push(' ');
            patched.push_str(&declaration);
            patched.push_str(&whole[insert_at..]);
            patched
        })
        .into_owned()
}
