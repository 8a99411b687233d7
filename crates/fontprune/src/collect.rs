//! Building the set of font variants the document actually uses.
//!
//! Three independent scans feed one document-wide set:
//!
//! - inline `style` attributes that name a family,
//! - inline `style` attributes that only change weight or style, attributed
//!   to the most recently seen family (see [`InheritanceContext`]),
//! - rule bodies inside `<style>` elements, ignoring `@font-face` blocks.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::declarations::{Dialect, FontDeclarations};
use crate::font_face::FONT_FACE_REGEX;
use crate::normalize::{normalize_font_style, normalize_font_weight};
use crate::style_region::StyleRegion;
use crate::triplet::{FontStyle, FontTriplet};

/// `style="…"` or `style='…'`; the value is in group 1 or group 2.
static STYLE_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)style\s*=\s*"([^"]*)"|style\s*=\s*'([^']*)'"#).unwrap()
});

/// Any `{ … }` body without nested braces.
static RULE_BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").unwrap());

/// Values of every inline `style` attribute, in document order.
pub fn inline_style_attributes(html: &str) -> impl Iterator<Item = &str> {
    STYLE_ATTR_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
}

/// Triplets declared directly by inline `style` attributes.
///
/// Every real family of an attribute shares that attribute's first weight
/// and style. Attributes naming only generic families contribute nothing.
pub fn collect_inline(html: &str) -> BTreeSet<FontTriplet> {
    let mut used = BTreeSet::new();

    for attr in inline_style_attributes(html) {
        let decls = FontDeclarations::scan(attr, Dialect::Inline);
        let families = decls.real_families();
        if families.is_empty() {
            continue;
        }

        let weight = normalize_font_weight(decls.weight);
        let style = normalize_font_style(decls.style);
        used.extend(
            families
                .into_iter()
                .map(|family| FontTriplet::new(family, weight, style)),
        );
    }

    used
}

/// Running font context while walking inline styles in document order.
///
/// This approximates CSS inheritance: a `<span style="font-weight:700">`
/// nested in `<td style="font-family:Montserrat">` renders Montserrat bold
/// even though no single attribute says so. Document order is only a proxy
/// for nesting, so siblings can leak context into each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceContext {
    pub family: Option<String>,
    pub weight: u16,
    pub style: FontStyle,
}

impl Default for InheritanceContext {
    fn default() -> Self {
        Self {
            family: None,
            weight: 400,
            style: FontStyle::Normal,
        }
    }
}

impl InheritanceContext {
    /// Advance past one attribute, returning the new context and the triplet
    /// it implies, if any.
    ///
    /// An attribute with a real family resets the context to that family and
    /// its own weight/style (400/normal when absent). An attribute without a
    /// family overrides only what it declares, and implies a triplet only if
    /// it declares weight or style and some family was seen before.
    pub fn step(self, decls: &FontDeclarations<'_>) -> (Self, Option<FontTriplet>) {
        if let Some(family) = decls.real_families().into_iter().next() {
            let next = Self {
                family: Some(family),
                weight: normalize_font_weight(decls.weight),
                style: normalize_font_style(decls.style),
            };
            let triplet = next.triplet();
            return (next, triplet);
        }

        if self.family.is_none() || (decls.weight.is_none() && decls.style.is_none()) {
            return (self, None);
        }

        let next = Self {
            weight: decls.weight.map_or(self.weight, |w| normalize_font_weight(Some(w))),
            style: decls.style.map_or(self.style, |s| normalize_font_style(Some(s))),
            family: self.family,
        };
        let triplet = next.triplet();
        (next, triplet)
    }

    fn triplet(&self) -> Option<FontTriplet> {
        self.family
            .as_ref()
            .map(|family| FontTriplet::new(family.clone(), self.weight, self.style))
    }
}

/// Triplets implied by weight/style-only attributes inheriting a family.
pub fn collect_inherited(html: &str) -> BTreeSet<FontTriplet> {
    inline_style_attributes(html)
        .scan(InheritanceContext::default(), |ctx, attr| {
            let decls = FontDeclarations::scan(attr, Dialect::Inline);
            let (next, triplet) = std::mem::take(ctx).step(&decls);
            *ctx = next;
            Some(triplet)
        })
        .flatten()
        .collect()
}

/// Triplets used by ordinary rules of one stylesheet.
///
/// `@font-face` blocks are removed first so a face never counts as its own
/// usage. Selectors are ignored; every body is judged on its own
/// declarations.
pub fn collect_css_rules(css: &str) -> BTreeSet<FontTriplet> {
    let without_faces = FONT_FACE_REGEX.replace_all(css, "");
    let mut used = BTreeSet::new();

    for caps in RULE_BODY_REGEX.captures_iter(&without_faces) {
        let Some(body) = caps.get(1) else { continue };
        let decls = FontDeclarations::scan(body.as_str(), Dialect::Rule);

        let families = decls.real_families();
        if families.is_empty() {
            continue;
        }

        let weight = normalize_font_weight(decls.weight);
        let style = normalize_font_style(decls.style);
        used.extend(
            families
                .into_iter()
                .map(|family| FontTriplet::new(family, weight, style)),
        );
    }

    used
}

/// Union of all three scans over the whole document.
pub fn collect_used(html: &str, regions: &[StyleRegion<'_>]) -> BTreeSet<FontTriplet> {
    let inline = collect_inline(html);
    let inherited = collect_inherited(html);
    let rules: BTreeSet<FontTriplet> = regions
        .iter()
        .flat_map(|region| collect_css_rules(region.css))
        .collect();

    debug!(
        inline = inline.len(),
        inherited = inherited.len(),
        rules = rules.len(),
        "collected font usage"
    );

    let mut used = inline;
    used.extend(inherited);
    used.extend(rules);
    used
}
