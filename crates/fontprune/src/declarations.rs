//! Pattern-based lookup of the three font declarations in a declaration list.
//!
//! There is no real CSS tokenizer here: values are whatever follows
//! `property:` up to the first terminator. Inline `style="…"` values stop at
//! `;`, rule bodies stop at `;` or `}`. The attribute's own quotes are already
//! gone by the time a value is scanned, so a `"` inside a single-quoted
//! attribute is part of the value.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{is_generic_family, normalize_family};

static INLINE_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;]+)").unwrap());
static INLINE_WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-weight\s*:\s*([^;]+)").unwrap());
static INLINE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-style\s*:\s*([^;]+)").unwrap());

static RULE_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;}]*)").unwrap());
static RULE_WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-weight\s*:\s*([^;}]*)").unwrap());
static RULE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-style\s*:\s*([^;}]*)").unwrap());

/// Where a declaration list came from, which decides how values terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// The value of a `style` attribute.
    Inline,
    /// The body of a `{ … }` block inside a `<style>` element.
    Rule,
}

/// The raw font declarations found in one declaration list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontDeclarations<'a> {
    /// Every `font-family` value, in order, unsplit.
    pub families: Vec<&'a str>,
    /// First `font-weight` value.
    pub weight: Option<&'a str>,
    /// First `font-style` value.
    pub style: Option<&'a str>,
}

impl<'a> FontDeclarations<'a> {
    /// Scan a declaration list.
    ///
    /// Inline attributes may repeat `font-family` and all occurrences are
    /// kept. Rule bodies only contribute their first `font-family`.
    pub fn scan(text: &'a str, dialect: Dialect) -> Self {
        let (family, weight, style) = match dialect {
            Dialect::Inline => (&*INLINE_FAMILY, &*INLINE_WEIGHT, &*INLINE_STYLE),
            Dialect::Rule => (&*RULE_FAMILY, &*RULE_WEIGHT, &*RULE_STYLE),
        };

        let families = match dialect {
            Dialect::Inline => family
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect(),
            Dialect::Rule => first_value(family, text).into_iter().collect(),
        };

        Self {
            families,
            weight: first_value(weight, text),
            style: first_value(style, text),
        }
    }

    /// Every non-generic family across all `font-family` values.
    pub fn real_families(&self) -> Vec<String> {
        self.families
            .iter()
            .flat_map(|value| split_family_list(value))
            .filter(|family| !is_generic_family(family))
            .map(str::to_string)
            .collect()
    }

    /// The first family of the first `font-family` value, generic or not.
    pub fn first_family(&self) -> Option<&'a str> {
        self.families
            .first()
            .copied()
            .and_then(|value| split_family_list(value).next())
    }
}

/// Split a comma-separated family list into normalized, non-empty names.
pub fn split_family_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(normalize_family)
        .filter(|family| !family.is_empty())
}

fn first_value<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
