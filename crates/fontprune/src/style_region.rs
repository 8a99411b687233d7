//! Locating the embedded `<style>` elements of a document.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy so that consecutive `<style>` elements stay separate.
static STYLE_ELEMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<style[^>]*>)(.*?)(</style>)").unwrap());

/// One `<style>…</style>` element and where it sits in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegion<'a> {
    /// Byte offset of `<style`.
    pub start: usize,
    /// Byte offset just past `</style>`.
    pub end: usize,
    pub open_tag: &'a str,
    pub css: &'a str,
    pub close_tag: &'a str,
}

impl StyleRegion<'_> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Rebuild the element around replacement CSS.
    pub fn with_css(&self, css: &str) -> String {
        let mut out = String::with_capacity(self.open_tag.len() + css.len() + self.close_tag.len());
        out.push_str(self.open_tag);
        out.push_str(css);
        out.push_str(self.close_tag);
        out
    }
}

/// Find every `<style>` element, in document order.
///
/// Tags are matched case-insensitively and the content may span lines. A
/// `<style>` without a closing tag is not a region.
pub fn extract_style_regions(html: &str) -> Vec<StyleRegion<'_>> {
    STYLE_ELEMENT_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(StyleRegion {
                start: whole.start(),
                end: whole.end(),
                open_tag: caps.get(1)?.as_str(),
                css: caps.get(2)?.as_str(),
                close_tag: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_region() {
        let html = "<html><head><style type=\"text/css\">p { color: red; }</style></head></html>";
        let regions = extract_style_regions(html);

        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.open_tag, "<style type=\"text/css\">");
        assert_eq!(region.css, "p { color: red; }");
        assert_eq!(region.close_tag, "</style>");
        assert_eq!(&html[region.span()], "<style type=\"text/css\">p { color: red; }</style>");
    }

    #[test]
    fn test_multiple_regions_are_ordered_and_disjoint() {
        let html = "<STYLE>\na{}\n</STYLE><p>between</p><style media=\"all\">\nb{}\n</Style>";
        let regions = extract_style_regions(html);

        assert_eq!(regions.len(), 2);
        assert!(regions[0].end <= regions[1].start);
        assert_eq!(regions[0].css, "\na{}\n");
        assert_eq!(regions[1].css, "\nb{}\n");
        assert_eq!(regions[1].close_tag, "</Style>");
        assert_eq!(&html[regions[0].end..regions[1].start], "<p>between</p>");
    }

    #[test]
    fn test_unterminated_style_is_ignored() {
        let html = "<style>p { color: red; }";
        assert!(extract_style_regions(html).is_empty());
    }

    #[test]
    fn test_with_css_keeps_tags() {
        let html = "<style id=\"x\">old</style>";
        let regions = extract_style_regions(html);
        assert_eq!(regions[0].with_css("new"), "<style id=\"x\">new</style>");
    }
}
