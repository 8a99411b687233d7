//! Reconciling declared faces against usage and rewriting the document.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::collect::collect_used;
use crate::font_face::{DEFAULT_FALLBACK_FONT, inject_compat_property, parse_font_faces};
use crate::style_region::extract_style_regions;
use crate::triplet::FontTriplet;

/// Three or more line breaks, possibly with whitespace in between.
static BLANK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

/// Knobs for [`prune_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOptions {
    /// Family named in the injected `mso-font-alt` property.
    pub fallback_font: String,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            fallback_font: DEFAULT_FALLBACK_FONT.to_string(),
        }
    }
}

/// Result of pruning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    /// The rewritten document.
    pub html: String,
    /// Every variant the document uses, declared or not.
    pub used: BTreeSet<FontTriplet>,
    /// Variants whose `@font-face` survived.
    pub kept: BTreeSet<FontTriplet>,
    /// Variants whose `@font-face` was deleted.
    pub removed: BTreeSet<FontTriplet>,
    /// Number of `<style>` elements seen.
    pub regions: usize,
    /// Number of `@font-face` blocks deleted, duplicates included.
    pub blocks_removed: usize,
}

impl PruneOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.html != original
    }
}

/// Remove unused `@font-face` blocks and patch the survivors.
///
/// Usage is computed over the whole document first, so a face declared in
/// one `<style>` element is kept if anything anywhere uses it. Regions are
/// then rewritten last-to-first: splicing a region only moves bytes after it,
/// so the recorded offsets of earlier regions stay valid. Bytes outside
/// `<style>` elements are never touched.
pub fn prune_document(html: &str, options: &PruneOptions) -> PruneOutcome {
    let regions = extract_style_regions(html);
    let used = collect_used(html, &regions);

    let mut output = html.to_string();
    let mut kept = BTreeSet::new();
    let mut removed = BTreeSet::new();
    let mut blocks_removed = 0;

    for region in regions.iter().rev() {
        let faces = parse_font_faces(region.css);
        let (survivors, unused): (Vec<_>, Vec<_>) = faces
            .into_iter()
            .partition(|face| used.contains(&face.triplet));

        for face in &unused {
            debug!(triplet = %face.triplet, offset = region.start + face.span.start, "removing unused @font-face");
        }

        let spans: Vec<Range<usize>> = unused.iter().map(|face| face.span.clone()).collect();
        let stripped = remove_spans(region.css, &spans);
        let css = BLANK_RUN_REGEX.replace_all(&stripped, "\n\n");
        let css = inject_compat_property(&css, &options.fallback_font);

        blocks_removed += unused.len();
        kept.extend(survivors.into_iter().map(|face| face.triplet));
        removed.extend(unused.into_iter().map(|face| face.triplet));

        output.replace_range(region.span(), &region.with_css(&css));
    }

    info!(
        regions = regions.len(),
        used = used.len(),
        kept = kept.len(),
        removed = removed.len(),
        "pruned document"
    );

    PruneOutcome {
        html: output,
        used,
        kept,
        removed,
        regions: regions.len(),
        blocks_removed,
    }
}

/// Copy `text` without the given byte ranges. Ranges must be sorted and disjoint.
fn remove_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
