//! # fontprune
//!
//! Removes `@font-face` declarations that an HTML document never uses.
//!
//! HTML e-mails tend to ship every weight and style of a web font "just in
//! case". fontprune works out which variants the markup actually renders and
//! deletes the rest:
//!
//! - **Triplets**: a variant is identified by (family, weight, style), with
//!   weights rounded to the nearest hundred and `oblique` folded into
//!   `italic`
//! - **Usage**: collected from inline `style` attributes, from rules inside
//!   `<style>` elements, and from weight/style-only attributes that inherit
//!   the last family seen
//! - **Rewrite**: unused faces are cut out of their `<style>` element by
//!   byte span, survivors get `mso-font-alt` so Outlook has a fallback, and
//!   everything outside `<style>` elements is left byte-for-byte intact
//!
//! The scanning is pattern-based on purpose: e-mail markup is frequently
//! malformed, and anything not recognized is simply ignored.
//!
//! ## Example
//!
//! ```
//! use fontprune::{PruneOptions, prune_document};
//!
//! let html = r#"<style>
//! @font-face { font-family: Foo; font-weight: 700; }
//! @font-face { font-family: Bar; }
//! </style>
//! <p style="font-family: Foo; font-weight: bold">Hello</p>"#;
//!
//! let outcome = prune_document(html, &PruneOptions::default());
//!
//! assert!(!outcome.html.contains("Bar"));
//! assert!(outcome.html.contains("font-weight: 700; mso-font-alt: 'Arial';"));
//! ```

mod collect;
mod config;
mod declarations;
mod font_face;
mod normalize;
mod report;
mod rewrite;
mod style_region;
mod triplet;
pub mod workspace;

use camino::Utf8PathBuf;

pub use collect::{
    InheritanceContext, collect_css_rules, collect_inherited, collect_inline, collect_used,
    inline_style_attributes,
};
pub use config::{FontpruneConfig, ResolvedConfig};
pub use declarations::{Dialect, FontDeclarations, split_family_list};
pub use font_face::{DEFAULT_FALLBACK_FONT, FontFaceDecl, inject_compat_property, parse_font_faces};
pub use normalize::{is_generic_family, normalize_family, normalize_font_style, normalize_font_weight};
pub use report::{NONE_ROW, render_log_entry, triplet_rows};
pub use rewrite::{PruneOptions, PruneOutcome, prune_document};
pub use style_region::{StyleRegion, extract_style_regions};
pub use triplet::{FontStyle, FontTriplet};

/// Error type for fontprune operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished output could not be moved into place.
    #[error("failed to write {path}: {source}")]
    Persist {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    /// The configuration file exists but could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Config { path: Utf8PathBuf, message: String },
}

/// Result type alias for fontprune operations.
pub type Result<T> = std::result::Result<T, Error>;
