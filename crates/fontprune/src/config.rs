//! Configuration file discovery and parsing
//!
//! Searches for `.config/fontprune.yaml` walking up from the directory being
//! processed. Every setting is optional; without a file the defaults apply.

use camino::{Utf8Path, Utf8PathBuf};
use facet::Facet;
use fs_err as fs;
use tracing::debug;

use crate::font_face::DEFAULT_FALLBACK_FONT;
use crate::{Error, Result};

const CONFIG_DIR: &str = ".config";
const CONFIG_FILE: &str = "fontprune.yaml";

/// fontprune configuration from `.config/fontprune.yaml`
#[derive(Debug, Clone, Default, Facet)]
#[facet(rename_all = "snake_case")]
pub struct FontpruneConfig {
    /// Family named in the injected `mso-font-alt` property (default: Arial)
    #[facet(default)]
    pub fallback_font: Option<String>,

    /// Append a `<name>.fonts.log` entry for every run
    #[facet(default)]
    pub log: Option<bool>,

    /// Never pick an earlier `*.processed.html` output as input
    #[facet(default)]
    pub skip_processed: Option<bool>,
}

/// Configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The file the settings came from, if any
    pub source: Option<Utf8PathBuf>,
    pub fallback_font: String,
    pub log: bool,
    pub skip_processed: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            fallback_font: DEFAULT_FALLBACK_FONT.to_string(),
            log: false,
            skip_processed: false,
        }
    }
}

impl ResolvedConfig {
    /// Look for a config file in `start` and its ancestors.
    pub fn discover_from(start: &Utf8Path) -> Result<Self> {
        match find_config_file(start) {
            Some(path) => load_config(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Search for `.config/fontprune.yaml` walking up from `start`
fn find_config_file(start: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    None
}

/// Load and resolve configuration from a config file path
fn load_config(config_path: &Utf8Path) -> Result<ResolvedConfig> {
    let content = fs::read_to_string(config_path.as_std_path())?;
    let config = parse_config(&content).map_err(|message| Error::Config {
        path: config_path.to_owned(),
        message,
    })?;

    debug!(path = %config_path, "loaded configuration");

    Ok(ResolvedConfig {
        source: Some(config_path.to_owned()),
        fallback_font: config
            .fallback_font
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_FONT.to_string()),
        log: config.log.unwrap_or(false),
        skip_processed: config.skip_processed.unwrap_or(false),
    })
}

fn parse_config(content: &str) -> std::result::Result<FontpruneConfig, String> {
    if content.trim().is_empty() {
        return Ok(FontpruneConfig::default());
    }
    facet_yaml::from_str(content).map_err(|e| e.to_string())
}
