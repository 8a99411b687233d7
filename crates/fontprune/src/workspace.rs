//! Finding the input document and writing results next to it.

use std::io::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::debug;

use crate::{Error, Result};

const PROCESSED_INFIX: &str = "processed";
const LOG_SUFFIX: &str = "fonts.log";

/// First `*.html` file of `dir` (case-insensitive), in directory-listing order.
///
/// Directories and names that are not valid UTF-8 are skipped. Earlier
/// outputs (`*.processed.html`) are candidates like any other file unless
/// `skip_processed` is set.
pub fn find_first_html(dir: &Utf8Path, skip_processed: bool) -> Result<Option<Utf8PathBuf>> {
    for entry in fs::read_dir(dir.as_std_path())? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };

        let lowered = name.to_ascii_lowercase();
        if !lowered.ends_with(".html") {
            continue;
        }
        if skip_processed && lowered.ends_with(&format!(".{PROCESSED_INFIX}.html")) {
            continue;
        }
        if !entry.file_type()?.is_file() {
            continue;
        }

        debug!(%name, "found input document");
        return Ok(Some(dir.join(name)));
    }

    Ok(None)
}

/// `mail.HTML` → `mail.processed.HTML`, next to the input.
pub fn processed_path(input: &Utf8Path) -> Utf8PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    match input.extension() {
        Some(ext) => input.with_file_name(format!("{stem}.{PROCESSED_INFIX}.{ext}")),
        None => input.with_file_name(format!("{stem}.{PROCESSED_INFIX}")),
    }
}

/// `mail.html` → `mail.fonts.log`, next to the input.
pub fn log_path(input: &Utf8Path) -> Utf8PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    input.with_file_name(format!("{stem}.{LOG_SUFFIX}"))
}

/// Read a document as UTF-8 text.
pub fn read_document(path: &Utf8Path) -> Result<String> {
    Ok(fs::read_to_string(path.as_std_path())?)
}

/// Write `contents` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over the target.
pub fn write_atomic(path: &Utf8Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_owned(),
        source: e.error,
    })?;

    debug!(%path, bytes = contents.len(), "wrote output");
    Ok(())
}

/// Append `entry` to the file at `path`, creating it if needed.
pub fn append_log(path: &Utf8Path, entry: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_std_path())?;
    file.write_all(entry.as_bytes())?;
    Ok(())
}
