use std::path::Path;

use bundlemark_core::{EditingSession, SessionOptions, SequentialIds};
use serde::Serialize;

use crate::page_range::{PageSet, parse_page_range};

/// Load session options from a JSON file, or the defaults when no file is given.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing or
/// malformed.
pub fn load_options(config: Option<&Path>) -> Result<SessionOptions, i32> {
    let Some(path) = config else {
        return Ok(SessionOptions::default());
    };
    if !path.exists() {
        eprintln!("Error: config not found: {}", path.display());
        return Err(1);
    }
    let text = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", path.display());
        1
    })?;
    let options: SessionOptions = serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid config {}: {e}", path.display());
        1
    })?;
    options.redaction_style.validate().map_err(|e| {
        eprintln!("Error: invalid config {}: {e}", path.display());
        1
    })?;
    Ok(options)
}

/// Build an editing session from CLI flags.
pub fn build_session(config: Option<&Path>, sequential_ids: bool) -> Result<EditingSession, i32> {
    let options = load_options(config)?;
    tracing::debug!(?options, sequential_ids, "starting session");
    let session = EditingSession::with_options(options);
    Ok(if sequential_ids {
        session.with_id_generator(SequentialIds::new("annot"))
    } else {
        session
    })
}

/// Resolve an optional page range string into a set of 1-based pages.
///
/// `None` means every page.
pub fn resolve_pages(pages: Option<&str>) -> Result<Option<PageSet>, i32> {
    pages
        .map(|range| {
            parse_page_range(range).map_err(|e| {
                eprintln!("Error: {e}");
                1
            })
        })
        .transpose()
}

/// Print a value as a single line of JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), i32> {
    let json_str = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

/// Print session warnings to stderr.
pub fn report_warnings(session: &mut EditingSession) {
    for warning in session.take_warnings() {
        eprintln!("Warning: {warning}");
    }
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
