//! Best-effort directory listings for diagnostics.
//!
//! Listings only ever go to the log. A directory that cannot be read is
//! logged as a warning and never changes what the caller does next.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// Log the entries of `dir`, sorted by name.
///
/// Returns the number of entries seen, or `None` if the directory
/// could not be read.
pub fn log_directory_listing(label: &str, dir: &str) -> Option<usize> {
    let entries = match fs::read_dir(Path::new(dir)) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list {label} {dir}: {e}");
            return None;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    debug!(
        "{label} {dir} ({} entries): {}",
        names.len(),
        names.join(" ")
    );
    Some(names.len())
}
