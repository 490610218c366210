//! Workspace Preparer: output directories under the build root.
//!
//! Creation is idempotent. Anything that leaves a directory missing,
//! shadowed by a file, or unwritable is a `WorkspaceError`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::environment::{BIN_DIR_NAME, LIB_OUT_DIR_NAME};
use crate::error::WorkspaceError;

/// Directories the downstream build writes into, in creation order.
pub const WORKSPACE_DIRS: [&str; 2] = [LIB_OUT_DIR_NAME, BIN_DIR_NAME];

/// Ensure every directory in `names` exists under `root` and is writable.
///
/// Returns the full paths, in the order given.
pub fn prepare_workspace(root: &Path, names: &[&str]) -> Result<Vec<PathBuf>, WorkspaceError> {
    let mut prepared = Vec::with_capacity(names.len());
    for name in names {
        let path = root.join(name);
        ensure_directory(&path)?;
        prepared.push(path);
    }
    info!("Prepared output directories: {}", names.join(", "));
    Ok(prepared)
}

/// Ensure the provided directory exists and is writable.
///
/// An existing directory is left untouched apart from the write check.
pub fn ensure_directory(path: &Path) -> Result<(), WorkspaceError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(WorkspaceError::NotADirectory(path.to_path_buf()));
        }
        debug!("Directory already present: {}", path.display());
    } else {
        fs::create_dir_all(path).map_err(|e| WorkspaceError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Created directory: {}", path.display());
    }

    verify_writable(path)
}

/// Verify a directory is writable by creating and removing a probe file.
pub fn verify_writable(path: &Path) -> Result<(), WorkspaceError> {
    let test_file = path.join(".cpptraj_config_write_test");
    let not_writable = |e: std::io::Error| WorkspaceError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&test_file)
        .map_err(not_writable)?;
    file.write_all(b"test").map_err(not_writable)?;
    drop(file);
    let _ = fs::remove_file(&test_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_directories() {
        let root = tempdir().unwrap();
        let prepared = prepare_workspace(root.path(), &WORKSPACE_DIRS).unwrap();

        assert_eq!(prepared, vec![root.path().join("lib"), root.path().join("bin")]);
        assert!(root.path().join("lib").is_dir());
        assert!(root.path().join("bin").is_dir());
    }

    #[test]
    fn preparing_twice_is_idempotent() {
        let root = tempdir().unwrap();
        prepare_workspace(root.path(), &WORKSPACE_DIRS).unwrap();
        fs::write(root.path().join("lib").join("keep.a"), b"x").unwrap();

        prepare_workspace(root.path(), &WORKSPACE_DIRS).unwrap();

        let mut entries: Vec<_> = fs::read_dir(root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        entries.sort();
        assert_eq!(entries, vec!["bin", "lib"]);
        assert!(root.path().join("lib").join("keep.a").exists());
    }

    #[test]
    fn file_in_the_way_is_rejected() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("bin"), b"not a dir").unwrap();

        let err = prepare_workspace(root.path(), &WORKSPACE_DIRS).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotADirectory(p) if p.ends_with("bin")));
    }

    #[test]
    fn write_probe_is_cleaned_up() {
        let root = tempdir().unwrap();
        verify_writable(root.path()).unwrap();
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }
}
