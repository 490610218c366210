//! One-shot capture of process environment state.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigurationError;

/// Environment variables, working directory and executable location,
/// captured once at process start.
///
/// Resolution code only ever reads from a snapshot, so tests build one
/// explicitly instead of mutating the real process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, OsString>,
    current_dir: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
}

impl EnvSnapshot {
    /// Capture the live process environment.
    pub fn capture() -> Self {
        let vars = env::vars_os()
            .filter_map(|(key, value)| key.into_string().ok().map(|key| (key, value)))
            .collect();

        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        Self {
            vars,
            current_dir: env::current_dir().ok(),
            exe_dir,
        }
    }

    /// Empty snapshot rooted at `current_dir`.
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: Some(current_dir.into()),
            exe_dir: None,
        }
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_exe_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exe_dir = Some(dir.into());
        self
    }

    /// Look up a variable, treating unset, empty and whitespace-only alike.
    ///
    /// A value that is not valid Unicode is reported rather than dropped,
    /// since substituting a lossy conversion would corrupt the path.
    pub fn var(&self, key: &'static str) -> Result<Option<String>, ConfigurationError> {
        let Some(raw) = self.vars.get(key) else {
            return Ok(None);
        };

        let value = raw
            .to_str()
            .ok_or_else(|| ConfigurationError::NotUnicode {
                key,
                path: PathBuf::from(raw),
            })?;

        if value.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(value.to_string()))
        }
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn exe_dir(&self) -> Option<&Path> {
        self.exe_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_unset() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("LIBRARY_INC", "")
            .with_var("LIBRARY_LIB", "   ");

        assert_eq!(snapshot.var("LIBRARY_INC").unwrap(), None);
        assert_eq!(snapshot.var("LIBRARY_LIB").unwrap(), None);
        assert_eq!(snapshot.var("PREFIX").unwrap(), None);
    }

    #[test]
    fn values_are_returned_verbatim() {
        let snapshot = EnvSnapshot::new("/work").with_var("PREFIX", "/opt/conda ");
        assert_eq!(
            snapshot.var("PREFIX").unwrap(),
            Some("/opt/conda ".to_string())
        );
    }

    #[test]
    fn capture_records_working_directory() {
        let snapshot = EnvSnapshot::capture();
        assert_eq!(snapshot.current_dir(), env::current_dir().ok().as_deref());
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_value_is_an_error() {
        use std::os::unix::ffi::OsStringExt;

        let snapshot = EnvSnapshot::new("/work")
            .with_var("LIBRARY_INC", OsString::from_vec(vec![0x2f, 0xff, 0xfe]));
        assert!(matches!(
            snapshot.var("LIBRARY_INC"),
            Err(ConfigurationError::NotUnicode {
                key: "LIBRARY_INC",
                ..
            })
        ));
    }
}
