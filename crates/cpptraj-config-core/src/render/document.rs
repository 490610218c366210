//! The rendered build-variable document.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::RenderError;

/// One line of a build-variable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigLine {
    Blank,
    Comment { text: String },
    Assignment { key: String, value: String },
}

impl fmt::Display for ConfigLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Comment { text } => write!(f, "#{text}"),
            Self::Assignment { key, value } => write!(f, "{key}={value}"),
        }
    }
}

/// Ordered `KEY=VALUE` lines, duplicates included.
///
/// Keys are not unique. The downstream build tool reads the file top to
/// bottom, so a later assignment replaces an earlier one; `value` applies
/// that rule and `assignments` exposes every occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    lines: Vec<ConfigLine>,
}

impl ConfigDocument {
    /// Parse substituted template text into lines.
    ///
    /// Runs of whitespace inside a value collapse to a single space, so an
    /// empty platform constant leaves no gap behind.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|raw| {
                let line = raw.trim();
                if line.is_empty() {
                    ConfigLine::Blank
                } else if let Some(text) = line.strip_prefix('#') {
                    ConfigLine::Comment {
                        text: text.to_string(),
                    }
                } else if let Some((key, value)) = line.split_once('=') {
                    ConfigLine::Assignment {
                        key: key.trim().to_string(),
                        value: value.split_whitespace().collect::<Vec<_>>().join(" "),
                    }
                } else {
                    ConfigLine::Comment {
                        text: format!(" {line}"),
                    }
                }
            })
            .collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    /// Every `(key, value)` pair in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            ConfigLine::Assignment { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// Every value assigned to `key`, in document order.
    pub fn assignments(&self, key: &str) -> Vec<&str> {
        self.entries()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .collect()
    }

    /// The effective value of `key`: the last assignment wins.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .last()
    }

    /// True if the rendered text contains `line` exactly.
    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l.to_string() == line)
    }

    /// Write the document to `path`, replacing any previous content.
    ///
    /// The text goes to a temporary file in the same directory which is then
    /// renamed over `path`, so a failed write never leaves a truncated file.
    /// An existing file keeps its permissions; a new one gets the same mode a
    /// plain create would, subject to the umask.
    pub fn write_to(&self, path: &Path) -> Result<(), RenderError> {
        let write_error = |reason: String| RenderError::Write {
            path: path.to_path_buf(),
            reason,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Requested mode passes through the umask like File::create.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder
            .tempfile_in(dir)
            .map_err(|e| write_error(e.to_string()))?;

        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| write_error(e.to_string()))?;
        }

        tmp.write_all(self.to_string().as_bytes())
            .map_err(|e| write_error(e.to_string()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| write_error(e.to_string()))?;
        tmp.persist(path)
            .map_err(|e| write_error(e.error.to_string()))?;

        info!(
            "Wrote {} ({} assignments)",
            path.display(),
            self.entries().count()
        );
        Ok(())
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
