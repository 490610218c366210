//! Compiler version lookup for diagnostics.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `<program> --version` and extract the version number.
///
/// Returns `None` if the program is missing, fails, or prints nothing
/// that looks like a version.
pub async fn compiler_version(program: &str) -> Option<String> {
    let mut cmd = Command::new(program);
    cmd.arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = timeout(VERSION_TIMEOUT, cmd.output()).await.ok()?.ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    // Some compilers print the banner on stderr
    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    parse_version_line(text.lines().next()?)
}

/// Pull a dotted version number out of a `--version` banner line.
///
/// "g++ (Ubuntu 13.2.0-4ubuntu3) 13.2.0" -> "13.2.0"
/// "Apple clang version 15.0.0 (clang-1500.1.0.2.5)" -> "15.0.0"
pub fn parse_version_line(line: &str) -> Option<String> {
    if let Some(rest) = line.split("clang version").nth(1) {
        return rest.split_whitespace().next().map(str::to_string);
    }

    line.split_whitespace()
        .rev()
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()) && word.contains('.'))
        .map(str::to_string)
}
