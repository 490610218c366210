//! Display utilities for dependency probe output.

use std::io::IsTerminal;

use cpptraj_config_core::{ProbeReport, ProbeResult};

/// Diagnostic lines shown per failed probe before truncating.
const MAX_DIAGNOSTIC_LINES: usize = 8;

/// ANSI color codes, empty when output is not a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    green: &'static str,
    red: &'static str,
    bold: &'static str,
    reset: &'static str,
}

impl Palette {
    pub const ANSI: Self = Self {
        green: "\x1b[32m",
        red: "\x1b[31m",
        bold: "\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        green: "",
        red: "",
        bold: "",
        reset: "",
    };

    /// Colors only when stdout is a terminal; build logs get plain text.
    pub fn for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }
}

pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// One status row: marker, library name, elapsed time.
pub fn format_probe_row(result: &ProbeResult, palette: Palette) -> String {
    let Palette {
        green, red, reset, ..
    } = palette;
    let status = if result.success {
        format!("{green}✓ linked{reset}")
    } else {
        format!("{red}✗ failed{reset}")
    };
    format!(
        "{:<16} {:<20} {:>6} ms",
        result.library,
        status,
        result.elapsed.as_millis()
    )
}

/// Print the status table, then the command and diagnostic of each failure.
pub fn print_probe_report(report: &ProbeReport) {
    let palette = Palette::for_stdout();
    let Palette { bold, reset, .. } = palette;

    println!("\n{bold}Dependency probes:{reset}");
    print_separator(48);
    for result in &report.results {
        println!("{}", format_probe_row(result, palette));
    }
    print_separator(48);
    println!(
        "{}/{} libraries linked",
        report.passed_count(),
        report.results.len()
    );

    for failure in report.failures() {
        println!("\n{bold}{}{reset}: {}", failure.library, failure.command);
        let lines: Vec<&str> = failure.diagnostic.lines().collect();
        for line in lines.iter().take(MAX_DIAGNOSTIC_LINES) {
            println!("  {line}");
        }
        if lines.len() > MAX_DIAGNOSTIC_LINES {
            println!("  ... {} more lines", lines.len() - MAX_DIAGNOSTIC_LINES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(success: bool, diagnostic: &str) -> ProbeResult {
        ProbeResult {
            library: "netcdf".to_string(),
            command: "g++ -I/opt/inc testp.cpp -o testp -L/opt/lib -lnetcdf".to_string(),
            success,
            diagnostic: diagnostic.to_string(),
            elapsed: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_row_shows_status_and_elapsed() {
        let row = format_probe_row(&result(true, ""), Palette::ANSI);
        assert!(row.starts_with("netcdf"));
        assert!(row.contains("\x1b[32m✓ linked\x1b[0m"));
        assert!(row.ends_with("42 ms"));

        let failed = format_probe_row(&result(false, "ld: cannot find -lnetcdf"), Palette::ANSI);
        assert!(failed.contains("failed"));
    }

    #[test]
    fn test_plain_row_has_no_escape_codes() {
        for success in [true, false] {
            let row = format_probe_row(&result(success, "x"), Palette::PLAIN);
            assert!(!row.contains('\x1b'), "{row:?}");
        }
    }

    #[test]
    fn test_print_report_with_long_diagnostic() {
        let long = (0..20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let report = ProbeReport {
            results: vec![result(true, ""), result(false, &long)],
        };

        // Just verify it doesn't panic
        print_probe_report(&report);
    }
}
