//! Terminal output for command results.
//!
//! Format-only: no resolution or probing happens here.

pub mod probe_report;

pub use probe_report::{Palette, format_probe_row, print_probe_report, print_separator};
