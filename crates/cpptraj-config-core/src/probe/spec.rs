//! Probe descriptions and outcomes.

use std::time::Duration;

use serde::Serialize;

use super::sources::{COMPRESSION_SOURCE, LINALG_SOURCE, NETCDF_SOURCE};
use crate::platform::PlatformProfile;

/// One dependency check: which trial program to build and what to link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeSpec {
    /// Human-readable library name for reports.
    pub library: String,
    /// File name of the trial source, looked up in the recipe directory.
    pub trial_source: String,
    /// Link flag(s), whitespace separated.
    pub link_flag: String,
}

impl ProbeSpec {
    pub fn new(
        library: impl Into<String>,
        trial_source: impl Into<String>,
        link_flag: impl Into<String>,
    ) -> Self {
        Self {
            library: library.into(),
            trial_source: trial_source.into(),
            link_flag: link_flag.into(),
        }
    }

    /// Output stem for the trial executable: the source name minus extension.
    pub fn output_stem(&self) -> &str {
        self.trial_source
            .rsplit_once('.')
            .map_or(self.trial_source.as_str(), |(stem, _)| stem)
    }
}

/// The probes run by default, in declaration order.
///
/// The linear-algebra probe links the override flag plus the Fortran
/// runtime, matching the effective `CPPTRAJ_LIB` assignment.
pub fn default_probes(profile: &PlatformProfile) -> Vec<ProbeSpec> {
    let linalg = format!(
        "{} {}",
        profile.linalg_override_link, profile.fortran_runtime_link
    );
    vec![
        ProbeSpec::new("netcdf", NETCDF_SOURCE, profile.netcdf_link),
        ProbeSpec::new("compression", COMPRESSION_SOURCE, profile.compression_link),
        ProbeSpec::new("linear-algebra", LINALG_SOURCE, linalg.trim()),
    ]
}

/// Outcome of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub library: String,
    /// The exact command that was run.
    pub command: String,
    pub success: bool,
    /// Compiler/linker output. Never empty for a failed probe.
    pub diagnostic: String,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

/// All probe outcomes from one run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }
}
