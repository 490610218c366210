//! Platform profiles: the fixed constants that differ between targets.
//!
//! Exactly one profile is selected per invocation, either from the host
//! (`PlatformProfile::host`) or from an explicit override.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Which family of target the build configuration is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Posix,
    Windows,
}

impl PlatformKind {
    /// The platform this binary was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::Windows => "windows",
        }
    }

    pub const fn profile(self) -> PlatformProfile {
        match self {
            Self::Posix => PlatformProfile::posix(),
            Self::Windows => PlatformProfile::windows(),
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posix" | "unix" | "linux" | "macos" => Ok(Self::Posix),
            "windows" | "win" => Ok(Self::Windows),
            other => Err(format!("unknown platform '{other}' (expected posix or windows)")),
        }
    }
}

/// Immutable bundle of platform constants consumed by the renderer and prober.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    pub kind: PlatformKind,
    /// C compiler
    pub cc: &'static str,
    /// C++ compiler, also used to run the trial compilations
    pub cxx: &'static str,
    /// Fortran compiler
    pub fc: &'static str,
    pub opt_flags: &'static str,
    pub defines: &'static str,
    /// Position-independent code flag; empty where it has no meaning.
    pub pic_flag: &'static str,
    pub shared_suffix: &'static str,
    pub exe_suffix: &'static str,
    pub install_targets: &'static str,
    /// First linear-algebra assignment in the template.
    pub linalg_link: &'static str,
    /// Second linear-algebra assignment; this one wins downstream.
    pub linalg_override_link: &'static str,
    pub fortran_runtime_link: &'static str,
    pub netcdf_link: &'static str,
    pub compression_link: &'static str,
    /// Variable holding the installation prefix used for path fallbacks.
    pub prefix_var: &'static str,
    pub path_separator: char,
}

impl PlatformProfile {
    pub const fn posix() -> Self {
        Self {
            kind: PlatformKind::Posix,
            cc: "gcc",
            cxx: "g++",
            fc: "gfortran",
            opt_flags: "-O3",
            defines: "-DBINTRAJ -D_LARGEFILE_SOURCE -D_FILE_OFFSET_BITS=64",
            pic_flag: "-fPIC",
            shared_suffix: ".so",
            exe_suffix: "",
            install_targets: "install_cpptraj install_ambpdb",
            linalg_link: "-lopenblas",
            linalg_override_link: "-lmkl",
            fortran_runtime_link: "-lgfortran",
            netcdf_link: "-lnetcdf",
            compression_link: "-lz",
            prefix_var: "PREFIX",
            path_separator: '/',
        }
    }

    pub const fn windows() -> Self {
        Self {
            kind: PlatformKind::Windows,
            cc: "gcc",
            cxx: "g++",
            fc: "gfortran",
            opt_flags: "-O3",
            defines: "-DBINTRAJ -D_LARGEFILE_SOURCE -D_FILE_OFFSET_BITS=64",
            pic_flag: "",
            shared_suffix: ".dll",
            exe_suffix: ".exe",
            install_targets: "install_cpptraj install_ambpdb",
            linalg_link: "-lopenblas",
            linalg_override_link: "-lmkl_rt",
            fortran_runtime_link: "-lgfortran",
            netcdf_link: "-lnetcdf",
            compression_link: "-lzlib",
            prefix_var: "LIBRARY_PREFIX",
            path_separator: '\\',
        }
    }

    pub const fn host() -> Self {
        PlatformKind::host().profile()
    }

    /// Join path segments with this platform's separator.
    ///
    /// Paths are handled as strings so a Windows configuration can be
    /// rendered on a POSIX host and vice versa.
    pub fn join(&self, base: &str, segment: &str) -> String {
        let trimmed = base.trim_end_matches(['/', '\\']);
        if trimmed.is_empty() {
            return format!("{}{segment}", self.path_separator);
        }
        format!("{trimmed}{}{segment}", self.path_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_accepts_aliases() {
        assert_eq!("POSIX".parse::<PlatformKind>(), Ok(PlatformKind::Posix));
        assert_eq!("linux".parse::<PlatformKind>(), Ok(PlatformKind::Posix));
        assert_eq!("win".parse::<PlatformKind>(), Ok(PlatformKind::Windows));
        assert!("amiga".parse::<PlatformKind>().is_err());
    }

    #[test]
    fn join_uses_profile_separator() {
        assert_eq!(PlatformProfile::posix().join("/opt/", "lib"), "/opt/lib");
        assert_eq!(
            PlatformProfile::windows().join("C:\\conda\\Library", "include"),
            "C:\\conda\\Library\\include"
        );
        assert_eq!(PlatformProfile::posix().join("/", "bin"), "/bin");
    }

    #[test]
    fn profiles_differ_only_in_platform_constants() {
        let posix = PlatformProfile::posix();
        let windows = PlatformProfile::windows();
        assert_eq!(posix.install_targets, windows.install_targets);
        assert_ne!(posix.shared_suffix, windows.shared_suffix);
        assert_ne!(posix.exe_suffix, windows.exe_suffix);
    }

    #[test]
    fn host_profile_matches_kind() {
        assert_eq!(PlatformProfile::host().kind, PlatformKind::host());
    }
}
