//! Environment Resolver: snapshot + profile to `ResolvedEnvironment`.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::EnvSnapshot;
use crate::error::ConfigurationError;
use crate::platform::PlatformProfile;

/// Header search directory.
pub const INCLUDE_VAR: &str = "LIBRARY_INC";
/// Library search directory.
pub const LIB_VAR: &str = "LIBRARY_LIB";
/// Directory holding the trial sources.
pub const RECIPE_VAR: &str = "RECIPE_DIR";

/// Output subdirectory for built libraries, relative to the working directory.
pub const LIB_OUT_DIR_NAME: &str = "lib";
/// Output subdirectory for built executables, relative to the working directory.
pub const BIN_DIR_NAME: &str = "bin";

/// How a resolved path was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "variable", rename_all = "snake_case")]
pub enum PathSource {
    /// Taken verbatim from the named variable.
    EnvVar(&'static str),
    /// Computed from the named installation-prefix variable.
    Prefix(&'static str),
    /// Directory containing the running executable.
    ExecutableDir,
    /// Current working directory.
    WorkingDir,
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "${var}"),
            Self::Prefix(var) => write!(f, "${var} fallback"),
            Self::ExecutableDir => f.write_str("executable directory"),
            Self::WorkingDir => f.write_str("working directory"),
        }
    }
}

/// Provenance of the paths that have a fallback rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSources {
    pub include_dir: PathSource,
    pub lib_dir: PathSource,
    pub recipe_dir: PathSource,
}

/// Every path the renderer and prober need, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnvironment {
    pub include_dir: String,
    pub lib_dir: String,
    /// Only required when one of the directories above falls back to it.
    pub lib_prefix: Option<String>,
    pub recipe_dir: String,
    pub home_dir: String,
    pub bin_dir: String,
    pub lib_out_dir: String,
    pub sources: ResolutionSources,
}

impl ResolvedEnvironment {
    /// Resolve all paths from a snapshot for the given profile.
    ///
    /// Resolution order for the search directories:
    /// 1. `LIBRARY_INC` / `LIBRARY_LIB`, used verbatim when non-empty
    /// 2. The profile's prefix variable joined with `include` / `lib`
    ///
    /// `recipe_dir` comes from `RECIPE_DIR`, falling back to the directory of
    /// the running executable.
    pub fn resolve(
        snapshot: &EnvSnapshot,
        profile: &PlatformProfile,
    ) -> Result<Self, ConfigurationError> {
        let lib_prefix = snapshot.var(profile.prefix_var)?;

        let (include_dir, include_source) =
            resolve_search_dir(snapshot, profile, lib_prefix.as_deref(), INCLUDE_VAR, "include")?;
        let (lib_dir, lib_source) =
            resolve_search_dir(snapshot, profile, lib_prefix.as_deref(), LIB_VAR, "lib")?;
        let (recipe_dir, recipe_source) = resolve_recipe_dir(snapshot)?;

        let cwd = snapshot
            .current_dir()
            .ok_or_else(|| ConfigurationError::CurrentDir("not available".to_string()))?;
        let home_dir = path_to_string("home_dir", cwd)?;
        let bin_dir = profile.join(&home_dir, BIN_DIR_NAME);
        let lib_out_dir = profile.join(&home_dir, LIB_OUT_DIR_NAME);

        let resolved = Self {
            include_dir,
            lib_dir,
            lib_prefix,
            recipe_dir,
            home_dir,
            bin_dir,
            lib_out_dir,
            sources: ResolutionSources {
                include_dir: include_source,
                lib_dir: lib_source,
                recipe_dir: recipe_source,
            },
        };

        debug!(
            include_dir = %resolved.include_dir,
            lib_dir = %resolved.lib_dir,
            recipe_dir = %resolved.recipe_dir,
            "Resolved environment"
        );

        Ok(resolved)
    }
}

fn resolve_search_dir(
    snapshot: &EnvSnapshot,
    profile: &PlatformProfile,
    prefix: Option<&str>,
    var: &'static str,
    subdir: &str,
) -> Result<(String, PathSource), ConfigurationError> {
    if let Some(value) = snapshot.var(var)? {
        return Ok((value, PathSource::EnvVar(var)));
    }

    if let Some(prefix) = prefix {
        return Ok((
            profile.join(prefix, subdir),
            PathSource::Prefix(profile.prefix_var),
        ));
    }

    let key = if var == INCLUDE_VAR {
        "include_dir"
    } else {
        "lib_dir"
    };
    Err(ConfigurationError::Unresolved {
        key,
        variables: format!("{var} or {}", profile.prefix_var),
    })
}

fn resolve_recipe_dir(snapshot: &EnvSnapshot) -> Result<(String, PathSource), ConfigurationError> {
    if let Some(value) = snapshot.var(RECIPE_VAR)? {
        return Ok((value, PathSource::EnvVar(RECIPE_VAR)));
    }

    let exe_dir = snapshot.exe_dir().ok_or(ConfigurationError::NoRecipeDir)?;
    Ok((
        path_to_string("recipe_dir", exe_dir)?,
        PathSource::ExecutableDir,
    ))
}

fn path_to_string(key: &'static str, path: &Path) -> Result<String, ConfigurationError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigurationError::NotUnicode {
            key,
            path: path.to_path_buf(),
        })
}

impl fmt::Display for ResolvedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "include_dir = {} ({})",
            self.include_dir, self.sources.include_dir
        )?;
        writeln!(f, "lib_dir = {} ({})", self.lib_dir, self.sources.lib_dir)?;
        writeln!(
            f,
            "lib_prefix = {}",
            self.lib_prefix.as_deref().unwrap_or("<unset>")
        )?;
        writeln!(
            f,
            "recipe_dir = {} ({})",
            self.recipe_dir, self.sources.recipe_dir
        )?;
        writeln!(f, "home_dir = {}", self.home_dir)?;
        writeln!(f, "bin_dir = {}", self.bin_dir)?;
        write!(f, "lib_out_dir = {}", self.lib_out_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix() -> PlatformProfile {
        PlatformProfile::posix()
    }

    #[test]
    fn explicit_variables_win_over_prefix() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("LIBRARY_INC", "/opt/inc")
            .with_var("LIBRARY_LIB", "/opt/lib")
            .with_var("PREFIX", "/conda")
            .with_var("RECIPE_DIR", "/recipe");

        let env = ResolvedEnvironment::resolve(&snapshot, &posix()).unwrap();
        assert_eq!(env.include_dir, "/opt/inc");
        assert_eq!(env.lib_dir, "/opt/lib");
        assert_eq!(env.lib_prefix.as_deref(), Some("/conda"));
        assert_eq!(env.sources.include_dir, PathSource::EnvVar(INCLUDE_VAR));
        assert_eq!(env.sources.recipe_dir, PathSource::EnvVar(RECIPE_VAR));
    }

    #[test]
    fn prefix_fallback_fills_missing_directories() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("PREFIX", "/conda/")
            .with_var("LIBRARY_INC", "")
            .with_exe_dir("/usr/local/bin");

        let env = ResolvedEnvironment::resolve(&snapshot, &posix()).unwrap();
        assert_eq!(env.include_dir, "/conda/include");
        assert_eq!(env.lib_dir, "/conda/lib");
        assert_eq!(env.sources.lib_dir, PathSource::Prefix("PREFIX"));
        assert_eq!(env.recipe_dir, "/usr/local/bin");
        assert_eq!(env.sources.recipe_dir, PathSource::ExecutableDir);
    }

    #[test]
    fn windows_profile_uses_library_prefix() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("PREFIX", "/ignored")
            .with_var("LIBRARY_PREFIX", "C:\\conda\\Library")
            .with_var("RECIPE_DIR", "C:\\recipe");

        let env = ResolvedEnvironment::resolve(&snapshot, &PlatformProfile::windows()).unwrap();
        assert_eq!(env.include_dir, "C:\\conda\\Library\\include");
        assert_eq!(env.lib_dir, "C:\\conda\\Library\\lib");
    }

    #[test]
    fn missing_include_dir_is_a_configuration_error() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("LIBRARY_LIB", "/opt/lib")
            .with_var("RECIPE_DIR", "/recipe");

        let err = ResolvedEnvironment::resolve(&snapshot, &posix()).unwrap_err();
        match err {
            ConfigurationError::Unresolved { key, variables } => {
                assert_eq!(key, "include_dir");
                assert_eq!(variables, "LIBRARY_INC or PREFIX");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_recipe_dir_without_executable_dir_fails() {
        let snapshot = EnvSnapshot::new("/work").with_var("PREFIX", "/conda");
        assert!(matches!(
            ResolvedEnvironment::resolve(&snapshot, &posix()),
            Err(ConfigurationError::NoRecipeDir)
        ));
    }

    #[test]
    fn output_directories_derive_from_working_directory() {
        let snapshot = EnvSnapshot::new("/src/cpptraj")
            .with_var("PREFIX", "/conda")
            .with_var("RECIPE_DIR", "/recipe");

        let env = ResolvedEnvironment::resolve(&snapshot, &posix()).unwrap();
        assert_eq!(env.home_dir, "/src/cpptraj");
        assert_eq!(env.bin_dir, "/src/cpptraj/bin");
        assert_eq!(env.lib_out_dir, "/src/cpptraj/lib");
        assert_eq!(env.sources.include_dir, PathSource::Prefix("PREFIX"));
    }

    #[test]
    fn serializes_with_sources() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("LIBRARY_INC", "/opt/inc")
            .with_var("PREFIX", "/conda")
            .with_var("RECIPE_DIR", "/recipe");
        let env = ResolvedEnvironment::resolve(&snapshot, &posix()).unwrap();

        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["include_dir"], "/opt/inc");
        assert_eq!(json["lib_prefix"], "/conda");
        assert_eq!(json["sources"]["include_dir"]["kind"], "env_var");
        assert_eq!(json["sources"]["include_dir"]["variable"], "LIBRARY_INC");
        assert_eq!(json["sources"]["lib_dir"]["kind"], "prefix");
    }

    #[test]
    fn display_lists_every_key() {
        let snapshot = EnvSnapshot::new("/work")
            .with_var("PREFIX", "/conda")
            .with_var("RECIPE_DIR", "/recipe");
        let output = ResolvedEnvironment::resolve(&snapshot, &posix())
            .unwrap()
            .to_string();

        for key in [
            "include_dir = ",
            "lib_dir = ",
            "lib_prefix = ",
            "recipe_dir = ",
            "home_dir = ",
            "bin_dir = ",
            "lib_out_dir = ",
        ] {
            assert!(output.contains(key), "missing {key}");
        }
    }
}
