//! Config Renderer: template + environment + profile to `config.h`.
//!
//! Rendering is pure; writing is a separate step so callers can print a
//! document without touching the filesystem.

mod document;
mod template;

use std::path::{Path, PathBuf};

use crate::environment::ResolvedEnvironment;
use crate::error::RenderError;
use crate::platform::PlatformProfile;

pub use document::{ConfigDocument, ConfigLine};
pub use template::{CONFIG_TEMPLATE, PATH_PLACEHOLDERS, TemplateValues, substitute};

/// Name of the generated build-variable file.
pub const CONFIG_FILE_NAME: &str = "config.h";

/// Render `CONFIG_TEMPLATE` for the given environment and profile.
pub fn render(
    env: &ResolvedEnvironment,
    profile: &PlatformProfile,
) -> Result<ConfigDocument, RenderError> {
    let values = TemplateValues::new(env, profile);
    let text = substitute(CONFIG_TEMPLATE, &values)?;
    Ok(ConfigDocument::parse(&text))
}

/// Render and write `config.h` into `dir`, returning the written path.
pub fn render_to_dir(
    env: &ResolvedEnvironment,
    profile: &PlatformProfile,
    dir: &Path,
) -> Result<(ConfigDocument, PathBuf), RenderError> {
    let document = render(env, profile)?;
    let path = dir.join(CONFIG_FILE_NAME);
    document.write_to(&path)?;
    Ok((document, path))
}
