//! Environment resolution for the configure step.
//!
//! - `EnvSnapshot` captures process state once
//! - `ResolvedEnvironment::resolve` turns it into concrete path strings
//! - `listing` logs directory contents for diagnostics only

mod listing;
mod resolver;
mod snapshot;

pub use listing::log_directory_listing;
pub use resolver::{
    BIN_DIR_NAME, INCLUDE_VAR, LIB_OUT_DIR_NAME, LIB_VAR, PathSource, RECIPE_VAR,
    ResolutionSources, ResolvedEnvironment,
};
pub use snapshot::EnvSnapshot;
