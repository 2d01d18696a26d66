// src/infra/paths.rs — Config file locations
//
// HCPCOACH_HOME overrides everything. Otherwise config lives in ~/.hcpcoach/,
// falling back to the platform config dir when no home directory is known.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn hcpcoach_home() -> Option<PathBuf> {
    std::env::var_os("HCPCOACH_HOME").map(PathBuf::from)
}

/// Configuration directory: $HCPCOACH_HOME/ or ~/.hcpcoach/
pub fn config_dir() -> PathBuf {
    if let Some(home) = hcpcoach_home() {
        return home;
    }
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(".hcpcoach");
    }
    ProjectDirs::from("", "", "hcpcoach")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".hcpcoach"))
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default location for extra persona definitions.
pub fn personas_file_path() -> PathBuf {
    config_dir().join("personas.toml")
}
