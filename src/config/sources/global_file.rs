//! Global config file source: $XDG_CONFIG_HOME/folio/config.toml or ~/.config/folio/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file, resolved from the given environment.
pub fn global_config_path(env: &HashMap<String, String>) -> Option<PathBuf> {
    if let Some(xdg) = env.get("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join("folio").join("config.toml"));
    }
    env.get("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("folio")
            .join("config.toml")
    })
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    env: &HashMap<String, String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path(env) {
        if path.exists() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        } else {
            debug!(
                config_path = %path.display(),
                "No global configuration file; using workspace and environment only"
            );
        }
    }
    Ok(builder)
}
