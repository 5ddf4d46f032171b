//! Config loader facade: the only entry point for building a [`FolioConfig`].

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::FolioConfig;
use crate::error::ApiError;
use config::File;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load layered configuration for a workspace using the process environment.
    pub fn load(workspace_root: &Path) -> Result<FolioConfig, ApiError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(workspace_root, &env)
    }

    /// Load layered configuration for a workspace against an explicit environment.
    pub fn load_with_env(
        workspace_root: &Path,
        env: &HashMap<String, String>,
    ) -> Result<FolioConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, env)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root, env)?;
        let builder = environment::add_to_builder(builder, env);

        let mut config: FolioConfig = builder.build()?.try_deserialize()?;
        environment::apply_aliases(&mut config, env);
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load a single configuration file (plus environment), skipping the global and
    /// workspace files. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<FolioConfig, ApiError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from_file_with_env(path, &env)
    }

    pub fn load_from_file_with_env(
        path: &Path,
        env: &HashMap<String, String>,
    ) -> Result<FolioConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder, env);

        let mut config: FolioConfig = builder.build()?.try_deserialize()?;
        environment::apply_aliases(&mut config, env);
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }
}
