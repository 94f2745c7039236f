pub mod chat;
pub mod config;
pub mod info;
pub mod links;

use anyhow::{Context, Result};
use cinebot_config::{Config, CredentialStore, PathManager};
use cinebot_core::{Resolver, ResolverOptions};
use cinebot_sources::CatalogSet;
use std::path::PathBuf;
use tracing::debug;

/// Where the config, credentials and logs live for this invocation
pub fn path_manager(config_dir: Option<PathBuf>) -> Result<PathManager> {
    if let Some(dir) = config_dir {
        return Ok(PathManager::with_base(dir));
    }
    if std::env::var_os("CINEBOT_BASE_PATH").is_some() {
        return Ok(PathManager::from_docker_env());
    }
    PathManager::new()
}

/// Load `config.toml`, falling back to defaults. Validation is left to the
/// commands that resolve or derive links.
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_path = paths.config_file();
    Config::load_or_default(&config_path).with_context(|| format!("Failed to load {}", config_path.display()))
}

/// Settings used before dispatch. `config` subcommands read or rewrite the
/// file themselves, so they start from defaults and a broken file cannot
/// lock them out.
pub fn startup_config(paths: &PathManager, reads_config: bool) -> Result<Config> {
    if reads_config {
        load_config(paths)
    } else {
        Ok(Config::default())
    }
}

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials.load()?;
    Ok(credentials)
}

pub fn build_resolver(paths: &PathManager, config: &Config) -> Result<Resolver> {
    config.validate()?;
    let credentials = load_credentials(paths)?;
    let catalogs = CatalogSet::from_config(config, &credentials)?;
    debug!(
        "Resolver using strategy {:?}, precedence {:?}",
        config.resolution.strategy, config.resolution.precedence
    );
    Ok(Resolver::new(catalogs, ResolverOptions::from_config(config)))
}
