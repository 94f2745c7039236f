use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

const TMDB_API_KEY: &str = "tmdb_api_key";
const OMDB_API_KEY: &str = "omdb_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// API keys for the two catalogs.
///
/// Keys are read from `credentials.toml`; the `TMDB_API_KEY` and
/// `OMDB_API_KEY` environment variables take precedence over the file.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    pub fn set_omdb_api_key(&mut self, key: String) {
        self.set(OMDB_API_KEY.to_string(), key);
    }

    /// Primary catalog key, environment first
    pub fn tmdb_api_key(&self) -> Option<String> {
        self.key_with_env_override(TMDB_API_KEY_ENV, TMDB_API_KEY)
    }

    /// Secondary catalog key, environment first
    pub fn omdb_api_key(&self) -> Option<String> {
        self.key_with_env_override(OMDB_API_KEY_ENV, OMDB_API_KEY)
    }

    fn key_with_env_override(&self, env_var: &str, key: &str) -> Option<String> {
        std::env::var(env_var)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.get(key).filter(|value| !value.trim().is_empty()).cloned())
    }
}
