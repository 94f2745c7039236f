use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub primary: PrimaryCatalogConfig,
    #[serde(default)]
    pub secondary: SecondaryCatalogConfig,
    #[serde(default)]
    pub resolution: ResolutionConfig,
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Primary catalog (search, credits, videos; numeric ids)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryCatalogConfig {
    #[serde(default = "default_primary_base_url")]
    pub base_url: String,
    /// Prefix joined with the catalog's relative poster paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

/// Secondary catalog (plot, rating; `tt` cross-reference ids)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryCatalogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_secondary_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    #[serde(default)]
    pub strategy: ResolutionStrategy,

    #[serde(default)]
    pub precedence: Precedence,

    /// Treat a missing cross-reference id as "not found" instead of returning
    /// a primary-only record
    #[serde(default)]
    pub require_cross_ref: bool,

    /// Number of cast names to include; `None` skips the excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_limit: Option<usize>,

    /// Upper bound applied by the command layer around one resolution
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Order in which the catalogs are consulted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    /// Primary search only; no cross-reference id
    PrimaryOnly,
    /// Primary search, then secondary title + year lookup
    #[default]
    PrimaryFirst,
    /// Secondary title lookup, then primary lookup by cross-reference id
    SecondaryFirst,
}

/// Which catalog wins when both supply title, year, plot or poster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    #[default]
    PreferSecondary,
    PreferPrimary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Must contain `{slug}`
    #[serde(default = "default_catalog_template")]
    pub catalog_template: String,
    /// Must contain `{id}`; receives the cross-reference id without its `tt` prefix
    #[serde(default = "default_streaming_template")]
    pub streaming_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON output; unset means "JSON when stdout is not a terminal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_primary_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_secondary_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_catalog_template() -> String {
    "https://letterboxd.com/film/{slug}/".to_string()
}

fn default_streaming_template() -> String {
    "https://multiembed.mov/?video_id={id}".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PrimaryCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_primary_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Default for SecondaryCatalogConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_secondary_base_url(),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            strategy: ResolutionStrategy::default(),
            precedence: Precedence::default(),
            require_cross_ref: false,
            cast_limit: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            catalog_template: default_catalog_template(),
            streaming_template: default_streaming_template(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.resolution.timeout_secs == 0 {
            return Err(anyhow::anyhow!("resolution.timeout_secs must be greater than zero"));
        }

        if !self.secondary.enabled {
            if self.resolution.strategy == ResolutionStrategy::SecondaryFirst {
                return Err(anyhow::anyhow!("strategy secondary-first needs the secondary catalog to be enabled"));
            }
            if self.resolution.require_cross_ref {
                return Err(anyhow::anyhow!("require_cross_ref needs the secondary catalog to be enabled"));
            }
        }

        if self.resolution.require_cross_ref && self.resolution.strategy == ResolutionStrategy::PrimaryOnly {
            return Err(anyhow::anyhow!("require_cross_ref cannot be satisfied by strategy primary-only"));
        }

        if self.resolution.cast_limit == Some(0) {
            return Err(anyhow::anyhow!("resolution.cast_limit must be at least 1 when set"));
        }

        if !self.links.catalog_template.contains("{slug}") {
            return Err(anyhow::anyhow!("links.catalog_template must contain {{slug}}"));
        }
        if !self.links.streaming_template.contains("{id}") {
            return Err(anyhow::anyhow!("links.streaming_template must contain {{id}}"));
        }

        Ok(())
    }

    /// Whether the secondary catalog takes part in resolution at all
    pub fn uses_secondary(&self) -> bool {
        self.secondary.enabled && self.resolution.strategy != ResolutionStrategy::PrimaryOnly
    }
}
