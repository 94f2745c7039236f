pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, LinkConfig, LoggingConfig, Precedence, PrimaryCatalogConfig, ResolutionConfig, ResolutionStrategy, SecondaryCatalogConfig};
pub use credentials::{CredentialStore, OMDB_API_KEY_ENV, TMDB_API_KEY_ENV};
pub use paths::{container_base_path, PathManager};
