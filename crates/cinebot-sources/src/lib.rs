pub mod error;
pub mod factory;
pub mod http;
pub mod omdb;
pub mod tmdb;
pub mod traits;
pub mod types;

pub use error::CatalogError;
pub use factory::CatalogSet;
pub use omdb::OmdbClient;
pub use tmdb::TmdbClient;
pub use traits::{PrimaryCatalog, SecondaryCatalog};
pub use types::{CastMember, Credits, CrewMember, PrimaryGenre, PrimaryMovie, SecondaryLookup, SecondaryRecord, Video};
