pub mod genre;
pub mod ids;
pub mod links;
pub mod movie;

pub use genre::{genre_label, map_genre_ids, GENRE_TABLE, UNKNOWN_GENRE};
pub use ids::{is_cross_ref_id, CROSS_REF_PREFIX};
pub use links::{Link, MovieLinks, LINK_UNAVAILABLE};
pub use movie::{is_available, CanonicalMovie, ReleaseYear, UNAVAILABLE, UNKNOWN_YEAR};
