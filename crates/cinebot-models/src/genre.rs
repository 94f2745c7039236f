/// Label used for genre ids missing from [`GENRE_TABLE`]
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

/// Standard movie genre codes of the primary catalog
pub const GENRE_TABLE: [(u32, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn genre_label(id: u32) -> &'static str {
    GENRE_TABLE
        .iter()
        .find(|(code, _)| *code == id)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_GENRE)
}

/// Map genre ids to labels in input order.
///
/// Repeated ids are collapsed (first occurrence wins). Unmapped ids are kept
/// as [`UNKNOWN_GENRE`] so the number of distinct ids is preserved; two
/// different unmapped ids therefore yield two "Unknown Genre" entries.
pub fn map_genre_ids(ids: &[u32]) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    let mut labels = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.contains(id) {
            continue;
        }
        seen.push(*id);
        labels.push(genre_label(*id).to_string());
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_genres() {
        assert_eq!(genre_label(28), "Action");
        assert_eq!(genre_label(878), "Science Fiction");
        assert_eq!(genre_label(10770), "TV Movie");
    }

    #[test]
    fn test_unmapped_genre_keeps_list_length() {
        let labels = map_genre_ids(&[28, 424242, 53]);
        assert_eq!(labels, vec!["Action", UNKNOWN_GENRE, "Thriller"]);
    }

    #[test]
    fn test_duplicate_ids_collapse_by_source_identity() {
        let labels = map_genre_ids(&[18, 18, 1, 2]);
        assert_eq!(labels, vec!["Drama", UNKNOWN_GENRE, UNKNOWN_GENRE]);
    }

    #[test]
    fn test_table_has_no_duplicate_codes() {
        for (i, (code, _)) in GENRE_TABLE.iter().enumerate() {
            assert!(GENRE_TABLE[i + 1..].iter().all(|(other, _)| other != code));
        }
    }
}
