/// Leading marker of every cross-reference identifier (e.g. `tt1375666`)
pub const CROSS_REF_PREFIX: &str = "tt";

/// Check that `id` has the shape `tt<digits>`
pub fn is_cross_ref_id(id: &str) -> bool {
    match id.strip_prefix(CROSS_REF_PREFIX) {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cross_ref_id() {
        assert!(is_cross_ref_id("tt1375666"));
        assert!(!is_cross_ref_id("tt"));
        assert!(!is_cross_ref_id("1375666"));
        assert!(!is_cross_ref_id("tt13a"));
        assert!(!is_cross_ref_id("TT1375666"));
        assert!(!is_cross_ref_id(""));
    }
}
