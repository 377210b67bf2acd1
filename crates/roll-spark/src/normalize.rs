//! Name normalization for loose sheet and table lookups.

use unicode_normalization::UnicodeNormalization;

/// Fold a sheet or table name into its matching key.
///
/// Decomposes (NFKD), drops everything outside ASCII (which removes combining
/// marks and any letter without an ASCII base), strips all whitespace, and
/// lowercases. The result is only ever compared, never displayed.
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(char::is_ascii)
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_whitespace() {
        assert_eq!(normalize_name("  Dark Forest\t"), "darkforest");
    }

    #[test]
    fn folds_diacritics() {
        assert_eq!(normalize_name("Żółć"), "zoc");
        assert_eq!(normalize_name("Café Noir"), "cafenoir");
        assert_eq!(normalize_name("ZAMEK"), normalize_name("zamek"));
    }

    #[test]
    fn drops_letters_without_ascii_base() {
        // ł has no decomposition and disappears entirely
        assert_eq!(normalize_name("Miłość"), "miosc");
    }

    #[test]
    fn compatibility_forms_fold() {
        assert_eq!(normalize_name("ﬁre"), "fire");
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
    }
}
