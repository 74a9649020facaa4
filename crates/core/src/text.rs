//! Case/diacritic-insensitive string normalization.
//!
//! Shopify stores product data in Spanish with mixed accenting ("Café",
//! "cafe", "CAFÉ" all occur), so every comparison in the catalog pipeline
//! goes through [`normalize`] first.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a string for comparison: NFD-decompose, drop combining marks,
/// lowercase.
///
/// The result is idempotent (`normalize(normalize(s)) == normalize(s)`) and
/// invariant under case and diacritic variation. An empty input yields an
/// empty string.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("ÁÉÍÓÚÑ"), "aeioun");
        assert_eq!(normalize("crème brûlée"), "creme brulee");
    }

    #[test]
    fn test_normalize_case_and_accent_invariant() {
        assert_eq!(normalize("Café"), normalize("cafe"));
        assert_eq!(normalize("Café"), normalize("CAFÉ"));
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["Café Rojo", "topdoctores", "Hyalu B5 Sérum", "", "  x  "] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_leaves_ascii_untouched() {
        assert_eq!(normalize("serum 30ml"), "serum 30ml");
    }
}
