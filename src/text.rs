//! Text normalization helpers shared by the import matcher and the
//! replacement-part heuristic.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Lowercase, strip diacritics and collapse everything that is not a
/// letter or digit into single spaces. "Peça de Reposição" -> "peca de reposicao".
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    NON_ALNUM.replace_all(&folded, " ").trim().to_string()
}

/// Normalized form with all separators removed, used for account code
/// comparison ("1.2.3-01" == "1 2 3 01").
pub fn normalize_compact(s: &str) -> String {
    normalize(s).replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Peça de Reposição"), "peca de reposicao");
        assert_eq!(normalize("Inventário Ativos"), "inventario ativos");
    }

    #[test]
    fn collapses_punctuation() {
        assert_eq!(normalize("  Móveis -- e.utensílios!  "), "moveis e utensilios");
        assert_eq!(normalize_compact("1.2.3-01"), "12301");
    }
}
