//! Text normalization for tolerant answer comparison.
//!
//! Everything the player types is compared in normalized form: lower-cased,
//! with diacritical marks removed, so `"Nádia"`, `"NADIA"` and `"nadia"` are
//! the same answer.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-case `s` and strip diacritical marks.
///
/// The input is decomposed (NFD), combining marks are dropped and the rest is
/// lower-cased. The result is idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let lowered: String = strip_marks(s).flat_map(char::to_lowercase).collect();
    // Some lowercase mappings are not in NFD.
    strip_marks(&lowered).collect()
}

fn strip_marks(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

/// Normalize a single character.
///
/// Returns `None` when the character does not fold to exactly one char.
pub fn normalize_char(c: char) -> Option<char> {
    let mut buf = [0u8; 4];
    let folded = normalize(c.encode_utf8(&mut buf));
    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => Some(single),
        _ => None,
    }
}

/// Interpret raw input as a single Latin letter guess.
///
/// The input must normalize to exactly one ASCII letter `a..=z`; surrounding
/// whitespace is ignored. Returns the normalized letter.
pub fn as_latin_letter(raw: &str) -> Option<char> {
    let folded = normalize(raw.trim());
    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some(c),
        _ => None,
    }
}

/// Compare two strings after normalizing both sides.
pub fn matches(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Nádia"), "nadia");
        assert_eq!(normalize("DETERMINAÇÃO"), "determinacao");
        assert_eq!(normalize("Difícil"), "dificil");
        assert_eq!(normalize("médio"), "medio");
    }

    #[test]
    fn test_normalize_keeps_spaces_and_punctuation() {
        assert_eq!(normalize("Seringa com Potássio!"), "seringa com potassio!");
    }

    #[test]
    fn test_normalize_char() {
        assert_eq!(normalize_char('Ç'), Some('c'));
        assert_eq!(normalize_char('ã'), Some('a'));
        assert_eq!(normalize_char('7'), Some('7'));
    }

    #[test]
    fn test_as_latin_letter() {
        assert_eq!(as_latin_letter("A"), Some('a'));
        assert_eq!(as_latin_letter(" é "), Some('e'));
        assert_eq!(as_latin_letter("ç"), Some('c'));
        assert_eq!(as_latin_letter("ab"), None);
        assert_eq!(as_latin_letter("1"), None);
        assert_eq!(as_latin_letter("?"), None);
        assert_eq!(as_latin_letter(""), None);
        assert_eq!(as_latin_letter("ж"), None);
    }

    #[test]
    fn test_matches() {
        assert!(matches("MULAN", "mulan"));
        assert!(matches("Múlan", "mulan"));
        assert!(!matches("mulan ", "mulan"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_has_no_uppercase_ascii(s in "[a-zA-ZÀ-ÿ ]{0,24}") {
            prop_assert!(!normalize(&s).chars().any(|c| c.is_ascii_uppercase()));
        }
    }
}
