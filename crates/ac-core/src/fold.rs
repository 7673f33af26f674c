//! Case- and diacritic-insensitive text folding.
//!
//! A character folds by canonical decomposition (NFD), full Unicode case
//! folding and dropping combining marks, so `É`, `é` and `e\u{301}` all fold
//! to `e`, and `ß` folds to `ss`. Matching compares folded character
//! sequences but reports ranges in the searched string, always on its char
//! boundaries.

use std::ops::Range;

use caseless::Caseless;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a single character. Combining marks fold to nothing; some
/// characters fold to more than one (`ß` → `ss`, `ﬁ` → `fi`).
pub fn fold_char(c: char) -> impl Iterator<Item = char> {
    std::iter::once(c)
        .nfd()
        .default_case_fold()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
}

/// Fold a whole string.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(fold_char).collect()
}

/// True if `a` and `b` are equal under folding.
pub fn eq_folded(a: &str, b: &str) -> bool {
    a.chars().flat_map(fold_char).eq(b.chars().flat_map(fold_char))
}

/// Byte range of the first occurrence of `needle` inside `haystack` under
/// folding. Combining marks directly after the match are absorbed into it,
/// so the remainder never starts with a dangling accent.
///
/// An empty needle (or one made only of combining marks) never matches.
pub fn find_folded(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let target: Vec<char> = needle.chars().flat_map(fold_char).collect();
    if target.is_empty() {
        return None;
    }
    let chars: Vec<(usize, char)> = haystack.char_indices().collect();
    (0..chars.len())
        .filter(|&i| fold_char(chars[i].1).next().is_some())
        .find_map(|start| {
            let end = match_end(&chars, start, &target)?;
            Some(chars[start].0..byte_offset(haystack, &chars, end))
        })
}

/// If `haystack` begins with `prefix` under folding, the byte offset in
/// `haystack` where the matched prefix ends.
pub fn strip_prefix_folded(haystack: &str, prefix: &str) -> Option<usize> {
    let target: Vec<char> = prefix.chars().flat_map(fold_char).collect();
    if target.is_empty() {
        return None;
    }
    let chars: Vec<(usize, char)> = haystack.char_indices().collect();
    let end = match_end(&chars, 0, &target)?;
    Some(byte_offset(haystack, &chars, end))
}

/// Char index just past a folded match of `target` starting at `start`.
/// A haystack character whose folding straddles the end of `target` is not
/// a match.
fn match_end(chars: &[(usize, char)], start: usize, target: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut idx = start;
    while matched < target.len() {
        let &(_, c) = chars.get(idx)?;
        for f in fold_char(c) {
            if target.get(matched) != Some(&f) {
                return None;
            }
            matched += 1;
        }
        idx += 1;
    }
    while let Some(&(_, c)) = chars.get(idx) {
        if fold_char(c).next().is_some() {
            break;
        }
        idx += 1;
    }
    Some(idx)
}

fn byte_offset(s: &str, chars: &[(usize, char)], idx: usize) -> usize {
    chars.get(idx).map_or(s.len(), |&(b, _)| b)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("Apples"), "apples");
        assert_eq!(fold("Café"), "cafe");
        assert_eq!(fold("cafe\u{301}"), "cafe");
        assert_eq!(fold("ÅNGSTRÖM"), "angstrom");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_eq_folded() {
        assert!(eq_folded("résumé", "RESUME"));
        assert!(eq_folded("e\u{301}", "É"));
        assert!(!eq_folded("resume", "resumes"));
    }

    #[test]
    fn test_find_folded_at_start() {
        assert_eq!(find_folded("Apples", "App"), Some(0..3));
        assert_eq!(find_folded("Apples", "app"), Some(0..3));
        assert_eq!(find_folded("Bananas", "BAN"), Some(0..3));
    }

    #[test]
    fn test_find_folded_accents() {
        // 'é' is two bytes
        assert_eq!(find_folded("Café au lait", "cafe"), Some(0..5));
        assert_eq!(find_folded("cafe", "CAFÉ"), Some(0..4));
        // decomposed accent is absorbed into the match
        assert_eq!(find_folded("cafe\u{301} noir", "cafe"), Some(0..6));
    }

    #[test]
    fn test_full_case_folding() {
        assert_eq!(fold("Straße"), "strasse");
        assert_eq!(fold("ﬁne"), "fine");
        assert_eq!(fold("İstanbul"), "istanbul");
        assert!(eq_folded("STRASSE", "straße"));
    }

    #[test]
    fn test_find_folded_expanding_char() {
        // 'ß' is two bytes and folds to two chars
        assert_eq!(find_folded("Straße", "STRASS"), Some(0..6));
        assert_eq!(find_folded("Straße", "strasse"), Some(0..7));
        // half of an expanded char is not a match
        assert_eq!(find_folded("Straße", "stras"), None);
        assert_eq!(strip_prefix_folded("Straßenbahn", "STRASSEN"), Some(8));
    }

    #[test]
    fn test_find_folded_first_occurrence() {
        assert_eq!(find_folded("Anananas", "ana"), Some(0..3));
        assert_eq!(find_folded("Bananas", "nan"), Some(2..5));
        assert_eq!(find_folded("Lemons", "x"), None);
    }

    #[test]
    fn test_find_folded_empty_needle() {
        assert_eq!(find_folded("Apples", ""), None);
        assert_eq!(find_folded("Apples", "\u{301}"), None);
        assert_eq!(find_folded("", "a"), None);
    }

    #[test]
    fn test_strip_prefix_folded() {
        assert_eq!(strip_prefix_folded("Grapefruit", "grape"), Some(5));
        assert_eq!(strip_prefix_folded("Éclair", "ec"), Some(3));
        assert_eq!(strip_prefix_folded("Grapefruit", "fruit"), None);
        assert_eq!(strip_prefix_folded("Grape", "Grapefruit"), None);
    }

    proptest! {
        #[test]
        fn prefix_plus_remainder_reconstructs_candidate(
            typed in "[a-zA-Z]{1,8}",
            rest in "[a-z ]{0,8}",
        ) {
            let candidate = format!("{}{}", typed.to_uppercase(), rest);
            let range = find_folded(&candidate, &typed).unwrap();
            prop_assert_eq!(range.start, 0);
            prop_assert!(eq_folded(&candidate[..range.end], &typed));
            prop_assert_eq!(&candidate[range.end..], rest.as_str());
        }
    }
}
