use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::NameKey;

/// Canonicalize a raw name for comparison.
///
/// Accents are folded by NFKD decomposition with combining marks dropped,
/// then everything outside `[a-z0-9 ]` is removed and whitespace runs
/// (including newlines and tabs) collapse to a single space. Total and
/// idempotent.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a normalized name into its first and last tokens.
///
/// A single token fills both slots so that two one-word names can still hit
/// the exact-key shortcut. Middle tokens are ignored.
pub fn name_key(normalized: &str) -> NameKey {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    match tokens.as_slice() {
        [] => NameKey {
            first: String::new(),
            last: String::new(),
        },
        [only] => NameKey {
            first: (*only).to_string(),
            last: (*only).to_string(),
        },
        [first, .., last] => NameKey {
            first: (*first).to_string(),
            last: (*last).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(normalize("João SANTOS"), "joao santos");
        assert_eq!(normalize("Conceição"), "conceicao");
        assert_eq!(normalize("Émile Zola"), "emile zola");
    }

    #[test]
    fn strips_punctuation_and_collapses_space() {
        assert_eq!(normalize("  O'Neil,\tMaria\r\n  "), "oneil maria");
        assert_eq!(normalize("Ana-Paula   Souza."), "anapaula souza");
        assert_eq!(normalize("Pedro II"), "pedro ii");
        assert_eq!(normalize("Lote 42"), "lote 42");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(normalize("Ma\u{0}ria\u{7f} Silva"), "maria silva");
    }

    #[test]
    fn idempotent_on_mixed_text() {
        let once = normalize("Ñandú  Müller-Lüdenscheidt\u{a0}ﬁ");
        assert_eq!(normalize(&once), once);
        assert_eq!(once, "nandu mullerludenscheidt fi");
    }

    #[test]
    fn key_from_zero_tokens() {
        let key = name_key("");
        assert!(key.is_empty());
    }

    #[test]
    fn key_from_one_token_repeats_it() {
        let key = name_key("madonna");
        assert_eq!(key.first, "madonna");
        assert_eq!(key.last, "madonna");
    }

    #[test]
    fn key_ignores_middle_tokens() {
        let key = name_key("maria aparecida dos santos");
        assert_eq!(key.first, "maria");
        assert_eq!(key.last, "santos");
        assert_eq!(name_key("maria santos"), key);
    }
}
