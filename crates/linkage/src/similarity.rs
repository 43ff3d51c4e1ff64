use rapidfuzz::distance::indel;

use crate::model::{MatchMethod, NameKey};

/// Score between two keys plus how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    pub score: f64,
    pub method: MatchMethod,
}

/// Compare two name keys on a 0–100 scale.
///
/// Equal non-empty keys short-circuit to 100 without running the edit
/// distance. Otherwise the joined `"first last"` strings are scored with
/// [`ratio`].
pub fn score(a: &NameKey, b: &NameKey) -> Similarity {
    if exact_key(a, b) {
        return Similarity {
            score: 100.0,
            method: MatchMethod::ExactKey,
        };
    }
    Similarity {
        score: ratio(&a.joined(), &b.joined()),
        method: MatchMethod::Fuzzy,
    }
}

pub fn compare(a: &NameKey, b: &NameKey) -> f64 {
    score(a, b).score
}

pub fn exact_key(a: &NameKey, b: &NameKey) -> bool {
    !a.is_empty() && a == b
}

/// Indel similarity scaled to 0–100: `1 - indel / (len_a + len_b)`, where
/// only insertions and deletions count. Two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }
    let dist = indel::distance(a.chars(), b.chars());
    (1.0 - dist as f64 / total as f64) * 100.0
}

/// Mean of first-vs-first and last-vs-last token ratios.
///
/// Used only by difference detection; linkage scores whole keys with
/// [`score`].
pub fn token_ratio(a: &NameKey, b: &NameKey) -> f64 {
    (ratio(&a.first, &b.first) + ratio(&a.last, &b.last)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{name_key, normalize};

    fn key(s: &str) -> NameKey {
        name_key(&normalize(s))
    }

    #[test]
    fn exact_key_shortcut_ignores_middle_names() {
        let s = score(&key("Maria Aparecida Silva"), &key("MARIA SILVA"));
        assert_eq!(s.score, 100.0);
        assert_eq!(s.method, MatchMethod::ExactKey);
    }

    #[test]
    fn fuzzy_fallback_for_spelling_variants() {
        let s = score(&key("Jose Pereira"), &key("Jose Pereyra"));
        assert_eq!(s.method, MatchMethod::Fuzzy);
        assert!(s.score >= 85.0, "score was {}", s.score);
        assert!(s.score < 100.0);
    }

    #[test]
    fn disjoint_names_score_low() {
        assert!(compare(&key("Carlos Souza"), &key("Ana Oliveira")) < 85.0);
    }

    #[test]
    fn symmetric() {
        let a = key("Joana Darc");
        let b = key("Joanna D'Arc Lima");
        assert_eq!(compare(&a, &b), compare(&b, &a));
    }

    #[test]
    fn empty_keys_never_take_the_shortcut() {
        let empty = key("");
        assert!(!exact_key(&empty, &empty));
        assert_eq!(score(&empty, &empty).method, MatchMethod::Fuzzy);
    }

    #[test]
    fn single_token_matches_single_token_exactly() {
        let s = score(&key("Pelé"), &key("pele"));
        assert_eq!(s.method, MatchMethod::ExactKey);
    }

    #[test]
    fn single_token_against_repeated_name() {
        // "pele" keys as (pele, pele), which equals the key of "Pele Pele".
        let s = score(&key("Pele"), &key("Pele Edson Pele"));
        assert_eq!(s.method, MatchMethod::ExactKey);
        // but not against a different surname
        let s = score(&key("Pele"), &key("Pele Nascimento"));
        assert_eq!(s.method, MatchMethod::Fuzzy);
    }

    #[test]
    fn insertions_cost_less_than_substitutions() {
        // "jo silva" -> "joao silva" is two insertions out of 18 characters.
        let s = ratio("jo silva", "joao silva");
        assert!((s - 88.89).abs() < 0.01, "score was {s}");
        assert!(s >= 85.0);
        // A substitution counts as one deletion plus one insertion.
        let s = ratio("jose pereira", "jose pereyra");
        assert!((s - 91.67).abs() < 0.01, "score was {s}");
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn token_ratio_scores_tokens_independently() {
        let a = key("Maria Silva");
        let b = key("Maria Silveira");
        let expected = (100.0 + ratio("silva", "silveira")) / 2.0;
        assert_eq!(token_ratio(&a, &b), expected);
        assert_eq!(token_ratio(&a, &a), 100.0);
    }
}
