// Property-based tests for normalization, scoring and clustering invariants.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use namelink_linkage::model::LinkageInput;
use namelink_linkage::normalize::{name_key, normalize};
use namelink_linkage::similarity::compare;
use namelink_linkage::{compute_matches, LinkageConfig};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn config_64() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Arbitrary raw text: mostly name-like, sometimes accented or noisy.
fn arb_raw() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,3}",
        2 => r"[A-Za-zÀ-ÿçÇãõ' .-]{0,24}",
        1 => any::<String>(),
    ]
}

/// Short name drawn from a small pool so lists overlap often.
fn arb_name() -> impl Strategy<Value = String> {
    let firsts = prop::sample::select(vec!["Maria", "MARIA", "João", "Joao", "Ana", "Jose", "José"]);
    let middles = prop::sample::select(vec!["", "da ", "Paula ", "dos "]);
    let lasts = prop::sample::select(vec!["Silva", "Silvá", "Santos", "Sантos", "Pereira", "Pereyra"]);
    (firsts, middles, lasts).prop_map(|(f, m, l)| format!("{f} {m}{l}"))
}

fn arb_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_name(), 0..8)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn normalize_is_idempotent(raw in arb_raw()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn normalize_output_alphabet(raw in arb_raw()) {
        let out = normalize(&raw);
        prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn compare_is_symmetric(a in arb_raw(), b in arb_raw()) {
        let ka = name_key(&normalize(&a));
        let kb = name_key(&normalize(&b));
        prop_assert_eq!(compare(&ka, &kb), compare(&kb, &ka));
        let s = compare(&ka, &kb);
        prop_assert!((0.0..=100.0).contains(&s));
    }

    #[test]
    fn compare_self_is_perfect(a in arb_raw()) {
        let k = name_key(&normalize(&a));
        prop_assume!(!k.is_empty());
        prop_assert_eq!(compare(&k, &k), 100.0);
    }
}

proptest! {
    #![proptest_config(config_64())]

    #[test]
    fn clusters_are_disjoint_and_respect_coverage(
        a in arb_list(),
        b in arb_list(),
        c in arb_list(),
        threshold in 70u8..=100,
        min_coverage in 2usize..=3,
    ) {
        let input = LinkageInput::new()
            .with_names("a", a)
            .with_names("b", b)
            .with_names("c", c);
        let config = LinkageConfig::new(&["a", "b", "c"], threshold, min_coverage);
        let result = compute_matches(&config, &input).unwrap();

        for cluster in &result.clusters {
            let lists: HashSet<&str> = cluster.members.iter().map(|m| m.list_id.as_str()).collect();
            prop_assert_eq!(lists.len(), cluster.members.len());
            prop_assert!(cluster.coverage() >= min_coverage);
            prop_assert!(cluster.members.iter().all(|m| (0.0..=100.0).contains(&m.score)));
        }

        let mut seen = HashSet::new();
        for m in result.clusters.iter().flat_map(|c| c.members.iter()) {
            prop_assert!(
                seen.insert((m.list_id.clone(), m.line_index)),
                "{}:{} is in more than one cluster", m.list_id, m.line_index
            );
        }

        let again = compute_matches(&config, &input).unwrap();
        prop_assert_eq!(&result.clusters, &again.clusters);
    }
}
