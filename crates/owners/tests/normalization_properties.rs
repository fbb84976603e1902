//! Property tests for path normalization and pattern matching.

use owners::OwnersPattern;
use owners::path::{ancestors, normalize, relative_to};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}(\\.[a-z]{1,3})?"
}

fn clean_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..6).prop_map(|segments| segments.join("/"))
}

fn noisy_prefix() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "/", "./", ".//./", "//", "././"]).prop_map(str::to_owned)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "[a-z./]{0,24}") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn noisy_prefixes_are_stripped(path in clean_path(), prefix in noisy_prefix()) {
        prop_assert_eq!(normalize(&format!("{prefix}{path}")), path);
    }

    #[test]
    fn normalized_paths_have_no_empty_or_dot_segments(raw in "[a-z./]{0,24}") {
        let normalized = normalize(&raw);
        if !normalized.is_empty() {
            prop_assert!(normalized.split('/').all(|s| !s.is_empty() && s != "."));
        }
    }

    #[test]
    fn ancestors_end_at_root_and_prefix_the_path(path in clean_path()) {
        let chain = ancestors(&path);
        prop_assert_eq!(chain.last().map(String::as_str), Some(""));
        prop_assert_eq!(chain.len(), path.matches('/').count() + 1);
        for dir in &chain {
            let relative = relative_to(&path, dir);
            if dir.is_empty() {
                prop_assert_eq!(relative, path.as_str());
            } else {
                prop_assert_eq!(format!("{dir}/{relative}"), path.clone());
            }
        }
    }

    #[test]
    fn literal_pattern_matches_only_itself(path in clean_path(), other in clean_path()) {
        let pattern = OwnersPattern::new(&path).unwrap();
        prop_assert!(pattern.matches(&path));
        prop_assert_eq!(pattern.matches(&other), other == path);
    }

    #[test]
    fn leading_double_star_matches_at_every_depth(path in clean_path()) {
        let file = path.rsplit('/').next().unwrap().to_owned();
        let pattern = OwnersPattern::new(&format!("**/{file}")).unwrap();
        prop_assert!(pattern.matches(&path));
    }

    #[test]
    fn single_star_never_crosses_separator(dir in segment(), sub in segment(), file in segment()) {
        let pattern = OwnersPattern::new(&format!("{dir}/*")).unwrap();
        let direct = format!("{dir}/{file}");
        let nested = format!("{dir}/{sub}/{file}");
        prop_assert!(pattern.matches(&direct));
        prop_assert!(!pattern.matches(&nested));
    }
}
