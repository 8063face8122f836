//! Property tests for utility class candidate scanning.

use std::collections::BTreeSet;

use proptest::prelude::*;

use assetline::transform::style::utility::extract_candidates;

fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '/' | '.' | '%')
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every candidate is a well-formed class token.
    #[test]
    fn property_candidates_are_well_formed(text in "\\PC{0,400}") {
        let mut found = BTreeSet::new();
        extract_candidates(&text, &mut found);

        for candidate in &found {
            prop_assert!(!candidate.is_empty());
            prop_assert!(candidate.len() <= 64);
            prop_assert!(candidate.chars().all(is_class_char), "{}", candidate);
            prop_assert!(!candidate.ends_with(['.', ':', '/']), "{}", candidate);
        }
    }

    /// PROPERTY: Classes in a class attribute are always found.
    #[test]
    fn property_class_attribute_tokens_found(
        classes in proptest::collection::vec("[a-z]{1,6}(-[0-9]{1,2})?", 1..8)
    ) {
        let html = format!("<div class=\"{}\"></div>", classes.join(" "));
        let mut found = BTreeSet::new();
        extract_candidates(&html, &mut found);

        for class in &classes {
            prop_assert!(found.contains(class), "{} missing", class);
        }
    }
}
