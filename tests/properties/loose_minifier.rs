//! Property tests for the line-preserving JavaScript minifier.

use proptest::prelude::*;

use assetline::transform::script::minify_loose;

/// Lines built from statements, indentation and trailing comments
fn js_line() -> impl Strategy<Value = String> {
    (
        "[ ]{0,6}",
        "[a-z]{1,8}(\\([a-z0-9, ]{0,8}\\))?( = [a-z0-9]{1,4})?;?",
        proptest::option::of("[a-z ]{0,12}"),
    )
        .prop_map(|(indent, stmt, comment)| match comment {
            Some(c) => format!("{indent}{stmt} // {c}"),
            None => format!("{indent}{stmt}"),
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary input never panics.
    #[test]
    fn property_never_panics(source in "\\PC{0,300}") {
        let _ = minify_loose(&source);
    }

    /// PROPERTY: Every output line maps to one input line, in order.
    #[test]
    fn property_origins_match_output_lines(source in "(\\PC|\\n){0,300}") {
        let out = minify_loose(&source);
        if out.origins.is_empty() {
            prop_assert!(out.code.is_empty());
        } else {
            prop_assert_eq!(out.origins.len(), out.code.split('\n').count());
        }
        prop_assert!(out.origins.windows(2).all(|w| w[0] < w[1]));
        let input_lines = source.split('\n').count();
        prop_assert!(out.origins.iter().all(|&o| o < input_lines));
    }

    /// PROPERTY: Minifying twice equals minifying once.
    #[test]
    fn property_idempotent(lines in proptest::collection::vec(js_line(), 0..20)) {
        let source = lines.join("\n");
        let once = minify_loose(&source).code;
        let twice = minify_loose(&once).code;
        prop_assert_eq!(twice, once);
    }
}
