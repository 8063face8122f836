//! Property tests for include expansion.

use std::path::Path;

use proptest::prelude::*;
use serde_json::json;

use assetline::transform::html::{Context, IncludeExpander};

fn context() -> Context {
    let mut ctx = Context::new();
    ctx.insert("year".to_string(), json!(2024));
    ctx.insert("site".to_string(), json!({"name": "Demo"}));
    ctx
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary input never panics.
    #[test]
    fn property_expand_never_panics(text in "(\\PC|@@|include\\(|'|\\{|\\}){0,200}") {
        let expander = IncludeExpander::new("@@");
        let _ = expander.expand(&text, Path::new("page.html"), &context());
    }

    /// PROPERTY: Text without the prefix passes through unchanged.
    #[test]
    fn property_text_without_prefix_is_unchanged(text in "[^@]{0,200}") {
        let expander = IncludeExpander::new("@@");
        let out = expander.expand(&text, Path::new("page.html"), &context()).unwrap();
        prop_assert_eq!(out, text);
    }

    /// PROPERTY: Unknown variables are left untouched.
    #[test]
    fn property_unknown_variables_survive(name in "zz[a-z_]{0,12}", before in "[a-z <>]{0,20}") {
        let text = format!("{before}@@{name}");
        let expander = IncludeExpander::new("@@");
        let out = expander.expand(&text, Path::new("page.html"), &context()).unwrap();
        prop_assert_eq!(out, text);
    }
}
