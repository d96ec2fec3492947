//! Placeholder substitution for the fixed HCL templates.
//!
//! We avoid `format!()` because HCL bodies are full of `{`/`}`. Placeholders
//! look like `__NAME__` and are filled in a single pass, so substituted user
//! text is never scanned for further placeholders.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z]+)__").expect("placeholder pattern compiles"));

/// Replace each `__KEY__` in `template` with its value from `vars`.
/// Unknown placeholders are left untouched.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match vars.iter().find(|(k, _)| *k == key) {
                Some((_, v)) => v.to_string(),
                None => {
                    log::debug!("template placeholder {} has no value", &caps[0]);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_known_placeholders() {
        let out = fill("a = \"__NAME__\" { __N__ }", &[("NAME", "x"), ("N", "3")]);
        assert_eq!(out, "a = \"x\" { 3 }");
    }

    #[test]
    fn values_are_not_rescanned() {
        let out = fill("__A__ __B__", &[("A", "__B__"), ("B", "b")]);
        assert_eq!(out, "__B__ b");
    }

    #[test]
    fn unknown_placeholders_stay() {
        assert_eq!(fill("__MISSING__", &[]), "__MISSING__");
    }
}
