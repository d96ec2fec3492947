//! Identifier sanitization for Terraform resource labels.
//!
//! Terraform block labels are built from user text (topic names, principals,
//! operations). Anything outside `[A-Za-z0-9_]` is replaced one-for-one with
//! an underscore, so the output has the same number of characters as the input.

use regex::Regex;
use std::sync::LazyLock;

static NON_IDENT_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("identifier pattern compiles"));

/// Replace every character that is not an ASCII letter, digit or `_` with `_`.
pub fn sanitize(raw: &str) -> String {
    NON_IDENT_CHAR.replace_all(raw, "_").into_owned()
}

/// Sanitize each part on its own and join the results with `_`.
///
/// Example: `["orders", "Read", "svc-app"]` => `orders_Read_svc_app`
pub fn block_id(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| sanitize(p))
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn is_ident(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    #[test]
    fn replaces_punctuation_one_for_one() {
        assert_eq!(sanitize("svc-app"), "svc_app");
        assert_eq!(sanitize("orders.v1"), "orders_v1");
        assert_eq!(sanitize("a b/c:d"), "a_b_c_d");
        assert_eq!(sanitize("--"), "__");
    }

    #[test]
    fn safe_input_passes_through() {
        for s in ["orders", "Read", "topic_01", "_", "ABCxyz789"] {
            assert_eq!(sanitize(s), s);
        }
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn non_ascii_keeps_char_count() {
        let raw = "café-ü";
        let out = sanitize(raw);
        assert_eq!(out, "caf___");
        assert_eq!(out.chars().count(), raw.chars().count());
    }

    #[test]
    fn output_charset_and_idempotence() {
        let inputs = [
            "",
            "plain",
            "svc-app@corp.example",
            "weird \t\n chars!#$%",
            "日本語",
            "already_safe_123",
        ];
        for raw in inputs {
            let once = sanitize(raw);
            assert!(is_ident(&once), "{once:?} from {raw:?}");
            assert_eq!(once.chars().count(), raw.chars().count());
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn block_id_sanitizes_each_part() {
        assert_eq!(block_id(&["orders", "Read", "svc-app"]), "orders_Read_svc_app");
        assert_eq!(block_id(&["my.topic"]), "my_topic");
    }
}
