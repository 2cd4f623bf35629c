//! `${NAME:default}` substitution over raw config text.
//!
//! Substitution runs before the text is decoded, so a substituted value that
//! breaks the target format's syntax (a quote in JSON, a newline in YAML) is
//! not escaped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\w+):([^}]+)\}").expect("valid regex"));

/// Replace every `${NAME:default}` in `content`.
///
/// `lookup` resolves a variable name; when it returns `None` the literal
/// default is used. A placeholder without a default (`${NAME}` or
/// `${NAME:}`) does not match and is left as-is.
pub fn substitute<'a, F>(content: &'a str, lookup: F) -> Cow<'a, str>
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER.replace_all(content, |caps: &Captures<'_>| {
        lookup(&caps[1]).unwrap_or_else(|| caps[2].to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn default_used_when_unset() {
        let env = vars(&[]);
        let out = substitute("host: ${HOST:localhost}", |n| env.get(n).cloned());
        assert_eq!(out, "host: localhost");
    }

    #[test]
    fn env_value_wins_over_default() {
        let env = vars(&[("HOST", "example.com")]);
        let out = substitute("host: ${HOST:localhost}", |n| env.get(n).cloned());
        assert_eq!(out, "host: example.com");
    }

    #[test]
    fn set_but_empty_variable_still_substitutes() {
        let env = vars(&[("TOKEN", "")]);
        let out = substitute("token = \"${TOKEN:none}\"", |n| env.get(n).cloned());
        assert_eq!(out, "token = \"\"");
    }

    #[test]
    fn multiple_placeholders_on_one_line() {
        let env = vars(&[("PORT", "9090")]);
        let out = substitute("${HOST:0.0.0.0}:${PORT:8080}", |n| env.get(n).cloned());
        assert_eq!(out, "0.0.0.0:9090");
    }

    #[test]
    fn default_stops_at_first_closing_brace() {
        let env = vars(&[]);
        let out = substitute("${A:x}}", |n| env.get(n).cloned());
        assert_eq!(out, "x}");
    }

    #[test]
    fn placeholders_without_default_are_untouched() {
        let env = vars(&[("HOST", "example.com")]);
        let input = "${HOST} ${HOST:} $HOST";
        let out = substitute(input, |n| env.get(n).cloned());
        assert_eq!(out, input);
        assert!(matches!(out, Cow::Borrowed(_)));
    }
}
