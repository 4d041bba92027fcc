//! Placeholder grammar.
//!
//! A placeholder is `{{` followed by letters, digits, underscores, hyphens,
//! spaces, pipes or parentheses, followed by `}}`. Its body takes one of two
//! forms:
//!
//! * `{{ name() }}` calls the function registered as `name`;
//! * `{{ key }}` or `{{ key | t1 | t2 }}` looks up `key` and pipes the value
//!   through the listed transformers, left to right.

use regex::{Match, Regex};
use std::sync::LazyLock;

/// Pattern matching a single placeholder token.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{[A-Za-z_|0-9\- ()]+\}\}";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Function,
    Value,
}

/// A classified placeholder token, borrowing from the raw token text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder<'a> {
    Function { name: &'a str },
    Value { key: &'a str, transformers: Vec<&'a str> },
}

impl<'a> Placeholder<'a> {
    pub fn parse(token: &'a str) -> Self {
        match classify(token) {
            PlaceholderKind::Function => Placeholder::Function { name: function_name(token) },
            PlaceholderKind::Value => {
                let (key, transformers) = parse_value_token(token);
                Placeholder::Value { key, transformers }
            }
        }
    }
}

/// Iterates over the placeholder matches in `text`, left to right.
pub fn find_placeholders(text: &str) -> impl Iterator<Item = Match<'_>> {
    PLACEHOLDER.find_iter(text)
}

/// Returns the raw placeholder tokens found in `text`.
pub fn match_placeholders(text: &str) -> Vec<&str> {
    find_placeholders(text).map(|m| m.as_str()).collect()
}

/// Strips the surrounding braces and whitespace from a raw token.
pub fn inner_body(token: &str) -> &str {
    token.trim().trim_start_matches('{').trim_end_matches('}').trim()
}

/// A token whose body ends in `()` calls a function, even with an empty name.
pub fn classify(token: &str) -> PlaceholderKind {
    if inner_body(token).ends_with("()") {
        PlaceholderKind::Function
    } else {
        PlaceholderKind::Value
    }
}

/// Name of the function called by a function token, `greet` for `{{ greet() }}`.
pub fn function_name(token: &str) -> &str {
    let body = inner_body(token);
    body.strip_suffix("()").unwrap_or(body).trim()
}

/// Splits a value token into its key and its transformer chain.
///
/// `{{ name | pascalCase | upperCase }}` gives `("name", ["pascalCase", "upperCase"])`.
pub fn parse_value_token(token: &str) -> (&str, Vec<&str>) {
    let mut segments = inner_body(token).split('|').map(str::trim);
    let key = segments.next().unwrap_or_default();
    (key, segments.collect())
}

/// Whether `name` can be referenced from a placeholder, as a key, a
/// function name or a transformer name.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_placeholders() {
        let text = "import {{ name }} from './{{name | kebabCase}}'; // {{ header() }}";
        assert_eq!(
            match_placeholders(text),
            vec!["{{ name }}", "{{name | kebabCase}}", "{{ header() }}"]
        );
    }

    #[test]
    fn test_match_ignores_foreign_syntax() {
        assert!(match_placeholders("{{}}").is_empty());
        assert!(match_placeholders("{{ user.name }}").is_empty());
        assert!(match_placeholders("{ name }").is_empty());
        assert!(match_placeholders("const style = {{ color: 'red' }};").is_empty());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("{{ greet() }}"), PlaceholderKind::Function);
        assert_eq!(classify("{{greet()}}"), PlaceholderKind::Function);
        assert_eq!(classify("{{ greet }}"), PlaceholderKind::Value);
        assert_eq!(classify("{{ () }}"), PlaceholderKind::Function);
        assert_eq!(classify("{{ greet( ) }}"), PlaceholderKind::Value);
    }

    #[test]
    fn test_parse_value_token() {
        assert_eq!(parse_value_token("{{ name }}"), ("name", vec![]));
        assert_eq!(
            parse_value_token("{{ name|camelCase |  upperCase }}"),
            ("name", vec!["camelCase", "upperCase"])
        );
    }

    #[test]
    fn test_placeholder_parse() {
        assert_eq!(Placeholder::parse("{{ greet() }}"), Placeholder::Function { name: "greet" });
        assert_eq!(Placeholder::parse("{{()}}"), Placeholder::Function { name: "" });
        assert_eq!(
            Placeholder::parse("{{ feature-name | snakeCase }}"),
            Placeholder::Value { key: "feature-name", transformers: vec!["snakeCase"] }
        );
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("camelCase"));
        assert!(is_valid_identifier("feature_name-2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("two words"));
        assert!(!is_valid_identifier("a|b"));
    }
}
