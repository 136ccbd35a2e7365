//! Prompt templates with `{placeholder}` tokens

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is a valid regex")
});

/// Distinct placeholder names referenced by `template`, in order of first appearance
///
/// # Examples
///
/// ```
/// use autoaumento_domain::template::placeholders;
///
/// let names = placeholders("Is '{output}' an answer to '{input}'? ({output})");
/// assert_eq!(names, vec!["output", "input"]);
/// ```
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Substitute every `{name}` token that has a value in `values`
///
/// Substitution is a single pass, so values that themselves contain braces
/// are inserted verbatim. Tokens without a value are left untouched.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use autoaumento_domain::template::render;
///
/// let values = HashMap::from([("name".to_string(), "Ada".to_string())]);
/// assert_eq!(render("Hello {name}, {other}", &values), "Hello Ada, {other}");
/// ```
pub fn render(template: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholders referenced by `template` that are missing from `available`
pub fn undeclared(template: &str, available: &[String]) -> Vec<String> {
    placeholders(template)
        .into_iter()
        .filter(|name| !available.contains(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders() {
        assert!(placeholders("plain prompt").is_empty());
    }

    #[test]
    fn test_placeholders_deduplicated() {
        assert_eq!(placeholders("{a} {b} {a}"), vec!["a", "b"]);
    }

    #[test]
    fn test_double_braces_and_empty_tokens() {
        assert_eq!(placeholders("{{a}}"), vec!["a"]);
        assert!(placeholders("{}").is_empty());
    }

    #[test]
    fn test_render_all_occurrences() {
        let values = HashMap::from([("x".to_string(), "1".to_string())]);
        assert_eq!(render("{x}+{x}", &values), "1+1");
    }

    #[test]
    fn test_render_single_pass() {
        let values = HashMap::from([
            ("a".to_string(), "{b}".to_string()),
            ("b".to_string(), "B".to_string()),
        ]);
        assert_eq!(render("{a} {b}", &values), "{b} B");
    }

    #[test]
    fn test_undeclared() {
        let declared = vec!["input".to_string()];
        assert_eq!(undeclared("{input} vs {output}", &declared), vec!["output"]);
        assert!(undeclared("{input}", &declared).is_empty());
    }
}
