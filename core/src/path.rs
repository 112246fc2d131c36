//! Path template parsing and substitution.
//!
//! Placeholders are `{name}` markers where `name` is made of lowercase ASCII
//! letters and underscores. Anything else inside braces (`{petId}`, `{id2}`)
//! is not a placeholder and stays in the URL untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Placeholder names in `template`, in first-occurrence order.
///
/// A name that appears more than once is reported once.
///
/// ```
/// use restapi_core::path::parameters;
///
/// let names = parameters("/pantry/{pantry_id}/basket/{basket_id}");
/// assert_eq!(names, ["pantry_id", "basket_id"]);
/// assert!(parameters("/random").is_empty());
/// ```
pub fn parameters(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every placeholder in `template` using `lookup`.
///
/// Returns the name of the first placeholder `lookup` cannot resolve.
pub fn substitute<'a, F>(template: &'a str, mut lookup: F) -> Result<Cow<'a, str>, String>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut missing: Option<String> = None;
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let name = &caps[1];
        match lookup(name) {
            Some(value) => value,
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });
    match missing {
        Some(name) => Err(name),
        None => Ok(rendered),
    }
}
