//! Infer an endpoint's HTTP method from its name.
//!
//! `get_joke` is a GET, `delete_basket` a DELETE. Two aliases exist:
//! `create_*` maps to POST and `update_*` to PUT. An explicit method always
//! wins over the name.

use crate::error::ApiError;
use crate::http::HttpMethod;

const ALIASES: [(&str, &str); 2] = [("create", "post"), ("update", "put")];

/// Resolve the effective method for endpoint `name`.
pub fn resolve_method(name: &str, explicit: Option<HttpMethod>) -> Result<HttpMethod, ApiError> {
    if let Some(method) = explicit {
        return Ok(method);
    }

    let verb = name.split('_').next().unwrap_or_default();
    let verb = ALIASES
        .iter()
        .find(|(alias, _)| *alias == verb)
        .map_or(verb, |&(_, canonical)| canonical);

    verb.parse().map_err(|()| ApiError::MissingMethodName {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_prefixes() {
        assert_eq!(resolve_method("get_joke", None).unwrap(), HttpMethod::Get);
        assert_eq!(resolve_method("post_note", None).unwrap(), HttpMethod::Post);
        assert_eq!(resolve_method("put_basket", None).unwrap(), HttpMethod::Put);
        assert_eq!(resolve_method("patch_page", None).unwrap(), HttpMethod::Patch);
        assert_eq!(resolve_method("delete_basket", None).unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn bare_verb_name() {
        assert_eq!(resolve_method("get", None).unwrap(), HttpMethod::Get);
    }

    #[test]
    fn aliases() {
        assert_eq!(resolve_method("create_basket", None).unwrap(), HttpMethod::Post);
        assert_eq!(resolve_method("update_basket", None).unwrap(), HttpMethod::Put);
    }

    #[test]
    fn explicit_method_wins() {
        assert_eq!(
            resolve_method("wrong_pantry", Some(HttpMethod::Patch)).unwrap(),
            HttpMethod::Patch
        );
        assert_eq!(
            resolve_method("get_joke", Some(HttpMethod::Delete)).unwrap(),
            HttpMethod::Delete
        );
    }

    #[test]
    fn unknown_prefix_fails_with_name() {
        let err = resolve_method("wrong_pantry", None).unwrap_err();
        assert!(matches!(err, ApiError::MissingMethodName { ref name } if name == "wrong_pantry"));
    }

    #[test]
    fn empty_and_uppercase_names_fail() {
        assert!(matches!(
            resolve_method("", None),
            Err(ApiError::MissingMethodName { .. })
        ));
        assert!(matches!(
            resolve_method("_get_joke", None),
            Err(ApiError::MissingMethodName { .. })
        ));
        assert!(matches!(
            resolve_method("GET_joke", None),
            Err(ApiError::MissingMethodName { .. })
        ));
    }
}
