//! Request assembly.
//!
//! # Design
//! Preparation is pure: it reads the resolved endpoint, the client settings
//! and the caller's arguments, and produces a [`PreparedCall`] without any
//! I/O. The blocking and async executors share it unchanged.
//!
//! Query and path parameters are deliberately asymmetric. Query arguments
//! outside the contract or with falsy values are dropped without error; a
//! path placeholder without an argument fails the call.

use tracing::{debug, trace};

use crate::args::{is_truthy, render, CallArgs};
use crate::endpoint::ResolvedEndpoint;
use crate::error::ApiError;
use crate::http::{Headers, HttpMethod, HttpRequest};
use crate::model::Model;
use crate::path;
use crate::transport::Driver;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// Client-level settings read during preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefix for every endpoint path. Concatenated as-is.
    pub base_url: String,
    pub default_headers: Headers,
    /// Merged over `default_headers`; wins on conflicts.
    pub custom_headers: Option<Headers>,
}

impl Settings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: default_headers(),
            custom_headers: None,
        }
    }

    fn headers(&self) -> Headers {
        let mut headers = self.default_headers.clone();
        if let Some(custom) = &self.custom_headers {
            headers.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        headers
    }
}

/// Headers sent when the caller configures none.
pub fn default_headers() -> Headers {
    Headers::from([("accept".to_string(), APPLICATION_JSON.to_string())])
}

/// A request ready to hand to the transport.
#[derive(Debug, Clone)]
pub struct PreparedCall {
    pub request: HttpRequest,
    pub model: Option<Model>,
}

impl PreparedCall {
    pub fn method(&self) -> HttpMethod {
        self.request.method
    }
}

/// Assemble the request for one call of `endpoint`.
pub fn prepare(
    settings: &Settings,
    driver: &Driver,
    endpoint: &ResolvedEndpoint,
    args: &CallArgs,
) -> Result<PreparedCall, ApiError> {
    let method = endpoint.method();
    if !driver.supports(method) {
        return Err(ApiError::UnsupportedMethod { method });
    }

    let mut headers = settings.headers();
    let body = args.body().cloned();
    if body.is_some() {
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
    }

    let path = if endpoint.path_parameters().is_empty() {
        endpoint.path().to_string()
    } else {
        path::substitute(endpoint.path(), |name| args.get(name).map(render))
            .map_err(|parameter| ApiError::MissingPathParameter {
                endpoint: endpoint.name().to_string(),
                parameter,
            })?
            .into_owned()
    };

    let mut url = format!("{}{}", settings.base_url, path);
    let query = query_string(endpoint, args);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    debug!(endpoint = endpoint.name(), %method, %url, "prepared call");
    Ok(PreparedCall {
        request: HttpRequest {
            method,
            url,
            headers,
            body,
        },
        model: endpoint.model().copied(),
    })
}

fn query_string(endpoint: &ResolvedEndpoint, args: &CallArgs) -> String {
    for key in args.keys() {
        if !endpoint.accepts_query(key) && !endpoint.path_parameters().iter().any(|p| p == key) {
            trace!(endpoint = endpoint.name(), key, "ignoring argument outside the contract");
        }
    }

    endpoint
        .query_parameters()
        .iter()
        .filter_map(|param| {
            let value = args.get(&param.name)?;
            if !is_truthy(value) {
                trace!(endpoint = endpoint.name(), key = %param.name, "dropping falsy query argument");
                return None;
            }
            Some(format!("{}={}", param.name, render(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{Endpoint, ParamKind};
    use crate::http::HttpResponse;
    use crate::transport::Transport;
    use serde_json::json;

    struct Everything;
    impl Transport for Everything {}

    struct GetOnly;
    impl Transport for GetOnly {
        fn supports(&self, method: HttpMethod) -> bool {
            method == HttpMethod::Get
        }

        fn get(&self, _: &HttpRequest) -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse::new(200, ""))
        }
    }

    const BASE_URL: &str = "https://api.chucknorris.io/jokes";

    fn settings() -> Settings {
        Settings::new(BASE_URL)
    }

    fn driver() -> Driver {
        Driver::blocking(Everything)
    }

    fn joke() -> ResolvedEndpoint {
        Endpoint::new("get_joke", "/random")
            .query_parameter("category", ParamKind::String)
            .resolve()
            .unwrap()
    }

    fn basket(name: &str) -> ResolvedEndpoint {
        Endpoint::new(name, "/pantry/{pantry_id}/basket/{basket_id}")
            .resolve()
            .unwrap()
    }

    #[test]
    fn url_is_literal_concatenation() {
        let settings = Settings::new("http://localhost:3000/");
        let call = prepare(&settings, &driver(), &joke(), &CallArgs::new()).unwrap();
        assert_eq!(call.request.url, "http://localhost:3000//random");
        assert_eq!(call.method(), HttpMethod::Get);
        assert!(call.request.body.is_none());
        assert!(call.model.is_none());
    }

    #[test]
    fn truthy_query_argument_is_appended() {
        let args = CallArgs::new().arg("category", "animal");
        let call = prepare(&settings(), &driver(), &joke(), &args).unwrap();
        assert!(call.request.url.ends_with("/random?category=animal"));
    }

    #[test]
    fn falsy_query_argument_is_dropped() {
        let args = CallArgs::new().arg("category", "");
        let call = prepare(&settings(), &driver(), &joke(), &args).unwrap();
        assert_eq!(call.request.url, format!("{BASE_URL}/random"));
    }

    #[test]
    fn arguments_outside_the_contract_are_dropped() {
        let args = CallArgs::new().arg("query", "something");
        let call = prepare(&settings(), &driver(), &joke(), &args).unwrap();
        assert_eq!(call.request.url, format!("{BASE_URL}/random"));

        let categories = Endpoint::new("get_categories", "/categories").resolve().unwrap();
        let args = CallArgs::new().arg("category", "dev");
        let call = prepare(&settings(), &driver(), &categories, &args).unwrap();
        assert_eq!(call.request.url, format!("{BASE_URL}/categories"));
    }

    #[test]
    fn query_follows_contract_order() {
        let search = Endpoint::new("get_search", "/search")
            .query_parameter("query", ParamKind::String)
            .query_parameter("limit", ParamKind::Integer)
            .query_parameter("exact", ParamKind::Boolean)
            .resolve()
            .unwrap();
        let args = CallArgs::new()
            .arg("limit", 10)
            .arg("query", "kick")
            .arg("exact", false);
        let call = prepare(&settings(), &driver(), &search, &args).unwrap();
        assert!(call.request.url.ends_with("/search?query=kick&limit=10"));
    }

    #[test]
    fn path_parameters_are_substituted() {
        let args = CallArgs::new()
            .arg("pantry_id", "p-123")
            .arg("basket_id", "groceries");
        let call = prepare(&settings(), &driver(), &basket("get_basket"), &args).unwrap();
        assert_eq!(
            call.request.url,
            format!("{BASE_URL}/pantry/p-123/basket/groceries")
        );
    }

    #[test]
    fn missing_path_parameter_fails() {
        let args = CallArgs::new().arg("pantry_id", "p-123");
        let err = prepare(&settings(), &driver(), &basket("get_basket"), &args).unwrap_err();
        match err {
            ApiError::MissingPathParameter {
                endpoint,
                parameter,
            } => {
                assert_eq!(endpoint, "get_basket");
                assert_eq!(parameter, "basket_id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn falsy_path_argument_is_still_substituted() {
        let args = CallArgs::new().arg("pantry_id", "").arg("basket_id", 0);
        let call = prepare(&settings(), &driver(), &basket("get_basket"), &args).unwrap();
        assert!(call.request.url.ends_with("/pantry//basket/0"));
    }

    #[test]
    fn body_sets_json_content_type() {
        let args = CallArgs::new()
            .arg("pantry_id", "p")
            .arg("basket_id", "b")
            .data(json!({"Test": "Hello world!"}));
        let call = prepare(&settings(), &driver(), &basket("create_basket"), &args).unwrap();
        assert_eq!(call.method(), HttpMethod::Post);
        assert_eq!(call.request.body, Some(json!({"Test": "Hello world!"})));
        assert_eq!(call.request.headers[CONTENT_TYPE], APPLICATION_JSON);
    }

    #[test]
    fn no_body_no_content_type() {
        let call = prepare(&settings(), &driver(), &joke(), &CallArgs::new()).unwrap();
        assert!(!call.request.headers.contains_key(CONTENT_TYPE));
        assert_eq!(call.request.headers["accept"], APPLICATION_JSON);
    }

    #[test]
    fn custom_headers_override_defaults() {
        let mut settings = settings();
        settings
            .default_headers
            .insert("x-api-key".to_string(), "default".to_string());
        settings.custom_headers = Some(Headers::from([
            ("x-api-key".to_string(), "custom".to_string()),
            ("x-trace".to_string(), "1".to_string()),
        ]));
        let call = prepare(&settings, &driver(), &joke(), &CallArgs::new()).unwrap();
        assert_eq!(call.request.headers["x-api-key"], "custom");
        assert_eq!(call.request.headers["x-trace"], "1");
        assert_eq!(call.request.headers["accept"], APPLICATION_JSON);
        // The settings themselves are left untouched.
        assert_eq!(settings.default_headers["x-api-key"], "default");
    }

    #[test]
    fn unsupported_verb_fails_before_sending() {
        let driver = Driver::blocking(GetOnly);
        let args = CallArgs::new().arg("pantry_id", "p").arg("basket_id", "b");
        let err = prepare(&settings(), &driver, &basket("delete_basket"), &args).unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnsupportedMethod {
                method: HttpMethod::Delete
            }
        ));
    }

    #[test]
    fn braces_in_query_values_are_not_placeholders() {
        let endpoint = Endpoint::new("get_basket", "/pantry/{pantry_id}")
            .query_parameter("filter", ParamKind::String)
            .resolve()
            .unwrap();
        let args = CallArgs::new().arg("pantry_id", "p").arg("filter", "{basket_id}");
        let call = prepare(&settings(), &driver(), &endpoint, &args).unwrap();
        assert!(call.request.url.ends_with("/pantry/p?filter={basket_id}"));
    }
}
