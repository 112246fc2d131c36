#![allow(dead_code)]

use restapi_core::{Endpoint, HttpMethod, ParamKind};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Joke {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub icon_url: String,
    pub categories: Vec<String>,
    pub url: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PantryDetails {
    pub name: String,
    pub description: String,
    pub baskets: Vec<String>,
}

/// Start the mock server on a random port in a background thread and
/// return its base URL.
pub fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn joke_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("get_joke", "/jokes/random")
            .method(HttpMethod::Get)
            .model::<Joke>()
            .query_parameter("category", ParamKind::String),
        Endpoint::new("get_categories", "/jokes/categories").method(HttpMethod::Get),
        Endpoint::new("get_search", "/jokes/search").query_parameter("query", ParamKind::String),
    ]
}

pub fn pantry_endpoints() -> Vec<Endpoint> {
    let basket = "/pantry/{pantry_id}/basket/{basket_id}";
    vec![
        Endpoint::new("create_pantry", "/pantry/create"),
        Endpoint::new("get_pantry", "/pantry/{pantry_id}").model::<PantryDetails>(),
        Endpoint::new("patch_pantry", "/pantry/{pantry_id}").model::<PantryDetails>(),
        Endpoint::new("get_basket", basket),
        Endpoint::new("create_basket", basket),
        Endpoint::new("update_basket", basket),
        Endpoint::new("delete_basket", basket),
    ]
}
