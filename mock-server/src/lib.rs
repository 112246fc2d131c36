use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const CATEGORIES: [&str; 4] = ["animal", "dev", "food", "science"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    pub id: String,
    pub categories: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub icon_url: String,
    pub url: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: usize,
    pub result: Vec<Joke>,
}

#[derive(Clone, Debug, Default)]
pub struct Pantry {
    pub name: String,
    pub description: String,
    pub baskets: HashMap<String, Map<String, Value>>,
}

#[derive(Serialize, Deserialize)]
pub struct PantryDetails {
    pub name: String,
    pub description: String,
    pub baskets: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreatePantry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdatePantry {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct RandomParams {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Pantry>>>;

#[derive(Clone)]
pub struct AppState {
    pub jokes: Arc<Vec<Joke>>,
    pub pantries: Db,
}

pub fn jokes() -> Vec<Joke> {
    let joke = |id: &str, category: &str, value: &str| Joke {
        id: id.to_string(),
        categories: vec![category.to_string()],
        created_at: "2020-01-05 13:42:19.576875".to_string(),
        updated_at: "2020-01-05 13:42:19.576875".to_string(),
        icon_url: "https://assets.chucknorris.host/img/avatar/chuck-norris.png".to_string(),
        url: format!("https://api.chucknorris.io/jokes/{id}"),
        value: value.to_string(),
    };
    vec![
        joke(
            "bmom6jqftpqgokh8adtolw",
            "animal",
            "Chuck Norris once rode a nine foot grizzly bear through an automatic car wash, instead of taking a shower.",
        ),
        joke(
            "ye0_hnd3rgq68e_pfvsqqg",
            "dev",
            "Chuck Norris's keyboard doesn't have a Ctrl key because nothing controls Chuck Norris.",
        ),
        joke(
            "zf6lgdx4sbemxk9ftj2eyq",
            "food",
            "Chuck Norris doesn't eat honey, he chews bees.",
        ),
        joke(
            "izjeqnjzteeqms8l8xgdhw",
            "science",
            "Chuck Norris knows the last digit of pi.",
        ),
    ]
}

pub fn app() -> Router {
    let state = AppState {
        jokes: Arc::new(jokes()),
        pantries: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/jokes/random", get(random_joke))
        .route("/jokes/categories", get(categories))
        .route("/jokes/search", get(search_jokes))
        .route("/pantry/create", post(create_pantry))
        .route("/pantry/{pantry_id}", patch(update_pantry).get(get_pantry))
        .route(
            "/pantry/{pantry_id}/basket/{basket_id}",
            get(get_basket)
                .post(create_basket)
                .put(update_basket)
                .delete(delete_basket),
        )
        .route("/echo/headers", get(echo_headers))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

async fn random_joke(State(state): State<AppState>, Query(params): Query<RandomParams>) -> Response {
    let found = match params.category.as_deref() {
        None => state.jokes.first(),
        Some(category) => state
            .jokes
            .iter()
            .find(|j| j.categories.iter().any(|c| c == category)),
    };
    match found {
        Some(joke) => Json(joke.clone()).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            format!(
                "No jokes for category \"{}\" found.",
                params.category.unwrap_or_default()
            ),
        ),
    }
}

async fn categories() -> Json<Vec<&'static str>> {
    Json(CATEGORIES.to_vec())
}

async fn search_jokes(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(query) = params.query.filter(|q| !q.is_empty()) else {
        return error(StatusCode::BAD_REQUEST, "search.query: size must be between 3 and 120");
    };
    let needle = query.to_lowercase();
    let result: Vec<Joke> = state
        .jokes
        .iter()
        .filter(|j| j.value.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Json(SearchResult {
        total: result.len(),
        result,
    })
    .into_response()
}

/// Responds with the new pantry id as plain text.
async fn create_pantry(State(state): State<AppState>, Json(input): Json<CreatePantry>) -> (StatusCode, String) {
    let id = Uuid::new_v4();
    let pantry = Pantry {
        name: input.name,
        description: input.description,
        baskets: HashMap::new(),
    };
    state.pantries.write().await.insert(id, pantry);
    (StatusCode::CREATED, id.to_string())
}

fn details(pantry: &Pantry) -> PantryDetails {
    let mut baskets: Vec<String> = pantry.baskets.keys().cloned().collect();
    baskets.sort();
    PantryDetails {
        name: pantry.name.clone(),
        description: pantry.description.clone(),
        baskets,
    }
}

async fn get_pantry(
    State(state): State<AppState>,
    Path(pantry_id): Path<Uuid>,
) -> Result<Json<PantryDetails>, Response> {
    let pantries = state.pantries.read().await;
    let pantry = pantries
        .get(&pantry_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "pantry not found"))?;
    Ok(Json(details(pantry)))
}

async fn update_pantry(
    State(state): State<AppState>,
    Path(pantry_id): Path<Uuid>,
    Json(input): Json<UpdatePantry>,
) -> Result<Json<PantryDetails>, Response> {
    let mut pantries = state.pantries.write().await;
    let pantry = pantries
        .get_mut(&pantry_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "pantry not found"))?;
    if let Some(name) = input.name {
        pantry.name = name;
    }
    if let Some(description) = input.description {
        pantry.description = description;
    }
    Ok(Json(details(pantry)))
}

async fn get_basket(
    State(state): State<AppState>,
    Path((pantry_id, basket_id)): Path<(Uuid, String)>,
) -> Result<Json<Map<String, Value>>, Response> {
    let pantries = state.pantries.read().await;
    pantries
        .get(&pantry_id)
        .and_then(|p| p.baskets.get(&basket_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("Could not get basket {basket_id}")))
}

/// Creates or replaces a basket. Responds with plain text, like the real
/// service does.
async fn create_basket(
    State(state): State<AppState>,
    Path((pantry_id, basket_id)): Path<(Uuid, String)>,
    Json(contents): Json<Map<String, Value>>,
) -> Result<String, Response> {
    let mut pantries = state.pantries.write().await;
    let pantry = pantries
        .get_mut(&pantry_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "pantry not found"))?;
    pantry.baskets.insert(basket_id.clone(), contents);
    Ok(format!("Your Pantry was updated with basket: {basket_id}!"))
}

/// Merges the body into an existing basket and returns the result.
async fn update_basket(
    State(state): State<AppState>,
    Path((pantry_id, basket_id)): Path<(Uuid, String)>,
    Json(contents): Json<Map<String, Value>>,
) -> Result<Json<Map<String, Value>>, Response> {
    let mut pantries = state.pantries.write().await;
    let basket = pantries
        .get_mut(&pantry_id)
        .and_then(|p| p.baskets.get_mut(&basket_id))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("Could not get basket {basket_id}")))?;
    basket.extend(contents);
    Ok(Json(basket.clone()))
}

async fn delete_basket(
    State(state): State<AppState>,
    Path((pantry_id, basket_id)): Path<(Uuid, String)>,
) -> Result<String, Response> {
    let mut pantries = state.pantries.write().await;
    pantries
        .get_mut(&pantry_id)
        .and_then(|p| p.baskets.remove(&basket_id))
        .map(|_| format!("{basket_id} was removed from your Pantry!"))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("Could not delete basket {basket_id}")))
}

async fn echo_headers(headers: HeaderMap) -> Json<HashMap<String, String>> {
    Json(
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
    )
}
