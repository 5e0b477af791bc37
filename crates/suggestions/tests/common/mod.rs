//! Shared setup for the word suggestion integration tests.
//!
//! By default every test gets its own fixture server: an axum router over
//! a fresh [`MemoryStore`], bound to an ephemeral local port. Setting
//! `IGBO_API_URL` (and optionally `IGBO_API_KEY`) points the suite at a
//! running API instead.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use suggestions::memory::MemoryStore;
use suggestions::validation::{ContractError, ValidationError};
use suggestions::{
    ApiConfig, Example, ListQuery, NewWordSuggestion, SuggestionUpdate, WordSuggestion,
    WordSuggestions,
};

/// Well-formed, but never assigned.
pub const WORD_SUGGESTION_ID: &str = "5f864d7401203866b6546dd3";
pub const INVALID_ID: &str = "invalid-id";

pub struct Harness {
    pub api: WordSuggestions,
    pub store: Option<MemoryStore>,
}

impl Harness {
    pub async fn start() -> Self {
        if let Ok(url) = std::env::var("IGBO_API_URL") {
            let mut config = ApiConfig::new(&url).expect("IGBO_API_URL is not a url");
            if let Ok(api_key) = std::env::var("IGBO_API_KEY") {
                config = config.with_api_key(api_key);
            }
            return Self {
                api: WordSuggestions::new(config),
                store: None,
            };
        }
        let store = MemoryStore::new();
        let base_url = serve(store.clone()).await;
        let config = ApiConfig::new(&base_url).expect("fixture url");
        Self {
            api: WordSuggestions::new(config),
            store: Some(store),
        }
    }

    /// Records approvals directly in the fixture store. A remote API keeps
    /// its own reviewer workflow, so this does nothing there.
    pub fn approve(&self, id: &str, times: u32) {
        if let Some(store) = &self.store {
            for _ in 0..times {
                store.approve(id).expect("approve fixture suggestion");
            }
        }
    }

    /// Submits `count` distinct suggestions concurrently.
    pub async fn seed(&self, count: usize) -> Vec<WordSuggestion> {
        let payloads = (0..count)
            .map(|index| NewWordSuggestion {
                word: format!("okwu{index:02}"),
                word_class: ["noun", "verb", "adjective"][index % 3].to_owned(),
                definitions: vec![format!("definition {}", index % 7)],
                ..word_suggestion_data()
            })
            .collect::<Vec<_>>();
        join_all(payloads.iter().map(|payload| self.api.suggest_new_word(payload)))
            .await
            .into_iter()
            .map(|result| result.expect("seed suggestion"))
            .collect()
    }

    pub fn collection_url(&self) -> String {
        let base = self.api.config().base_url.as_str().trim_end_matches('/');
        format!("{base}/wordSuggestions")
    }
}

pub fn word_suggestion_data() -> NewWordSuggestion {
    NewWordSuggestion {
        word: "mmiri".to_owned(),
        word_class: "noun".to_owned(),
        definitions: vec!["water".to_owned()],
        variations: vec!["mmili".to_owned()],
        examples: vec![Example {
            igbo: "Nye m mmiri.".to_owned(),
            english: "Give me water.".to_owned(),
        }],
        original_word_id: None,
    }
}

pub fn word_suggestion_approved_data() -> NewWordSuggestion {
    NewWordSuggestion {
        word: "igwe".to_owned(),
        definitions: vec!["sky".to_owned(), "heaven".to_owned()],
        ..word_suggestion_data()
    }
}

pub fn malformed_word_suggestion_data() -> NewWordSuggestion {
    NewWordSuggestion {
        word: String::new(),
        word_class: String::new(),
        definitions: Vec::new(),
        ..word_suggestion_data()
    }
}

pub fn updated_word_suggestion_data() -> SuggestionUpdate {
    SuggestionUpdate {
        word: "mmiri ozuzo".to_owned(),
        word_class: "noun".to_owned(),
        definitions: vec!["rain".to_owned(), "rainwater".to_owned()],
        variations: Some(vec!["mmili ozuzo".to_owned()]),
        examples: Some(vec![Example {
            igbo: "Mmiri ozuzo na-ezo.".to_owned(),
            english: "The rain is falling.".to_owned(),
        }]),
        original_word_id: None,
    }
}

/// Asserts every response holds at most `max` records and no record shows
/// up twice across them.
pub fn expect_uniq_sets_of_responses(responses: &[Vec<WordSuggestion>], max: usize) {
    let mut seen = std::collections::HashSet::new();
    for response in responses {
        assert!(response.len() <= max, "{} records in one response", response.len());
        for suggestion in response {
            assert!(seen.insert(suggestion.id.clone()), "{} repeated", suggestion.id);
        }
    }
}

pub fn expect_array_is_in_order<K, F>(records: &[WordSuggestion], key: F, descending: bool)
where
    K: Ord + std::fmt::Debug,
    F: Fn(&WordSuggestion) -> K,
{
    for pair in records.windows(2) {
        let (first, second) = (key(&pair[0]), key(&pair[1]));
        if descending {
            assert!(first >= second, "{first:?} before {second:?}");
        } else {
            assert!(first <= second, "{first:?} before {second:?}");
        }
    }
}

pub async fn serve(store: MemoryStore) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let address = listener.local_addr().expect("fixture address");
    tokio::spawn(async move {
        axum::serve(listener, router(store))
            .await
            .expect("fixture server");
    });
    format!("http://{address}/api/v1")
}

fn router(store: MemoryStore) -> Router {
    Router::new()
        .route("/api/v1/wordSuggestions", get(list).post(create))
        .route(
            "/api/v1/wordSuggestions/:id",
            get(show).put(update).delete(remove),
        )
        .with_state(store)
}

fn respond<T: Serialize>(result: Result<T, ContractError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => (StatusCode::BAD_REQUEST, Json(error.body())).into_response(),
    }
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, ContractError> {
    serde_json::from_slice(body)
        .map_err(|error| ValidationError::MalformedBody(error.to_string()).into())
}

async fn list(
    State(store): State<MemoryStore>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    respond(Ok(store.list(&ListQuery::from_pairs(pairs))))
}

async fn create(State(store): State<MemoryStore>, body: Bytes) -> Response {
    respond(parse(&body).and_then(|suggestion| store.create(suggestion)))
}

async fn show(State(store): State<MemoryStore>, Path(id): Path<String>) -> Response {
    respond(store.get(&id))
}

async fn update(
    State(store): State<MemoryStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    respond(parse(&body).and_then(|update| store.update(&id, update)))
}

async fn remove(State(store): State<MemoryStore>, Path(id): Path<String>) -> Response {
    respond(store.delete(&id))
}
