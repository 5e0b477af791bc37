mod config;
pub mod form;
pub mod memory;
pub mod query;
pub mod render;
mod suggestion;
mod suggestions_api;
pub mod validation;

pub use config::{ApiConfig, QueryLimits, DEFAULT_PAGE_SIZE, MAX_RANGE_SPAN};
pub use query::{ListQuery, Sort, SortDirection, SortKey};
pub use suggestion::{
    Example, NewWordSuggestion, SuggestionUpdate, WordSuggestion, WORD_SUGGESTION_KEYS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("could not reach the word suggestion API: {0}")]
    Fetch(reqwest::Error),
    #[error("could not read the word suggestion API response: {0}")]
    Deserialize(reqwest::Error),
    #[error("the word suggestion API refused the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("{0} cannot be used as an API base url")]
    InvalidBaseUrl(String),
}

impl SuggestionError {
    /// Status code of a refused request, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the word suggestion collection of the Igbo API.
pub struct WordSuggestions {
    client: reqwest::Client,
    config: ApiConfig,
}

impl WordSuggestions {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn suggest_new_word(
        &self,
        suggestion: &NewWordSuggestion,
    ) -> Result<WordSuggestion, SuggestionError> {
        suggestions_api::suggest_new_word(&self.client, &self.config, suggestion).await
    }

    pub async fn update_word_suggestion(
        &self,
        id: &str,
        update: &SuggestionUpdate,
    ) -> Result<WordSuggestion, SuggestionError> {
        suggestions_api::update_word_suggestion(&self.client, &self.config, id, update).await
    }

    pub async fn get_word_suggestion(&self, id: &str) -> Result<WordSuggestion, SuggestionError> {
        suggestions_api::get_word_suggestion(&self.client, &self.config, id).await
    }

    pub async fn get_word_suggestions(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<WordSuggestion>, SuggestionError> {
        suggestions_api::get_word_suggestions(&self.client, &self.config, query).await
    }

    pub async fn delete_word_suggestion(
        &self,
        id: &str,
    ) -> Result<WordSuggestion, SuggestionError> {
        suggestions_api::delete_word_suggestion(&self.client, &self.config, id).await
    }
}
