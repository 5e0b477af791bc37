use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{NewWordSuggestion, SuggestionUpdate};

/// Length of a well-formed word id, in hex digits.
pub const ID_LENGTH: usize = 24;

/// Why a write or lookup was refused. Every variant is reported as a 400.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no word suggestion exists with id {id}")]
    NotFound { id: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("word is required")]
    MissingWord,
    #[error("word class is required")]
    MissingWordClass,
    #[error("at least one definition is required")]
    MissingDefinitions,
    #[error("definition {position} is empty")]
    EmptyDefinition { position: usize },
    #[error("\"{0}\" is not a valid word id")]
    InvalidId(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// Body sent back with every refused request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ContractError {
    pub const STATUS: u16 = 400;

    pub fn status(&self) -> u16 {
        Self::STATUS
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|byte| byte.is_ascii_hexdigit())
}

pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_owned()))
    }
}

pub fn validate_new(suggestion: &NewWordSuggestion) -> Result<(), ValidationError> {
    validate_fields(
        &suggestion.word,
        &suggestion.word_class,
        &suggestion.definitions,
        suggestion.original_word_id.as_deref(),
    )
}

pub fn validate_update(update: &SuggestionUpdate) -> Result<(), ValidationError> {
    validate_fields(
        &update.word,
        &update.word_class,
        &update.definitions,
        update.original_word_id.as_deref(),
    )
}

fn validate_fields(
    word: &str,
    word_class: &str,
    definitions: &[String],
    original_word_id: Option<&str>,
) -> Result<(), ValidationError> {
    if word.trim().is_empty() {
        return Err(ValidationError::MissingWord);
    }
    if word_class.trim().is_empty() {
        return Err(ValidationError::MissingWordClass);
    }
    if definitions.is_empty() {
        return Err(ValidationError::MissingDefinitions);
    }
    if let Some(index) = definitions
        .iter()
        .position(|definition| definition.trim().is_empty())
    {
        return Err(ValidationError::EmptyDefinition {
            position: index + 1,
        });
    }
    if let Some(original_word_id) = original_word_id {
        validate_id(original_word_id)?;
    }
    Ok(())
}
