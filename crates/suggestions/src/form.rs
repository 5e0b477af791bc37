//! Word submission form.
//!
//! A form either proposes a new word or, when opened on an existing word,
//! proposes an edit of it. Both are sent as a new suggestion; an edit
//! carries the edited word's id as `originalWordId`.

use tracing::debug;

use crate::{NewWordSuggestion, WordSuggestion, WordSuggestions};

pub const SUBMITTED_SUBTITLE: &str = "Your word edit has been sent for review by editors.";
pub const FAILED_SUBTITLE: &str = "Double check you have entered all required information.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordForm {
    pub word: String,
    pub word_class: String,
    pub definitions: Vec<String>,
    pub variations: Vec<String>,
    editing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted {
        suggestion: WordSuggestion,
        subtitle: &'static str,
    },
    Failed {
        subtitle: &'static str,
        reason: String,
    },
}

impl WordForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with `word` that submits an edit of it.
    pub fn editing(word: &WordSuggestion) -> Self {
        Self {
            word: word.word.clone(),
            word_class: word.word_class.clone(),
            definitions: word.definitions.clone(),
            variations: word.variations.clone(),
            editing: Some(word.id.clone()),
        }
    }

    pub fn edited_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// The payload that is posted: list entries trimmed, blank ones dropped.
    pub fn cleaned(&self) -> NewWordSuggestion {
        NewWordSuggestion {
            word: self.word.clone(),
            word_class: self.word_class.clone(),
            definitions: compact(&self.definitions),
            variations: compact(&self.variations),
            examples: Vec::new(),
            original_word_id: self.editing.clone(),
        }
    }

    pub async fn submit(&self, api: &WordSuggestions) -> SubmitOutcome {
        match api.suggest_new_word(&self.cleaned()).await {
            Ok(suggestion) => {
                debug!(id = %suggestion.id, "word form submitted");
                SubmitOutcome::Submitted {
                    suggestion,
                    subtitle: SUBMITTED_SUBTITLE,
                }
            }
            Err(error) => SubmitOutcome::Failed {
                subtitle: FAILED_SUBTITLE,
                reason: error.to_string(),
            },
        }
    }
}

fn compact(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}
