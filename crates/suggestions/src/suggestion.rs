use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSuggestion {
    pub id: String,
    pub word: String,
    pub word_class: String,
    pub definitions: Vec<String>,
    pub variations: Vec<String>,
    pub examples: Vec<Example>,
    pub approvals: u32,
    pub original_word_id: Option<String>,
}

/// Keys every serialized [`WordSuggestion`] carries.
pub const WORD_SUGGESTION_KEYS: [&str; 8] = [
    "id",
    "word",
    "wordClass",
    "definitions",
    "variations",
    "examples",
    "approvals",
    "originalWordId",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    pub igbo: String,
    pub english: String,
}

/// Body of a creation request.
///
/// Every field defaults when missing so an incomplete body reaches
/// validation instead of failing to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewWordSuggestion {
    pub word: String,
    pub word_class: String,
    pub definitions: Vec<String>,
    pub variations: Vec<String>,
    pub examples: Vec<Example>,
    pub original_word_id: Option<String>,
}

/// Body of an update request.
///
/// `word`, `wordClass` and `definitions` are required on every update.
/// The optional fields keep their stored value when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestionUpdate {
    pub word: String,
    pub word_class: String,
    pub definitions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_word_id: Option<String>,
}

impl WordSuggestion {
    pub(crate) fn from_new(id: String, suggestion: NewWordSuggestion) -> Self {
        Self {
            id,
            word: suggestion.word,
            word_class: suggestion.word_class,
            definitions: suggestion.definitions,
            variations: suggestion.variations,
            examples: suggestion.examples,
            approvals: 0,
            original_word_id: suggestion.original_word_id,
        }
    }

    /// Replaces the fields carried by `update`, leaving `approvals` alone.
    pub(crate) fn apply(&mut self, update: SuggestionUpdate) {
        self.word = update.word;
        self.word_class = update.word_class;
        self.definitions = update.definitions;
        if let Some(variations) = update.variations {
            self.variations = variations;
        }
        if let Some(examples) = update.examples {
            self.examples = examples;
        }
        if let Some(original_word_id) = update.original_word_id {
            self.original_word_id = Some(original_word_id);
        }
    }
}

impl From<&WordSuggestion> for SuggestionUpdate {
    fn from(suggestion: &WordSuggestion) -> Self {
        Self {
            word: suggestion.word.clone(),
            word_class: suggestion.word_class.clone(),
            definitions: suggestion.definitions.clone(),
            variations: Some(suggestion.variations.clone()),
            examples: Some(suggestion.examples.clone()),
            original_word_id: suggestion.original_word_id.clone(),
        }
    }
}
