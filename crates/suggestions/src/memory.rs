use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::query::{self, ListQuery};
use crate::validation::{validate_id, validate_new, validate_update, ContractError};
use crate::{NewWordSuggestion, QueryLimits, SuggestionUpdate, WordSuggestion};

/// An in-memory word suggestion collection that answers the HTTP contract.
///
/// Clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<WordSuggestion>>>,
    limits: QueryLimits,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<WordSuggestion>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            limits: QueryLimits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    fn records(&self) -> MutexGuard<'_, Vec<WordSuggestion>> {
        // The snapshot is only ever replaced record by record, so it is
        // still consistent after a panicking holder.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn create(&self, suggestion: NewWordSuggestion) -> Result<WordSuggestion, ContractError> {
        validate_new(&suggestion)?;
        let mut records = self.records();
        let id = loop {
            let candidate = generate_id();
            if !records.iter().any(|record| record.id == candidate) {
                break candidate;
            }
        };
        let record = WordSuggestion::from_new(id, suggestion);
        debug!(id = %record.id, word = %record.word, "stored word suggestion");
        records.push(record.clone());
        Ok(record)
    }

    pub fn get(&self, id: &str) -> Result<WordSuggestion, ContractError> {
        validate_id(id)?;
        self.records()
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub fn update(
        &self,
        id: &str,
        update: SuggestionUpdate,
    ) -> Result<WordSuggestion, ContractError> {
        validate_id(id)?;
        validate_update(&update)?;
        let mut records = self.records();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| not_found(id))?;
        record.apply(update);
        Ok(record.clone())
    }

    pub fn delete(&self, id: &str) -> Result<WordSuggestion, ContractError> {
        validate_id(id)?;
        let mut records = self.records();
        let index = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| not_found(id))?;
        debug!(id, "deleted word suggestion");
        Ok(records.remove(index))
    }

    /// Records one more reviewer approval.
    pub fn approve(&self, id: &str) -> Result<WordSuggestion, ContractError> {
        validate_id(id)?;
        let mut records = self.records();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| not_found(id))?;
        record.approvals = record.approvals.saturating_add(1);
        Ok(record.clone())
    }

    pub fn list(&self, query: &ListQuery) -> Vec<WordSuggestion> {
        let records = self.records();
        query::resolve(&records, query, &self.limits)
            .into_iter()
            .cloned()
            .collect()
    }
}

fn not_found(id: &str) -> ContractError {
    ContractError::NotFound { id: id.to_owned() }
}

fn generate_id() -> String {
    let bytes: [u8; 12] = rand::random();
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
