use std::collections::{BTreeMap, BTreeSet};

use intake_domain::{AnswerValue, FREQUENCY_KEY};
use tracing::debug;

/// Cumulative answers for one flow instance. Every operation merges into the
/// existing map; nothing here ever removes an unrelated key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-write-wins scalar assignment for a form field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        debug!(key = name, "set field");
        self.values
            .insert(name.to_string(), AnswerValue::Text(value.into()));
    }

    /// Inserts `option` into the collection when absent, removes it otherwise.
    /// Returns whether the option is selected afterwards.
    pub fn toggle_option(&mut self, collection: &str, option: &str) -> bool {
        let entry = self
            .values
            .entry(collection.to_string())
            .or_insert_with(|| AnswerValue::Selections(BTreeSet::new()));
        if !matches!(entry, AnswerValue::Selections(_)) {
            *entry = AnswerValue::Selections(BTreeSet::new());
        }
        let AnswerValue::Selections(set) = entry else {
            return false;
        };
        let selected = if set.remove(option) {
            false
        } else {
            set.insert(option.to_string());
            true
        };
        debug!(key = collection, selected, "toggle option");
        selected
    }

    /// Last-write-wins overwrite for a single-choice question.
    pub fn select_single(&mut self, question: &str, option: impl Into<String>) {
        debug!(key = question, "select option");
        self.values
            .insert(question.to_string(), AnswerValue::Choice(option.into()));
    }

    /// Records the weekly frequency under the reserved key.
    pub fn select_frequency(&mut self, value: u8) {
        debug!(key = FREQUENCY_KEY, "select frequency");
        self.values
            .insert(FREQUENCY_KEY.to_string(), AnswerValue::Frequency(value));
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AnswerValue::as_text)
    }

    pub fn choice(&self, question: &str) -> Option<&str> {
        self.get(question).and_then(AnswerValue::as_choice)
    }

    pub fn frequency(&self) -> Option<u8> {
        self.get(FREQUENCY_KEY).and_then(AnswerValue::as_frequency)
    }

    pub fn selections(&self, collection: &str) -> Option<&BTreeSet<String>> {
        self.get(collection).and_then(AnswerValue::as_selections)
    }

    pub fn is_selected(&self, collection: &str, option: &str) -> bool {
        self.selections(collection)
            .map(|set| set.contains(option))
            .unwrap_or(false)
    }

    pub fn selection_count(&self, collection: &str) -> usize {
        self.selections(collection).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    /// Copies the current answers for hand-off; the store itself stays intact.
    pub fn snapshot(&self) -> BTreeMap<String, AnswerValue> {
        self.values.clone()
    }
}
