//! Profile record produced when onboarding completes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::{AnswerValue, FREQUENCY_KEY, GOALS_KEY};

/// Immutable snapshot of every answer collected during one flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub answers: BTreeMap<String, AnswerValue>,
}

impl ProfileRecord {
    pub fn new(answers: BTreeMap<String, AnswerValue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed_at: Utc::now(),
            answers,
        }
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.answers.get(key)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(AnswerValue::as_text)
    }

    pub fn selection(&self, question: &str) -> Option<&str> {
        self.get(question).and_then(AnswerValue::as_choice)
    }

    pub fn goals(&self) -> Option<&BTreeSet<String>> {
        self.get(GOALS_KEY).and_then(AnswerValue::as_selections)
    }

    pub fn frequency(&self) -> Option<u8> {
        self.get(FREQUENCY_KEY).and_then(AnswerValue::as_frequency)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_read_reserved_keys() {
        let mut answers = BTreeMap::new();
        answers.insert(FREQUENCY_KEY.to_string(), AnswerValue::Frequency(4));
        answers.insert(
            GOALS_KEY.to_string(),
            AnswerValue::Selections(BTreeSet::from(["Better sleep".to_string()])),
        );
        answers.insert("fullName".to_string(), AnswerValue::Text("Ana".into()));
        let record = ProfileRecord::new(answers);

        assert_eq!(record.frequency(), Some(4));
        assert!(record.goals().expect("goals").contains("Better sleep"));
        assert_eq!(record.text("fullName"), Some("Ana"));
        assert_eq!(record.selection("fullName"), None);
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut answers = BTreeMap::new();
        answers.insert("Job Type".to_string(), AnswerValue::Choice("Moderate".into()));
        let record = ProfileRecord::new(answers);

        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"type\":\"choice\""));
        let back: ProfileRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }
}
