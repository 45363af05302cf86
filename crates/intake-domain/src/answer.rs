//! Answer values collected while the flow runs.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved key holding the multi-select goals collection.
pub const GOALS_KEY: &str = "selectedGoals";

/// Reserved key holding the weekly training frequency.
pub const FREQUENCY_KEY: &str = "frequency";

/// A single collected answer. The variant records which input produced it, so
/// overwrite and toggle semantics stay distinct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Free-form form input, stored verbatim.
    Text(String),
    /// The option picked for a single-choice question.
    Choice(String),
    /// Options toggled on in a multi-select screen.
    Selections(BTreeSet<String>),
    /// Picked weekly frequency.
    Frequency(u8),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            AnswerValue::Choice(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_selections(&self) -> Option<&BTreeSet<String>> {
        match self {
            AnswerValue::Selections(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_frequency(&self) -> Option<u8> {
        match self {
            AnswerValue::Frequency(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Text(value) | AnswerValue::Choice(value) => f.write_str(value),
            AnswerValue::Selections(values) => {
                let joined = values.iter().map(String::as_str).collect::<Vec<_>>();
                f.write_str(&joined.join(", "))
            }
            AnswerValue::Frequency(value) => write!(f, "{}x per week", value),
        }
    }
}
