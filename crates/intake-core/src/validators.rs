//! Forward-progress gates, one per screen kind.
//!
//! Only multi-select screens with a minimum can block; forms, single-choice
//! and frequency screens tolerate missing answers.

use std::fmt;

use intake_domain::{ScreenDescriptor, ScreenKind};

use crate::answers::AnswerStore;

/// Why an advance was refused. The user stays on the same screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    NeedsSelection {
        collection: String,
        required: usize,
        selected: usize,
    },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::NeedsSelection { required, .. } if *required == 1 => {
                f.write_str("Select at least one option to continue")
            }
            BlockReason::NeedsSelection { required, .. } => {
                write!(f, "Select at least {} options to continue", required)
            }
        }
    }
}

/// Returns the reason the screen cannot be left yet, if any.
pub fn check(screen: &ScreenDescriptor, answers: &AnswerStore) -> Option<BlockReason> {
    match &screen.kind {
        ScreenKind::MultiSelect {
            collection,
            min_selections,
            ..
        } => {
            let selected = answers.selection_count(collection);
            (selected < *min_selections).then(|| BlockReason::NeedsSelection {
                collection: collection.clone(),
                required: *min_selections,
                selected,
            })
        }
        ScreenKind::Informational
        | ScreenKind::Form { .. }
        | ScreenKind::SingleChoice { .. }
        | ScreenKind::Frequency { .. }
        | ScreenKind::Terminal { .. } => None,
    }
}

pub fn can_advance(screen: &ScreenDescriptor, answers: &AnswerStore) -> bool {
    check(screen, answers).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::{ChoiceQuestion, FieldDescriptor, FieldType};

    fn goals() -> ScreenDescriptor {
        ScreenDescriptor::multi_select(10, "Your Goals", "selectedGoals", "Pick", ["A", "B"])
    }

    #[test]
    fn goals_block_until_one_selected() {
        let mut answers = AnswerStore::new();
        assert_eq!(
            check(&goals(), &answers),
            Some(BlockReason::NeedsSelection {
                collection: "selectedGoals".into(),
                required: 1,
                selected: 0,
            })
        );

        answers.toggle_option("selectedGoals", "A");
        assert!(can_advance(&goals(), &answers));
    }

    #[test]
    fn other_kinds_never_block() {
        let answers = AnswerStore::new();
        let screens = [
            ScreenDescriptor::informational(1, "Welcome", "Hi"),
            ScreenDescriptor::form(
                2,
                "Personal",
                vec![FieldDescriptor::new("fullName", "Full Name", FieldType::Text).with_required()],
            ),
            ScreenDescriptor::single_choice(
                3,
                "Lifestyle",
                vec![ChoiceQuestion::new("Job Type", ["Moderate"])],
            ),
            ScreenDescriptor::frequency(4, "Frequency", "How often?", vec![2, 3, 4]),
            ScreenDescriptor::terminal(5, "Done", "All set"),
        ];
        for screen in &screens {
            assert!(can_advance(screen, &answers), "{} blocked", screen.kind.label());
        }
    }

    #[test]
    fn block_reason_reads_naturally() {
        let reason = BlockReason::NeedsSelection {
            collection: "selectedGoals".into(),
            required: 2,
            selected: 0,
        };
        assert_eq!(reason.to_string(), "Select at least 2 options to continue");
    }
}
