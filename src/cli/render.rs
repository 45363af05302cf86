//! Pure text rendering of flow views and stored profiles.
//!
//! Rendering never prints; callers hand the lines to [`super::output::lines`].

use intake_core::{Catalog, FlowView};
use intake_domain::{AnswerValue, ProfileRecord, ScreenKind};

const DOT_DONE: char = '●';
const DOT_PENDING: char = '○';

/// Progress indicator: one dot per screen, filled up to the current one.
pub fn progress_dots(index: usize, total: usize) -> String {
    (0..total)
        .map(|position| if position <= index { DOT_DONE } else { DOT_PENDING })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_view(view: &FlowView<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{}  ({}/{})",
        progress_dots(view.index, view.total),
        view.index + 1,
        view.total
    ));
    lines.push(String::new());
    lines.push(view.title().to_string());

    if let Some(preview) = view.preview {
        for (number, feature) in preview.features.iter().enumerate() {
            lines.push(format!("  {}. {}", number + 1, feature.title));
            lines.push(format!("     {}", feature.description));
        }
    } else {
        if let Some(body) = &view.screen.body {
            lines.push(body.clone());
        }
        render_kind(view, &mut lines);
    }

    lines.push(String::new());
    let mut actions = vec![format!("[{}]", view.continue_label())];
    if view.can_retreat {
        actions.push("[Back]".to_string());
    }
    lines.push(actions.join("  "));
    if let Some(reason) = view.blocked_reason() {
        lines.push(format!("({reason})"));
    }
    lines
}

fn render_kind(view: &FlowView<'_>, lines: &mut Vec<String>) {
    let answers = view.answers;
    match &view.screen.kind {
        ScreenKind::Informational | ScreenKind::Terminal { .. } => {}
        ScreenKind::Form {
            fields,
            accepts_upload,
        } => {
            for field in fields {
                let marker = if field.required { " *" } else { "" };
                let value = match (answers.text(&field.name), &field.placeholder) {
                    (Some(value), _) => value.to_string(),
                    (None, Some(placeholder)) => format!("<{placeholder}>"),
                    (None, None) => format!("<{}>", field.value_type),
                };
                lines.push(format!("  {}{}: {}", field.label, marker, value));
            }
            if *accepts_upload {
                lines.push("  Upload: not supported in this terminal".to_string());
            }
        }
        ScreenKind::SingleChoice { questions } => {
            for question in questions {
                lines.push(format!("  {}", question.question));
                let chosen = answers.choice(&question.question);
                for (number, option) in question.options.iter().enumerate() {
                    let mark = if chosen == Some(option.as_str()) { "(•)" } else { "( )" };
                    lines.push(format!("    {} {}. {}", mark, number + 1, option));
                }
            }
        }
        ScreenKind::MultiSelect {
            collection,
            prompt,
            options,
            ..
        } => {
            lines.push(format!("  {prompt}"));
            for (number, option) in options.iter().enumerate() {
                let mark = if answers.is_selected(collection, option) {
                    "[x]"
                } else {
                    "[ ]"
                };
                lines.push(format!("    {} {}. {}", mark, number + 1, option));
            }
        }
        ScreenKind::Frequency { prompt, options } => {
            lines.push(format!("  {prompt}"));
            let chosen = answers.frequency();
            let row = options
                .iter()
                .map(|value| {
                    if chosen == Some(*value) {
                        format!("[{value}x]")
                    } else {
                        format!(" {value}x ")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("    {row}"));
        }
    }
}

/// Summary of a stored profile, in catalog order. Keys the catalog does not
/// know about are listed last.
pub fn render_profile_summary(record: &ProfileRecord, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!(
        "Profile completed {}",
        record.completed_at.format("%Y-%m-%d %H:%M UTC")
    )];
    let mut shown = Vec::new();

    for screen in catalog.iter() {
        let keys: Vec<(String, String)> = match &screen.kind {
            ScreenKind::Form { fields, .. } => fields
                .iter()
                .map(|field| (field.name.clone(), field.label.clone()))
                .collect(),
            ScreenKind::SingleChoice { questions } => questions
                .iter()
                .map(|question| (question.question.clone(), question.question.clone()))
                .collect(),
            ScreenKind::MultiSelect { collection, .. } => {
                vec![(collection.clone(), screen.title.clone())]
            }
            ScreenKind::Frequency { .. } => {
                vec![(intake_domain::FREQUENCY_KEY.to_string(), screen.title.clone())]
            }
            ScreenKind::Informational | ScreenKind::Terminal { .. } => Vec::new(),
        };
        for (key, label) in keys {
            if let Some(value) = record.get(&key) {
                lines.push(summary_line(&label, value));
                shown.push(key);
            }
        }
    }

    for (key, value) in &record.answers {
        if !shown.contains(key) {
            lines.push(summary_line(key, value));
        }
    }
    lines
}

fn summary_line(label: &str, value: &AnswerValue) -> String {
    format!("  {label}: {value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{standard_catalog, OnboardingFlow};
    use intake_domain::GOALS_KEY;
    use std::collections::BTreeMap;

    #[test]
    fn progress_fills_up_to_current_screen() {
        assert_eq!(progress_dots(1, 4), "● ● ○ ○");
        assert_eq!(progress_dots(0, 1), "●");
    }

    #[test]
    fn welcome_screen_renders_without_back() {
        let catalog = standard_catalog(true).expect("catalog");
        let flow = OnboardingFlow::new(&catalog);
        let rendered = render_view(&flow.view()).join("\n");
        insta::assert_snapshot!(rendered, @r###"
        ● ○ ○ ○ ○ ○ ○ ○ ○ ○ ○  (1/11)

        Welcome 🎉💪🔥
        Welcome to your personalized fitness journey! Answer a few questions to help us create the perfect program for you.

        [Let's Start!]
        "###);
    }

    #[test]
    fn goals_screen_marks_selections_and_block_reason() {
        let catalog = standard_catalog(false).expect("catalog");
        let mut flow = OnboardingFlow::new(&catalog);
        let storage = NullStorage;
        while flow.position() < 9 {
            flow.advance(&storage).expect("advance");
        }

        let lines = render_view(&flow.view());
        assert!(lines.contains(&"(Select at least one option to continue)".to_string()));
        assert!(lines.contains(&"    [ ] 1. Weight loss".to_string()));

        flow.toggle_option(GOALS_KEY, "Weight loss");
        let lines = render_view(&flow.view());
        assert!(lines.contains(&"    [x] 1. Weight loss".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("(Select")));
        assert_eq!(lines.last().map(String::as_str), Some("[Continue]  [Back]"));
    }

    #[test]
    fn profile_summary_follows_catalog_order() {
        let catalog = standard_catalog(false).expect("catalog");
        let mut answers = BTreeMap::new();
        answers.insert("frequency".to_string(), AnswerValue::Frequency(3));
        answers.insert("fullName".to_string(), AnswerValue::Text("Ana".into()));
        answers.insert("legacy".to_string(), AnswerValue::Text("kept".into()));
        let record = ProfileRecord::new(answers);

        let lines = render_profile_summary(&record, &catalog);
        assert_eq!(
            &lines[1..],
            &[
                "  Full Name: Ana".to_string(),
                "  Training Frequency: 3x per week".to_string(),
                "  legacy: kept".to_string(),
            ]
        );
    }

    struct NullStorage;

    impl intake_core::ProfileStorage for NullStorage {
        fn persist_profile(&self, _record: &ProfileRecord) -> Result<(), intake_core::CoreError> {
            Ok(())
        }
        fn mark_flow_complete(&self) -> Result<(), intake_core::CoreError> {
            Ok(())
        }
        fn discard_profile(&self) -> Result<(), intake_core::CoreError> {
            Ok(())
        }
        fn load_profile(&self) -> Result<Option<ProfileRecord>, intake_core::CoreError> {
            Ok(None)
        }
        fn is_flow_complete(&self) -> Result<bool, intake_core::CoreError> {
            Ok(false)
        }
    }
}
