//! Screen descriptors that make up an onboarding catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default continuation label shown when a screen does not override it.
pub const DEFAULT_CONTINUE_LABEL: &str = "Continue";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Value types accepted by form fields. Values are stored verbatim; the type
/// only drives how the presentation layer collects them.
pub enum FieldType {
    Text,
    LongText,
    Number,
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldType::Text => "text",
            FieldType::LongText => "long text",
            FieldType::Number => "number",
            FieldType::Date => "date",
        };
        f.write_str(label)
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub value_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, value_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value_type,
            required: false,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Marks the field as required for display purposes. Forms never block
    /// forward navigation.
    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A question answered by picking exactly one of its options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    pub fn new<I, S>(question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

/// One card on the product preview screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewFeature {
    pub title: String,
    pub description: String,
}

impl PreviewFeature {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The bonus screen inserted once before completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewStep {
    pub title: String,
    pub features: Vec<PreviewFeature>,
    pub continue_label: String,
}

impl PreviewStep {
    pub fn new(title: impl Into<String>, features: Vec<PreviewFeature>) -> Self {
        Self {
            title: title.into(),
            features,
            continue_label: DEFAULT_CONTINUE_LABEL.into(),
        }
    }

    pub fn with_continue_label(mut self, label: impl Into<String>) -> Self {
        self.continue_label = label.into();
        self
    }
}

/// Multi-select screens need one selection unless told otherwise.
pub const DEFAULT_MIN_SELECTIONS: usize = 1;

fn default_min_selections() -> usize {
    DEFAULT_MIN_SELECTIONS
}

/// Kind-specific payload of a screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenKind {
    Informational,
    Form {
        fields: Vec<FieldDescriptor>,
        /// Inert upload control; nothing in the flow reads uploaded content.
        #[serde(default)]
        accepts_upload: bool,
    },
    SingleChoice {
        questions: Vec<ChoiceQuestion>,
    },
    MultiSelect {
        collection: String,
        prompt: String,
        options: Vec<String>,
        #[serde(default = "default_min_selections")]
        min_selections: usize,
    },
    Frequency {
        prompt: String,
        options: Vec<u8>,
    },
    Terminal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview: Option<PreviewStep>,
    },
}

impl ScreenKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScreenKind::Informational => "informational",
            ScreenKind::Form { .. } => "form",
            ScreenKind::SingleChoice { .. } => "single-choice",
            ScreenKind::MultiSelect { .. } => "multi-select",
            ScreenKind::Frequency { .. } => "frequency",
            ScreenKind::Terminal { .. } => "terminal",
        }
    }
}

/// Immutable description of one step in the onboarding sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScreenDescriptor {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_label: Option<String>,
    /// Icon name shown next to the title, any kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub kind: ScreenKind,
}

impl ScreenDescriptor {
    fn with_kind(id: u32, title: impl Into<String>, kind: ScreenKind) -> Self {
        Self {
            id,
            title: title.into(),
            body: None,
            continue_label: None,
            icon: None,
            kind,
        }
    }

    pub fn informational(id: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_kind(id, title, ScreenKind::Informational).with_body(body)
    }

    pub fn form(id: u32, title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::with_kind(
            id,
            title,
            ScreenKind::Form {
                fields,
                accepts_upload: false,
            },
        )
    }

    pub fn single_choice(id: u32, title: impl Into<String>, questions: Vec<ChoiceQuestion>) -> Self {
        Self::with_kind(id, title, ScreenKind::SingleChoice { questions })
    }

    pub fn multi_select<I, S>(
        id: u32,
        title: impl Into<String>,
        collection: impl Into<String>,
        prompt: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            id,
            title,
            ScreenKind::MultiSelect {
                collection: collection.into(),
                prompt: prompt.into(),
                options: options.into_iter().map(Into::into).collect(),
                min_selections: DEFAULT_MIN_SELECTIONS,
            },
        )
    }

    pub fn frequency(
        id: u32,
        title: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<u8>,
    ) -> Self {
        Self::with_kind(
            id,
            title,
            ScreenKind::Frequency {
                prompt: prompt.into(),
                options,
            },
        )
    }

    pub fn terminal(id: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_kind(id, title, ScreenKind::Terminal { preview: None }).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_continue_label(mut self, label: impl Into<String>) -> Self {
        self.continue_label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, name: impl Into<String>) -> Self {
        self.icon = Some(name.into());
        self
    }

    /// Enables the inert upload placeholder on a form screen.
    pub fn with_upload(mut self) -> Self {
        if let ScreenKind::Form { accepts_upload, .. } = &mut self.kind {
            *accepts_upload = true;
        }
        self
    }

    /// Requires at least `min` selections (one by default, zero opts out) before a multi-select screen can be left.
    pub fn with_min_selections(mut self, min: usize) -> Self {
        if let ScreenKind::MultiSelect { min_selections, .. } = &mut self.kind {
            *min_selections = min;
        }
        self
    }

    /// Attaches the one-shot preview step to a terminal screen.
    pub fn with_preview(mut self, step: PreviewStep) -> Self {
        if let ScreenKind::Terminal { preview } = &mut self.kind {
            *preview = Some(step);
        }
        self
    }

    pub fn continue_label(&self) -> &str {
        self.continue_label
            .as_deref()
            .unwrap_or(DEFAULT_CONTINUE_LABEL)
    }

    pub fn preview(&self) -> Option<&PreviewStep> {
        match &self.kind {
            ScreenKind::Terminal { preview } => preview.as_ref(),
            _ => None,
        }
    }

    pub fn has_preview(&self) -> bool {
        self.preview().is_some()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, ScreenKind::Terminal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_label_falls_back_to_default() {
        let screen = ScreenDescriptor::informational(1, "Welcome", "Hello");
        assert_eq!(screen.continue_label(), DEFAULT_CONTINUE_LABEL);

        let screen = screen.with_continue_label("Let's Start!");
        assert_eq!(screen.continue_label(), "Let's Start!");
    }

    #[test]
    fn kind_specific_builders_ignore_other_kinds() {
        let screen = ScreenDescriptor::informational(1, "Welcome", "Hello")
            .with_preview(PreviewStep::new("Tour", Vec::new()))
            .with_min_selections(2)
            .with_upload();
        assert!(!screen.has_preview());
        assert_eq!(screen.kind, ScreenKind::Informational);
    }

    #[test]
    fn multi_select_requires_one_selection_unless_opted_out() {
        let goals = ScreenDescriptor::multi_select(10, "Your Goals", "selectedGoals", "Pick", ["A"]);
        assert!(matches!(goals.kind, ScreenKind::MultiSelect { min_selections: 1, .. }));

        let optional = goals.with_min_selections(0);
        assert!(matches!(optional.kind, ScreenKind::MultiSelect { min_selections: 0, .. }));
    }

    #[test]
    fn deserialized_multi_select_defaults_to_one_selection() {
        let json = serde_json::json!({
            "id": 10,
            "title": "Your Goals",
            "kind": "multi_select",
            "collection": "selectedGoals",
            "prompt": "Pick",
            "options": ["A", "B"],
        });
        let screen: ScreenDescriptor = serde_json::from_value(json).expect("deserialize");
        assert!(matches!(screen.kind, ScreenKind::MultiSelect { min_selections: 1, .. }));
    }

    #[test]
    fn icon_applies_to_any_kind() {
        let screen = ScreenDescriptor::terminal(11, "Awesome!", "Done").with_icon("trophy");
        assert_eq!(screen.icon.as_deref(), Some("trophy"));
        let json = serde_json::to_value(&screen).expect("serialize");
        assert_eq!(json["icon"], "trophy");
    }

    #[test]
    fn terminal_exposes_preview() {
        let screen = ScreenDescriptor::terminal(11, "Done", "All set").with_preview(
            PreviewStep::new("Quick Tour", vec![PreviewFeature::new("Notes", "Write things")])
                .with_continue_label("Get Started"),
        );
        let preview = screen.preview().expect("preview attached");
        assert_eq!(preview.continue_label, "Get Started");
        assert!(screen.is_terminal());
    }

    #[test]
    fn screen_serializes_with_kind_tag() {
        let screen = ScreenDescriptor::frequency(6, "Training Frequency", "How often?", vec![2, 3]);
        let json = serde_json::to_value(&screen).expect("serialize");
        assert_eq!(json["kind"], "frequency");
        assert_eq!(json["options"], serde_json::json!([2, 3]));
        let back: ScreenDescriptor = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, screen);
    }
}
