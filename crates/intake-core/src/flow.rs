//! Flow facade tying the catalog, answers, gates and navigation together.
//!
//! One [`OnboardingFlow`] is one run through the catalog. Instances never
//! share state; dropping one abandons the run.

use intake_domain::{PreviewStep, ProfileRecord, ScreenDescriptor};
use tracing::{debug, warn};

use crate::{
    answers::AnswerStore,
    catalog::Catalog,
    completion::CompletionHandler,
    navigation::{Forward, NavState, Navigator, Retreat},
    storage::ProfileStorage,
    validators::{self, BlockReason},
    CoreError,
};

/// Discrete input events accepted from the presentation layer. Inputs are
/// assumed to be sanitized already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    FieldEdit { name: String, value: String },
    OptionToggle { collection: String, option: String },
    OptionSelect { question: String, option: String },
    FrequencySelect(u8),
}

/// Result of a forward request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved { from: usize, to: usize },
    PreviewShown,
    /// The gate refused; position and answers are unchanged.
    Blocked(BlockReason),
    /// Hand-off signal: the profile was recorded and the flow is over.
    Completed(ProfileRecord),
}

/// What the presentation layer should display right now.
#[derive(Debug, Clone, Copy)]
pub struct FlowView<'a> {
    pub screen: &'a ScreenDescriptor,
    pub index: usize,
    pub total: usize,
    pub preview: Option<&'a PreviewStep>,
    pub can_retreat: bool,
    pub answers: &'a AnswerStore,
}

impl<'a> FlowView<'a> {
    pub fn is_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn title(&self) -> &'a str {
        match self.preview {
            Some(preview) => &preview.title,
            None => &self.screen.title,
        }
    }

    pub fn continue_label(&self) -> &'a str {
        match self.preview {
            Some(preview) => &preview.continue_label,
            None => self.screen.continue_label(),
        }
    }

    pub fn blocked_reason(&self) -> Option<BlockReason> {
        if self.is_preview() {
            None
        } else {
            validators::check(self.screen, self.answers)
        }
    }
}

pub struct OnboardingFlow<'a> {
    catalog: &'a Catalog,
    answers: AnswerStore,
    navigator: Navigator,
}

impl<'a> OnboardingFlow<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            answers: AnswerStore::new(),
            navigator: Navigator::new(catalog),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn position(&self) -> usize {
        self.navigator.cursor()
    }

    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    pub fn is_completed(&self) -> bool {
        self.navigator.is_completed()
    }

    pub fn current_screen(&self) -> &'a ScreenDescriptor {
        let catalog = self.catalog;
        catalog
            .get(self.navigator.cursor())
            .unwrap_or_else(|| catalog.terminal())
    }

    pub fn view(&self) -> FlowView<'_> {
        let screen = self.current_screen();
        let preview = if self.navigator.is_showing_preview() {
            screen.preview()
        } else {
            None
        };
        FlowView {
            screen,
            index: self.navigator.cursor(),
            total: self.catalog.len(),
            preview,
            can_retreat: self.navigator.can_retreat(),
            answers: &self.answers,
        }
    }

    /// Merges one input event into the answer store. Returns false when the
    /// flow already completed and the event was dropped.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        if self.navigator.is_completed() {
            warn!(?event, "input ignored after completion");
            return false;
        }
        match event {
            InputEvent::FieldEdit { name, value } => self.answers.set_field(&name, value),
            InputEvent::OptionToggle { collection, option } => {
                self.answers.toggle_option(&collection, &option);
            }
            InputEvent::OptionSelect { question, option } => {
                self.answers.select_single(&question, option)
            }
            InputEvent::FrequencySelect(value) => self.answers.select_frequency(value),
        }
        true
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.apply(InputEvent::FieldEdit {
            name: name.to_string(),
            value: value.into(),
        })
    }

    pub fn toggle_option(&mut self, collection: &str, option: &str) -> bool {
        self.apply(InputEvent::OptionToggle {
            collection: collection.to_string(),
            option: option.to_string(),
        })
    }

    pub fn select_single(&mut self, question: &str, option: &str) -> bool {
        self.apply(InputEvent::OptionSelect {
            question: question.to_string(),
            option: option.to_string(),
        })
    }

    pub fn select_frequency(&mut self, value: u8) -> bool {
        self.apply(InputEvent::FrequencySelect(value))
    }

    /// Moves forward when the current screen's gate allows it. Leaving the
    /// terminal screen hands the answers to `storage`; on failure the flow
    /// stays where it was so the same call can be retried.
    pub fn advance(&mut self, storage: &dyn ProfileStorage) -> Result<Advance, CoreError> {
        if self.navigator.is_completed() {
            return Err(CoreError::FlowCompleted);
        }
        if let Some(reason) = self.view().blocked_reason() {
            debug!(cursor = self.navigator.cursor(), %reason, "advance blocked");
            return Ok(Advance::Blocked(reason));
        }

        match self.navigator.advance()? {
            Forward::Moved { from, to } => Ok(Advance::Moved { from, to }),
            Forward::PreviewShown => Ok(Advance::PreviewShown),
            Forward::CompletionRequested => {
                let record = CompletionHandler::new(storage).complete(&self.answers)?;
                self.navigator.mark_completed();
                Ok(Advance::Completed(record))
            }
        }
    }

    /// Moves back without touching any collected answer.
    pub fn retreat(&mut self) -> Result<Retreat, CoreError> {
        self.navigator.retreat()
    }
}
