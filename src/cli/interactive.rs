use std::collections::VecDeque;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use intake_core::{BlockReason, CoreError, FlowView, InputEvent};
use intake_domain::ScreenKind;

use super::interaction::{FlowCommand, FlowInteraction};
use super::{output, render};

const BACK_LABEL: &str = "Back";
const QUIT_LABEL: &str = "Quit";

/// Prompts for every answer on the current screen, then for the navigation
/// choice. Commands are queued so the runner consumes them one at a time.
pub struct DialoguerInteraction {
    theme: ColorfulTheme,
    pending: VecDeque<FlowCommand>,
    failure: Option<dialoguer::Error>,
}

impl DialoguerInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            pending: VecDeque::new(),
            failure: None,
        }
    }

    /// The prompt error that ended the run, if any.
    pub fn take_failure(&mut self) -> Option<dialoguer::Error> {
        self.failure.take()
    }

    fn collect(&mut self, view: &FlowView<'_>) -> Result<(), dialoguer::Error> {
        output::lines(&render::render_view(view));
        if !view.is_preview() {
            self.collect_answers(view)?;
        }
        let command = self.prompt_navigation(view)?;
        self.pending.push_back(command);
        Ok(())
    }

    fn collect_answers(&mut self, view: &FlowView<'_>) -> Result<(), dialoguer::Error> {
        let answers = view.answers;
        match &view.screen.kind {
            ScreenKind::Informational | ScreenKind::Terminal { .. } => {}
            ScreenKind::Form { fields, .. } => {
                for field in fields {
                    let current = answers.text(&field.name).unwrap_or_default().to_string();
                    let value = Input::<String>::with_theme(&self.theme)
                        .with_prompt(format!("{} ({})", field.label, field.value_type))
                        .with_initial_text(current.clone())
                        .allow_empty(true)
                        .interact_text()?;
                    if value != current {
                        self.pending.push_back(FlowCommand::Input(InputEvent::FieldEdit {
                            name: field.name.clone(),
                            value,
                        }));
                    }
                }
            }
            ScreenKind::SingleChoice { questions } => {
                for question in questions {
                    let current = answers.choice(&question.question);
                    let default = current
                        .and_then(|chosen| question.options.iter().position(|o| o == chosen))
                        .unwrap_or(0);
                    let picked = Select::with_theme(&self.theme)
                        .with_prompt(&question.question)
                        .items(&question.options)
                        .default(default)
                        .interact_opt()?;
                    if let Some(index) = picked {
                        let option = &question.options[index];
                        if current != Some(option.as_str()) {
                            self.pending.push_back(FlowCommand::Input(InputEvent::OptionSelect {
                                question: question.question.clone(),
                                option: option.clone(),
                            }));
                        }
                    }
                }
            }
            ScreenKind::MultiSelect {
                collection,
                prompt,
                options,
                ..
            } => {
                let defaults: Vec<bool> = options
                    .iter()
                    .map(|option| answers.is_selected(collection, option))
                    .collect();
                let Some(chosen) = MultiSelect::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(options)
                    .defaults(&defaults)
                    .interact_opt()?
                else {
                    return Ok(());
                };
                for (index, option) in options.iter().enumerate() {
                    if chosen.contains(&index) != defaults[index] {
                        self.pending.push_back(FlowCommand::Input(InputEvent::OptionToggle {
                            collection: collection.clone(),
                            option: option.clone(),
                        }));
                    }
                }
            }
            ScreenKind::Frequency { prompt, options } => {
                let labels: Vec<String> = options
                    .iter()
                    .map(|value| format!("{value}x per week"))
                    .collect();
                let current = answers.frequency();
                let default = current
                    .and_then(|chosen| options.iter().position(|value| *value == chosen))
                    .unwrap_or(0);
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(&labels)
                    .default(default)
                    .interact_opt()?;
                if let Some(index) = picked {
                    if current != Some(options[index]) {
                        self.pending
                            .push_back(FlowCommand::Input(InputEvent::FrequencySelect(options[index])));
                    }
                }
            }
        }
        Ok(())
    }

    fn prompt_navigation(&self, view: &FlowView<'_>) -> Result<FlowCommand, dialoguer::Error> {
        let mut items = vec![(view.continue_label().to_string(), FlowCommand::Continue)];
        if view.can_retreat {
            items.push((BACK_LABEL.to_string(), FlowCommand::Back));
        }
        items.push((QUIT_LABEL.to_string(), FlowCommand::Quit));

        let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
        let picked = Select::with_theme(&self.theme)
            .items(&labels)
            .default(0)
            .interact_opt()?;
        Ok(match picked {
            Some(index) => items[index].1.clone(),
            None if view.can_retreat => FlowCommand::Back,
            None => FlowCommand::Quit,
        })
    }
}

impl Default for DialoguerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowInteraction for DialoguerInteraction {
    fn next_command(&mut self, view: &FlowView<'_>) -> FlowCommand {
        if self.pending.is_empty() {
            if let Err(err) = self.collect(view) {
                self.failure = Some(err);
                return FlowCommand::Quit;
            }
        }
        self.pending.pop_front().unwrap_or(FlowCommand::Quit)
    }

    fn blocked(&mut self, reason: &BlockReason) {
        output::warning(reason);
    }

    fn persistence_failed(&mut self, error: &CoreError) -> bool {
        output::error(error);
        match Confirm::with_theme(&self.theme)
            .with_prompt("Try saving again?")
            .default(true)
            .interact()
        {
            Ok(retry) => retry,
            Err(err) => {
                self.failure = Some(err);
                false
            }
        }
    }
}
