pub mod interaction;
pub mod interactive;
pub mod output;
pub mod render;
pub mod runner;
pub mod script;

use std::io;

use intake_config::{ConfigError, ConfigManager};
use intake_core::{standard_catalog, CoreError, ProfileStorage};
use intake_storage_json::JsonProfileStorage;
use thiserror::Error;
use tracing::info;

use crate::utils::{app_data_dir, build_info};
use interactive::DialoguerInteraction;
use output::OutputPreferences;
use runner::{FlowRunner, RunOutcome};
use script::ScriptInteraction;

const SCRIPT_ENV: &str = "FIT_INTAKE_CLI_SCRIPT";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env();
    let data_dir = app_data_dir();
    let config = ConfigManager::with_base_dir(data_dir.clone())?.load()?;
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
    });

    let storage = JsonProfileStorage::new(config.resolve_profile_root(&data_dir))?;
    let catalog = standard_catalog(config.show_preview).map_err(CoreError::from)?;
    info!(root = %storage.root().display(), ?mode, "starting onboarding");

    if storage.is_flow_complete()? {
        output::section("Onboarding already completed");
        match storage.load_profile()? {
            Some(record) => output::lines(&render::render_profile_summary(&record, &catalog)),
            None => output::warning("The stored profile could not be found."),
        }
        return Ok(());
    }

    output::section("Fit Intake");
    output::info(build_info::current().summary());

    let runner = FlowRunner::new(&catalog, &storage);
    let outcome = match mode {
        CliMode::Script => {
            let stdin = io::stdin();
            let mut interaction = ScriptInteraction::new(stdin.lock());
            runner.run(&mut interaction)?
        }
        CliMode::Interactive => {
            let mut interaction = DialoguerInteraction::new();
            let outcome = runner.run(&mut interaction);
            if let Some(err) = interaction.take_failure() {
                return Err(err.into());
            }
            outcome?
        }
    };

    match outcome {
        RunOutcome::Completed(record) => {
            output::success("Onboarding complete");
            output::info(format!(
                "Profile {} saved to {}",
                record.id,
                storage.profile_path().display()
            ));
            output::info("Opening your training dashboard...");
        }
        RunOutcome::Abandoned => {
            output::warning("Onboarding not finished. Your answers were not saved.");
        }
    }
    Ok(())
}
