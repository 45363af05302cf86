use intake_core::{Advance, Catalog, CoreError, OnboardingFlow, ProfileStorage, Retreat};
use intake_domain::ProfileRecord;
use tracing::{debug, info, warn};

use super::interaction::{FlowCommand, FlowInteraction};

/// How a run through the catalog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(ProfileRecord),
    Abandoned,
}

/// Drives one [`OnboardingFlow`] with commands from a [`FlowInteraction`].
pub struct FlowRunner<'a> {
    catalog: &'a Catalog,
    storage: &'a dyn ProfileStorage,
}

impl<'a> FlowRunner<'a> {
    pub fn new(catalog: &'a Catalog, storage: &'a dyn ProfileStorage) -> Self {
        Self { catalog, storage }
    }

    pub fn run<I>(&self, interaction: &mut I) -> Result<RunOutcome, CoreError>
    where
        I: FlowInteraction + ?Sized,
    {
        let mut flow = OnboardingFlow::new(self.catalog);
        loop {
            let command = interaction.next_command(&flow.view());
            match command {
                FlowCommand::Input(event) => {
                    flow.apply(event);
                }
                FlowCommand::Back => match flow.retreat()? {
                    Retreat::Moved { from, to } => debug!(from, to, "moved back"),
                    Retreat::PreviewClosed => debug!("preview closed"),
                    Retreat::Stayed => {}
                },
                FlowCommand::Quit => {
                    info!(position = flow.position(), "onboarding abandoned");
                    return Ok(RunOutcome::Abandoned);
                }
                FlowCommand::Continue => {
                    if let Some(record) = self.advance(&mut flow, interaction)? {
                        return Ok(RunOutcome::Completed(record));
                    }
                }
            }
        }
    }

    fn advance<I>(
        &self,
        flow: &mut OnboardingFlow<'_>,
        interaction: &mut I,
    ) -> Result<Option<ProfileRecord>, CoreError>
    where
        I: FlowInteraction + ?Sized,
    {
        loop {
            match flow.advance(self.storage) {
                Ok(Advance::Moved { from, to }) => {
                    debug!(from, to, "moved forward");
                    return Ok(None);
                }
                Ok(Advance::PreviewShown) => return Ok(None),
                Ok(Advance::Blocked(reason)) => {
                    interaction.blocked(&reason);
                    return Ok(None);
                }
                Ok(Advance::Completed(record)) => return Ok(Some(record)),
                Err(err) if err.is_retryable() => {
                    warn!(error = %err, "saving the profile failed");
                    if !interaction.persistence_failed(&err) {
                        return Err(err);
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}
