use intake_domain::ProfileRecord;
use tracing::{info, warn};

use crate::{answers::AnswerStore, storage::ProfileStorage, CoreError};

/// Turns the answer store into a profile and records it together with the
/// completion marker.
pub struct CompletionHandler<'s> {
    storage: &'s dyn ProfileStorage,
}

impl<'s> CompletionHandler<'s> {
    pub fn new(storage: &'s dyn ProfileStorage) -> Self {
        Self { storage }
    }

    /// Records the profile and the completion marker, or neither. The answer
    /// store is only read, so a failed call can be repeated as is.
    pub fn complete(&self, answers: &AnswerStore) -> Result<ProfileRecord, CoreError> {
        let record = ProfileRecord::new(answers.snapshot());

        if let Err(err) = self.storage.persist_profile(&record) {
            warn!(profile = %record.id, error = %err, "persisting profile failed");
            return Err(CoreError::Persistence(Box::new(err)));
        }

        if let Err(err) = self.storage.mark_flow_complete() {
            warn!(profile = %record.id, error = %err, "recording completion failed");
            if let Err(rollback) = self.storage.discard_profile() {
                warn!(profile = %record.id, error = %rollback, "discarding profile failed");
            }
            return Err(CoreError::Persistence(Box::new(err)));
        }

        info!(profile = %record.id, answers = record.answers.len(), "onboarding completed");
        Ok(record)
    }
}
