use intake_domain::ProfileRecord;

use crate::CoreError;

/// Persistence collaborator that receives the finished profile. Storage
/// semantics are opaque to the engine.
pub trait ProfileStorage: Send + Sync {
    fn persist_profile(&self, record: &ProfileRecord) -> Result<(), CoreError>;
    fn mark_flow_complete(&self) -> Result<(), CoreError>;
    /// Removes a profile written by `persist_profile` whose completion marker
    /// could not be recorded.
    fn discard_profile(&self) -> Result<(), CoreError>;
    fn load_profile(&self) -> Result<Option<ProfileRecord>, CoreError>;
    fn is_flow_complete(&self) -> Result<bool, CoreError>;
}
