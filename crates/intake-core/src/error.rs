use thiserror::Error;

/// Configuration errors detected while building a [`crate::Catalog`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog has no screens")]
    Empty,
    #[error("Catalog must carry exactly one preview step, found {0}")]
    PreviewCount(usize),
    #[error("Catalog must not carry a preview step, found {0}")]
    UnexpectedPreview(usize),
    #[error("Preview step is attached to screen {0}, which is not the last screen")]
    PreviewNotLast(u32),
    #[error("Last screen {0} is not a terminal screen")]
    MissingTerminal(u32),
    #[error("Terminal screen {0} must be the last screen")]
    TerminalNotLast(u32),
    #[error("Screen ids must be strictly increasing: {previous} followed by {next}")]
    IdOrder { previous: u32, next: u32 },
    #[error("Screen {0} has no options")]
    NoOptions(u32),
    #[error("Screen {screen} has an invalid entry: {reason}")]
    InvalidEntry { screen: u32, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Onboarding flow already completed")]
    FlowCompleted,
    #[error("Profile could not be saved: {0}")]
    Persistence(#[source] Box<CoreError>),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// True when the error came out of the completion hand-off and the same
    /// advance may be retried without collecting answers again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Persistence(_))
    }
}
