//! intake-core
//!
//! Onboarding flow engine: catalog validation, answer accumulation,
//! navigation, forward-progress gates, and completion hand-off.
//! Depends on intake-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod answers;
pub mod catalog;
pub mod completion;
pub mod error;
pub mod flow;
pub mod navigation;
pub mod standard;
pub mod storage;
pub mod validators;


pub use answers::AnswerStore;
pub use catalog::Catalog;
pub use completion::CompletionHandler;
pub use error::{CatalogError, CoreError};
pub use flow::{Advance, FlowView, InputEvent, OnboardingFlow};
pub use navigation::{Forward, NavState, Navigator, Retreat};
pub use standard::standard_catalog;
pub use storage::ProfileStorage;
pub use validators::BlockReason;
