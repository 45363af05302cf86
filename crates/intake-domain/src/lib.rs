//! intake-domain
//!
//! Pure data models for the onboarding flow (screens, answers, profile record).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod answer;
pub mod profile;
pub mod screen;

pub use answer::*;
pub use profile::*;
pub use screen::*;
