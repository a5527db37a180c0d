//! Salesbot Core Library
//!
//! This crate provides the domain models, validity and eligibility rules, list
//! presentation, error types and configuration shared by the salesbot admin client
//! and CLI. Everything that decides how a promotional PDF is shown or whether its
//! pipeline may be triggered lives here and performs no I/O.

pub mod actions;
pub mod clock;
pub mod config;
pub mod constants;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod presenter;
pub mod source;
pub mod validation;
pub mod validity;

// Re-export commonly used types
pub use actions::DocumentAction;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ClientConfig;
pub use eligibility::{is_trigger_enabled, DisabledReason, EligibilityState};
pub use error::{AppError, ErrorMetadata, LogLevel, WindowError, WindowField};
pub use presenter::{present, AnnotatedDocument, ListOrder};
pub use source::{fetch_and_present, DocumentSource, SnapshotSource};
pub use validity::{evaluate, Validity, ValidityState, ValidityWindow};
