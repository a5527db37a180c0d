//! Pipeline-trigger eligibility.
//!
//! Rules are checked in order and the first match decides:
//!
//! 1. a used document is never triggerable again;
//! 2. an unusable window (malformed or inverted) is not triggerable;
//! 3. a document that is not valid and whose end date has passed is not triggerable;
//! 4. a document that is not valid and whose start date is still ahead **is**
//!    triggerable, ahead of its window;
//! 5. anything else is triggerable.
//!
//! The policy never changes `used`; the backend flips it after a successful trigger.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::constants::{LABEL_ALREADY_PROCESSED, LABEL_TRIGGER_PIPELINE};
use crate::models::Document;
use crate::validity::{Validity, ValidityState, ValidityWindow};

/// Why the trigger action is disabled for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    AlreadyProcessed,
    UnusableWindow,
    Expired,
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisabledReason::AlreadyProcessed => write!(f, "pipeline already triggered"),
            DisabledReason::UnusableWindow => write!(f, "validity window is malformed"),
            DisabledReason::Expired => write!(f, "validity window has ended"),
        }
    }
}

/// Run the decision table, reporting which rule disabled the trigger.
pub fn check_trigger(
    used: bool,
    validity: Validity,
    today: NaiveDate,
    window: Option<&ValidityWindow>,
) -> Result<(), DisabledReason> {
    if used {
        return Err(DisabledReason::AlreadyProcessed);
    }
    let Some(window) = window else {
        return Err(DisabledReason::UnusableWindow);
    };
    if !validity.is_valid() && today > window.to() {
        return Err(DisabledReason::Expired);
    }
    if !validity.is_valid() && today < window.from() {
        // Ahead of its window: still triggerable.
        return Ok(());
    }
    Ok(())
}

pub fn is_trigger_enabled(
    used: bool,
    validity: Validity,
    today: NaiveDate,
    window: Option<&ValidityWindow>,
) -> bool {
    check_trigger(used, validity, today, window).is_ok()
}

/// Label of the trigger action. Depends only on `used`.
pub fn trigger_label(used: bool) -> &'static str {
    if used {
        LABEL_ALREADY_PROCESSED
    } else {
        LABEL_TRIGGER_PIPELINE
    }
}

/// Derived trigger state for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityState {
    pub trigger_enabled: bool,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<DisabledReason>,
}

impl EligibilityState {
    pub fn for_document(document: &Document, state: &ValidityState, today: NaiveDate) -> Self {
        let window = document.window().ok();
        let decision = check_trigger(document.used, state.validity, today, window.as_ref());
        Self {
            trigger_enabled: decision.is_ok(),
            label: trigger_label(document.used),
            disabled_reason: decision.err(),
        }
    }
}
