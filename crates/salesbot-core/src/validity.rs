//! Validity evaluation for promotional documents.
//!
//! A document is valid on every day of its inclusive window `[valid_from, valid_to]`.
//! Windows that cannot be evaluated (malformed dates, or a start after the end) are
//! classified as [`Validity::Expired`] so that nothing downstream treats them as live.
//!
//! Near-expiry is orthogonal to the classification: it only looks at how many whole
//! days remain until `valid_to`, and a negative count (already expired) also counts.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::constants::{DATE_FORMAT, NEAR_EXPIRY_DAYS};
use crate::error::{WindowError, WindowField};

/// Position of a date relative to a validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Expired,
    NotYetValid,
    Valid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Expired => write!(f, "Expired"),
            Validity::NotYetValid => write!(f, "Not yet valid"),
            Validity::Valid => write!(f, "Valid"),
        }
    }
}

/// Derived state of a document for one reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityState {
    pub validity: Validity,
    pub near_expiry: bool,
}

/// A well-formed inclusive date window with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl ValidityWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, WindowError> {
        if from > to {
            return Err(WindowError::InvertedWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Parse both ends from their `YYYY-MM-DD` wire form.
    pub fn parse(valid_from: &str, valid_to: &str) -> Result<Self, WindowError> {
        let from = parse_date(WindowField::ValidFrom, valid_from)?;
        let to = parse_date(WindowField::ValidTo, valid_to)?;
        Self::new(from, to)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Classify `today` against the window. Both ends are inclusive.
    pub fn classify(&self, today: NaiveDate) -> Validity {
        if today < self.from {
            Validity::NotYetValid
        } else if today > self.to {
            Validity::Expired
        } else {
            Validity::Valid
        }
    }
}

/// Parse a `YYYY-MM-DD` date, attributing failures to `field`.
pub fn parse_date(field: WindowField, value: &str) -> Result<NaiveDate, WindowError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| WindowError::MalformedDate {
        field,
        value: value.to_string(),
    })
}

/// Whole days from `today` until `valid_to`; negative once the date has passed.
pub fn days_until(valid_to: NaiveDate, today: NaiveDate) -> i64 {
    (valid_to - today).num_days()
}

pub fn is_near_expiry(valid_to: NaiveDate, today: NaiveDate) -> bool {
    days_until(valid_to, today) <= NEAR_EXPIRY_DAYS
}

/// Evaluate a raw window against `today`.
///
/// Never fails: an unusable window yields [`Validity::Expired`]. `near_expiry` is still
/// computed whenever `valid_to` alone parses, and is `false` when it does not.
pub fn evaluate(valid_from: &str, valid_to: &str, today: NaiveDate) -> ValidityState {
    let validity = match ValidityWindow::parse(valid_from, valid_to) {
        Ok(window) => window.classify(today),
        Err(err) => {
            tracing::debug!(error = %err, "Unusable validity window, treating as expired");
            Validity::Expired
        }
    };

    let near_expiry = parse_date(WindowField::ValidTo, valid_to)
        .map(|to| is_near_expiry(to, today))
        .unwrap_or(false);

    ValidityState {
        validity,
        near_expiry,
    }
}
