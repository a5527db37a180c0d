//! Clock abstraction for date-dependent decisions.
//!
//! Validity and eligibility depend on "today". Production code injects
//! [`SystemClock`]; tests and the CLI `--today` override inject a [`FixedClock`].

use chrono::{NaiveDate, Utc};
use std::fmt;

/// Source of the current calendar date.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in UTC, matching the backend's own validity snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
