//! Ordered, annotated view of the document list.
//!
//! [`present`] reads the clock once and evaluates every document against that single
//! date, so one rendered list never mixes two different "todays". Nothing is cached:
//! each call recomputes the whole view from the snapshot it is given.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::Clock;
use crate::eligibility::{DisabledReason, EligibilityState};
use crate::error::AppError;
use crate::models::Document;
use crate::validity::{evaluate, Validity};

/// Ordering of the list by `valid_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Soonest-expiring first.
    Ascending,
    /// Most-future expiry first.
    #[default]
    Descending,
}

impl FromStr for ListOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(ListOrder::Ascending),
            "desc" | "descending" => Ok(ListOrder::Descending),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid list order: {} (expected asc or desc)",
                s
            ))),
        }
    }
}

impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOrder::Ascending => write!(f, "asc"),
            ListOrder::Descending => write!(f, "desc"),
        }
    }
}

/// A document together with everything derived from it for one reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedDocument {
    #[serde(flatten)]
    pub document: Document,
    pub validity: Validity,
    pub near_expiry: bool,
    pub trigger_enabled: bool,
    pub trigger_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<DisabledReason>,
}

/// Annotate a single document for `today`.
pub fn annotate(document: &Document, today: NaiveDate) -> AnnotatedDocument {
    let state = evaluate(&document.valid_from, &document.valid_to, today);
    let eligibility = EligibilityState::for_document(document, &state, today);

    AnnotatedDocument {
        document: document.clone(),
        validity: state.validity,
        near_expiry: state.near_expiry,
        trigger_enabled: eligibility.trigger_enabled,
        trigger_label: eligibility.label,
        disabled_reason: eligibility.disabled_reason,
    }
}

/// Compare two end dates for `order`. Unparseable end dates go last in either order.
fn compare_valid_to(a: Option<NaiveDate>, b: Option<NaiveDate>, order: ListOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            ListOrder::Ascending => a.cmp(&b),
            ListOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Produce the ordered, annotated list for the date `clock` reports.
///
/// The sort is stable: documents with the same `valid_to` keep their input order.
pub fn present<C: Clock + ?Sized>(
    documents: &[Document],
    clock: &C,
    order: ListOrder,
) -> Vec<AnnotatedDocument> {
    let today = clock.today();

    let mut keyed: Vec<(Option<NaiveDate>, AnnotatedDocument)> = documents
        .iter()
        .map(|doc| (doc.valid_to_date(), annotate(doc, today)))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_valid_to(*a, *b, order));

    tracing::debug!(
        count = keyed.len(),
        %today,
        %order,
        "Presented document list"
    );

    keyed.into_iter().map(|(_, row)| row).collect()
}
