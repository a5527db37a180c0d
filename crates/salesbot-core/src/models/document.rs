use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{WindowError, WindowField};
use crate::validity::{parse_date, ValidityWindow};

/// A promotional PDF as stored by the admin backend.
///
/// Dates are kept as the raw strings the backend returned so that a malformed value
/// can still be listed; interpretation happens in [`crate::validity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shop_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub valid_from: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub valid_to: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub upload_date: String,
    #[serde(default)]
    pub used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_url: Option<String>,
    /// Backend's validity snapshot taken at the last upload or update. Informational.
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub page_split: bool,
}

/// Accept whatever the record holds: `null` becomes an empty string and any other
/// non-string value its JSON text, which then fails date parsing like any bad value.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Document {
    /// Parsed validity window, or why it cannot be evaluated.
    pub fn window(&self) -> Result<ValidityWindow, WindowError> {
        ValidityWindow::parse(&self.valid_from, &self.valid_to)
    }

    /// Parsed end date alone. Sorting and near-expiry only need this end.
    pub fn valid_to_date(&self) -> Option<chrono::NaiveDate> {
        parse_date(WindowField::ValidTo, &self.valid_to).ok()
    }

    /// Calendar-day part of `upload_date` (`YYYY-MM-DD HH:MM:SS` on the wire).
    pub fn upload_day(&self) -> &str {
        match self.upload_date.get(..10) {
            Some(day) if parse_date(WindowField::ValidFrom, day).is_ok() => day,
            _ => &self.upload_date,
        }
    }
}
