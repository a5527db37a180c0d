//! Outbound action requests.
//!
//! The core never executes actions. It builds them from validated input and refuses
//! to build a pipeline trigger for a row the presenter marked as disabled.

use crate::error::AppError;
use crate::models::UpdateForm;
use crate::presenter::AnnotatedDocument;
use crate::validation::{validate_filename, validate_update_form};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAction {
    /// Replace shop name and validity window, optionally the file.
    Update(UpdateForm),
    Delete { filename: String },
    TriggerPipeline { filename: String },
}

impl DocumentAction {
    pub fn update(form: UpdateForm) -> Result<Self, AppError> {
        Ok(DocumentAction::Update(validate_update_form(&form)?))
    }

    pub fn delete(filename: &str) -> Result<Self, AppError> {
        validate_filename(filename)?;
        Ok(DocumentAction::Delete {
            filename: filename.to_string(),
        })
    }

    /// Build a trigger request for a presented row, if the row allows it.
    pub fn trigger(row: &AnnotatedDocument) -> Result<Self, AppError> {
        if !row.trigger_enabled {
            let reason = row
                .disabled_reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "not eligible".to_string());
            return Err(AppError::TriggerDisabled {
                filename: row.document.filename.clone(),
                reason,
            });
        }
        Ok(DocumentAction::TriggerPipeline {
            filename: row.document.filename.clone(),
        })
    }

    /// Look the row up by filename in a presented list, then build the trigger.
    pub fn trigger_in(rows: &[AnnotatedDocument], filename: &str) -> Result<Self, AppError> {
        let row = rows
            .iter()
            .find(|r| r.document.filename == filename)
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", filename)))?;
        Self::trigger(row)
    }

    pub fn filename(&self) -> &str {
        match self {
            DocumentAction::Update(form) => &form.filename,
            DocumentAction::Delete { filename } | DocumentAction::TriggerPipeline { filename } => {
                filename
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::Document;
    use crate::presenter::{present, ListOrder};
    use chrono::NaiveDate;

    fn doc(filename: &str, valid_from: &str, valid_to: &str, used: bool) -> Document {
        Document {
            filename: filename.to_string(),
            shop_name: "Tesco Supermarket".to_string(),
            valid_from: valid_from.to_string(),
            valid_to: valid_to.to_string(),
            upload_date: String::new(),
            used,
            s3_url: None,
            valid: true,
            page_split: false,
        }
    }

    fn rows() -> Vec<AnnotatedDocument> {
        let docs = vec![
            doc("live.pdf", "2024-01-01", "2024-01-10", false),
            doc("old.pdf", "2023-12-01", "2023-12-07", false),
            doc("done.pdf", "2024-01-01", "2024-01-10", true),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        present(&docs, &FixedClock(today), ListOrder::Descending)
    }

    #[test]
    fn test_trigger_enabled_row() {
        let action = DocumentAction::trigger_in(&rows(), "live.pdf").unwrap();
        assert_eq!(
            action,
            DocumentAction::TriggerPipeline {
                filename: "live.pdf".to_string()
            }
        );
        assert_eq!(action.filename(), "live.pdf");
    }

    #[test]
    fn test_trigger_refused_for_disabled_rows() {
        let rows = rows();
        match DocumentAction::trigger_in(&rows, "done.pdf") {
            Err(AppError::TriggerDisabled { filename, reason }) => {
                assert_eq!(filename, "done.pdf");
                assert_eq!(reason, "pipeline already triggered");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            DocumentAction::trigger_in(&rows, "old.pdf"),
            Err(AppError::TriggerDisabled { .. })
        ));
    }

    #[test]
    fn test_trigger_unknown_filename() {
        assert!(matches!(
            DocumentAction::trigger_in(&rows(), "missing.pdf"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_and_update_are_validated() {
        assert!(DocumentAction::delete("old.pdf").is_ok());
        assert!(DocumentAction::delete("").is_err());

        let form = UpdateForm {
            filename: "live.pdf".to_string(),
            shop_name: String::new(),
            valid_from: "2024-01-01".to_string(),
            valid_to: "2024-01-10".to_string(),
            file: None,
        };
        assert!(DocumentAction::update(form).is_err());
    }
}
