//! Application-wide constants.

/// Wire format of `valid_from` / `valid_to`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A document is near expiry when its end date is at most this many whole days away.
/// There is no lower bound: already-expired documents are near expiry too.
pub const NEAR_EXPIRY_DAYS: i64 = 2;

/// Action label for a document whose pipeline has already run.
pub const LABEL_ALREADY_PROCESSED: &str = "Already Processed";

/// Action label for a document whose pipeline has not run yet.
pub const LABEL_TRIGGER_PIPELINE: &str = "Trigger Pipeline";

/// Default backend address of the admin API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
