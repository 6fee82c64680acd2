//! Error types for timetable processing.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context. Two families of conditions are deliberately *not* errors:
//!
//! - **Data absence**: no entry, period or weekday matching a lookup. The
//!   resolver represents these as `None`; weekends, gaps between periods and
//!   after-hours are legitimate states, not failures.
//! - **Permission denial**: the user declining notification permission is a
//!   [`Permission`](crate::notify::Permission) value, never an `Err`.
//!
//! What remains is dataset loading (`File`, `Parse`, `Dataset`), missing host
//! capabilities (`Capability`) and timeouts on host-driven operations.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for timetable operations.
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;

/// Main error type for timetable operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("schedule dataset error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("invalid schedule dataset: {reason}")]
    Dataset { reason: String },

    #[error("{feature} is not available in this host environment")]
    Capability { feature: String },

    #[error("operation timed out after {duration:?}")]
    Timeout { duration: Duration },
}

impl ScheduleError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Dataset problems are permanent until the input changes; a timeout on a
    /// host-driven operation (install prompt, notification dispatch) may
    /// succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScheduleError::Timeout { .. } => true,
            ScheduleError::File { .. } => false,
            ScheduleError::Parse { .. } => false,
            ScheduleError::Dataset { .. } => false,
            ScheduleError::Capability { .. } => false,
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ScheduleError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        ScheduleError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for dataset validation errors.
    pub fn dataset_error(reason: impl Into<String>) -> Self {
        ScheduleError::Dataset { reason: reason.into() }
    }

    /// Helper constructor for missing host capabilities.
    pub fn capability_unavailable(feature: impl Into<String>) -> Self {
        ScheduleError::Capability { feature: feature.into() }
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn error_constructors_validation() {
        let file_error = ScheduleError::file_error(
            PathBuf::from("/schedule.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );
        assert!(matches!(file_error, ScheduleError::File { .. }));

        let parse_error = ScheduleError::parse_error("schedule.json", "expected array");
        assert!(matches!(parse_error, ScheduleError::Parse { .. }));

        let dataset_error = ScheduleError::dataset_error("duplicate entry");
        assert!(matches!(dataset_error, ScheduleError::Dataset { .. }));
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: ScheduleError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<ScheduleError>();

        let error = ScheduleError::capability_unavailable("notifications");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn retryable_classification() {
        assert!(ScheduleError::Timeout { duration: Duration::from_secs(5) }.is_retryable());
        assert!(!ScheduleError::dataset_error("dup").is_retryable());
        assert!(!ScheduleError::capability_unavailable("install prompt").is_retryable());
    }

    #[test]
    fn from_io_error_works() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dataset");
        let err: ScheduleError = io_err.into();
        match err {
            ScheduleError::File { source, .. } => {
                assert_eq!(source.to_string(), "missing dataset");
            }
            _ => panic!("expected File error variant"),
        }
    }

    proptest! {
        #[test]
        fn error_messages_contain_their_context(
            context in "[a-zA-Z0-9_./ ]+",
            details in "[a-zA-Z0-9_./ ]+",
            feature in "[a-zA-Z ]+"
        ) {
            let parse = ScheduleError::parse_error(context.clone(), details.clone());
            let msg = parse.to_string();
            prop_assert!(msg.contains(&context));
            prop_assert!(msg.contains(&details));

            let capability = ScheduleError::capability_unavailable(feature.clone());
            prop_assert!(capability.to_string().contains(&feature));

            let dataset = ScheduleError::dataset_error(details.clone());
            prop_assert!(dataset.to_string().contains(&details));
        }
    }
}
