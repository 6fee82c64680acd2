//! Schedule dataset loading and validation
//!
//! The dataset is a JSON array of [`ScheduleEntry`] records, loaded once at
//! startup and immutable afterwards. Loading is the only place this crate
//! performs I/O on its own behalf.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::types::{PERIOD_COUNT, ScheduleEntry};

/// Load and validate a schedule dataset from a JSON file.
///
/// An empty array is a valid dataset: every lookup over it resolves to
/// "no class", which the presentation layer must treat as a normal state.
///
/// # Errors
///
/// - `File` when the path cannot be read
/// - `Parse` when the contents are not a JSON array of entries
/// - `Dataset` when entries are out of range or duplicated
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<ScheduleEntry>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ScheduleError::file_error(path.to_path_buf(), e))?;

    let entries = parse_entries(&raw)
        .map_err(|e| match e {
            ScheduleError::Parse { details, .. } => {
                ScheduleError::parse_error(path.display().to_string(), details)
            }
            other => other,
        })?;

    debug!("Loaded {} schedule entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse a schedule dataset from a JSON string and validate it.
pub fn parse_entries(json: &str) -> Result<Vec<ScheduleEntry>> {
    let entries: Vec<ScheduleEntry> = serde_json::from_str(json)
        .map_err(|e| ScheduleError::parse_error("schedule dataset", e.to_string()))?;
    validate_entries(&entries)?;
    Ok(entries)
}

/// Validate dataset invariants: period range and `(weekday, period)` uniqueness.
///
/// A malformed display `time_range` is only warned about; the fixed window
/// tables are authoritative for classification, so a cosmetic mismatch cannot
/// corrupt resolution.
pub fn validate_entries(entries: &[ScheduleEntry]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();

    for entry in entries {
        if entry.period < 1 || entry.period > PERIOD_COUNT {
            return Err(ScheduleError::dataset_error(format!(
                "period {} out of range 1..={} for {} {}",
                entry.period, PERIOD_COUNT, entry.weekday, entry.subject
            )));
        }

        if !seen.insert((entry.weekday, entry.period)) {
            return Err(ScheduleError::dataset_error(format!(
                "duplicate entry for {} period {}",
                entry.weekday, entry.period
            )));
        }

        if !looks_like_time_range(&entry.time_range) {
            warn!(
                "Entry {} period {} has unusual time range {:?}",
                entry.weekday, entry.period, entry.time_range
            );
        }
    }

    Ok(())
}

fn looks_like_time_range(range: &str) -> bool {
    let mut parts = range.splitn(2, '-');
    let (Some(start), Some(end)) = (parts.next(), parts.next()) else {
        return false;
    };
    looks_like_time(start) && looks_like_time(end)
}

fn looks_like_time(time: &str) -> bool {
    let mut parts = time.splitn(2, ':');
    matches!(
        (parts.next(), parts.next()),
        (Some(h), Some(m))
            if h.len() == 2 && m.len() == 2
                && h.chars().all(|c| c.is_ascii_digit())
                && m.chars().all(|c| c.is_ascii_digit())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Weekday;

    #[test]
    fn parses_the_documented_schema() {
        let json = r#"[
            {"weekday": "Mon", "period": 1, "timeRange": "08:10-09:00", "subject": "Math"},
            {"weekday": "Tue", "period": 2, "timeRange": "09:10-10:00", "subject": "Physics"}
        ]"#;

        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].weekday, Weekday::Mon);
        assert_eq!(entries[1].time_range, "09:10-10:00");
    }

    #[test]
    fn empty_array_is_a_valid_dataset() {
        assert!(parse_entries("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_payloads() {
        let err = parse_entries(r#"{"weekday": "Mon"}"#).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { .. }));
    }

    #[test]
    fn rejects_duplicate_weekday_period_pairs() {
        let json = r#"[
            {"weekday": "Mon", "period": 1, "timeRange": "08:10-09:00", "subject": "Math"},
            {"weekday": "Mon", "period": 1, "timeRange": "08:10-09:00", "subject": "Art"}
        ]"#;

        let err = parse_entries(json).unwrap_err();
        assert!(matches!(err, ScheduleError::Dataset { .. }));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_out_of_range_periods() {
        let json = r#"[{"weekday": "Fri", "period": 9, "timeRange": "17:00-17:50", "subject": "Club"}]"#;
        let err = parse_entries(json).unwrap_err();
        assert!(matches!(err, ScheduleError::Dataset { .. }));
    }

    #[test]
    fn load_reports_missing_files_with_path() {
        let err = load_entries("/nonexistent/schedule.json").unwrap_err();
        match err {
            ScheduleError::File { path, .. } => {
                assert_eq!(path, std::path::PathBuf::from("/nonexistent/schedule.json"));
            }
            other => panic!("expected File error, got {other:?}"),
        }
    }

    #[test]
    fn load_round_trips_through_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(
            &path,
            r#"[{"weekday": "Wed", "period": 3, "timeRange": "10:10-11:00", "subject": "Chemistry"}]"#,
        )
        .unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "Chemistry");
    }

    #[test]
    fn time_range_shape_check() {
        assert!(looks_like_time_range("08:10-09:00"));
        assert!(!looks_like_time_range("8:10-9:00"));
        assert!(!looks_like_time_range("morning"));
    }
}
