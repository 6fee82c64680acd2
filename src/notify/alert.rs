//! Pure alert planning over resolved schedule state

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::resolver::{class_just_started, class_starting_soon};
use crate::types::{ScheduleEntry, Weekday};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// The class window has just opened.
    Started,
    /// The class starts within the lead window.
    StartingSoon,
}

/// Deduplication key for one notification.
///
/// A notification for a given key fires at most once until the key changes;
/// the key covers the class *and* the kind, so the "starting soon" and
/// "started" alerts for the same class are distinct events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertKey {
    pub weekday: Weekday,
    pub period: u8,
    pub kind: AlertKind,
}

/// A planned notification, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Deduplication key.
    pub key: AlertKey,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

/// Lead and grace windows for alert planning, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPolicy {
    /// How far ahead a "starting soon" alert may look.
    pub lead_minutes: u16,
    /// How long after the bell a "started" alert is still worth sending.
    pub grace_minutes: u16,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self { lead_minutes: 5, grace_minutes: 1 }
    }
}

/// Plan the notification warranted at this instant, if any.
///
/// A just-started class outranks an upcoming one; both lookups are pure and
/// the function never errors. Deduplication is the caller's job; see
/// [`ClassAlerts`](super::ClassAlerts).
pub fn plan_alert(
    entries: &[ScheduleEntry],
    now: NaiveDateTime,
    policy: AlertPolicy,
) -> Option<Alert> {
    if let Some(entry) = class_just_started(entries, now, policy.grace_minutes) {
        return Some(Alert {
            key: AlertKey { weekday: entry.weekday, period: entry.period, kind: AlertKind::Started },
            title: "Class has started".to_string(),
            body: format!("Period {} · {}", entry.period, entry.subject),
        });
    }

    let (minutes_until, entry) = class_starting_soon(entries, now, policy.lead_minutes)?;
    Some(Alert {
        key: AlertKey {
            weekday: entry.weekday,
            period: entry.period,
            kind: AlertKind::StartingSoon,
        },
        title: "Class starting soon".to_string(),
        body: format!(
            "Period {} · {} in {} min",
            entry.period, entry.subject, minutes_until
        ),
    })
}
