//! Read-side queries over planned sessions and assignments.
//!
//! Powers the "today", "upcoming" and calendar-day views. Pure functions
//! over borrowed slices; nothing here changes a plan.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::assignment::{Assignment, Priority};
use crate::session::{EntryType, StudySession};

/// Number of sessions the upcoming view shows by default.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Sessions starting on `date`, earliest first.
pub fn sessions_on(sessions: &[StudySession], date: NaiveDate) -> Vec<&StudySession> {
    let mut on_day: Vec<_> = sessions.iter().filter(|s| s.start_time.date() == date).collect();
    on_day.sort_by_key(|s| s.start_time);
    on_day
}

/// Sessions starting at or after `now`, earliest first, at most `limit`.
pub fn upcoming_sessions(
    sessions: &[StudySession],
    now: NaiveDateTime,
    limit: usize,
) -> Vec<&StudySession> {
    let mut upcoming: Vec<_> = sessions.iter().filter(|s| s.start_time >= now).collect();
    upcoming.sort_by_key(|s| s.start_time);
    upcoming.truncate(limit);
    upcoming
}

/// One row of a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub assignment_id: String,
    pub title: String,
    pub course: Option<String>,
    /// Due time for assignments, start time for sessions.
    #[serde(with = "crate::time::timestamp")]
    pub at: NaiveDateTime,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_timestamp"
    )]
    pub end: Option<NaiveDateTime>,
    pub priority: Priority,
    pub completed: bool,
}

impl From<&Assignment> for CalendarEntry {
    fn from(assignment: &Assignment) -> Self {
        Self {
            kind: EntryType::Assignment,
            assignment_id: assignment.id.clone(),
            title: assignment.title.clone(),
            course: assignment.course.clone(),
            at: assignment.due_date,
            end: None,
            priority: assignment.priority,
            completed: assignment.completed,
        }
    }
}

impl From<&StudySession> for CalendarEntry {
    fn from(session: &StudySession) -> Self {
        Self {
            kind: session.kind,
            assignment_id: session.assignment_id.clone(),
            title: session.assignment_title.clone(),
            course: session.course.clone(),
            at: session.start_time,
            end: Some(session.end_time),
            priority: session.priority,
            completed: session.completed,
        }
    }
}

/// Everything shown on `date`: assignments due that day, then study sessions
/// starting that day. Each group keeps time order.
pub fn entries_on(
    date: NaiveDate,
    assignments: &[Assignment],
    sessions: &[StudySession],
) -> Vec<CalendarEntry> {
    let mut due: Vec<_> = assignments.iter().filter(|a| a.due_date.date() == date).collect();
    due.sort_by_key(|a| a.due_date);

    due.into_iter()
        .map(CalendarEntry::from)
        .chain(sessions_on(sessions, date).into_iter().map(CalendarEntry::from))
        .collect()
}

fn serialize_optional_timestamp<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(instant) => crate::time::timestamp::serialize(instant, serializer),
        None => serializer.serialize_none(),
    }
}
