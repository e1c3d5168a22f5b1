//! Study sessions produced by the planner.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assignment::{Assignment, Priority};
use crate::time::{minutes_to_hours, TIMESTAMP_FORMAT};

/// Kind of calendar entry. Distinguishes planned study time from
/// assignment-due markers when both are shown on one calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Study,
    Assignment,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Assignment => "assignment",
        }
    }
}

/// A block of study time for one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    #[serde(default)]
    pub id: String,
    pub assignment_id: String,
    pub assignment_title: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(with = "crate::time::timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "crate::time::timestamp")]
    pub end_time: NaiveDateTime,
    /// Length in hours.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "type", default)]
    pub kind: EntryType,
}

impl StudySession {
    /// Build a fresh, incomplete session for `assignment` over `[start, end)`.
    ///
    /// The id is a UUIDv5 of the assignment id and start time, so planning
    /// the same inputs twice yields identical sessions.
    pub fn for_assignment(
        assignment: &Assignment,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        let key = format!("{}@{}", assignment.id, start_time.format(TIMESTAMP_FORMAT));
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string(),
            assignment_id: assignment.id.clone(),
            assignment_title: assignment.title.clone(),
            course: assignment.course.clone(),
            start_time,
            end_time,
            duration: minutes_to_hours((end_time - start_time).num_minutes()),
            priority: assignment.priority,
            completed: false,
            kind: EntryType::Study,
        }
    }

    /// Half-open interval overlap with `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end_time && end > self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}
