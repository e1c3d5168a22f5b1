//! Assignment records as supplied by the assignment-management side.
//!
//! The planner never mutates assignments. Deserialization is lenient about
//! the optional fields because records arrive from hand-written forms and
//! course-management exports alike.

use chrono::NaiveDateTime;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::ceil_days_between;

/// Effort assumed when an assignment carries no usable estimate.
pub const DEFAULT_ESTIMATED_HOURS: f64 = 2.0;

/// Informational priority tag. Copied onto sessions; never affects placement
/// unless the caller asks for [`crate::PlanOrder::Priority`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort weight, higher is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// A piece of coursework with a due date and an effort estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(with = "crate::time::timestamp")]
    pub due_date: NaiveDateTime,
    /// Raw estimate; use [`Assignment::effort_hours`] for planning.
    #[serde(default, deserialize_with = "lenient_hours", skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Assignment {
    /// Create a pending medium-priority assignment without an estimate.
    pub fn new(id: impl Into<String>, title: impl Into<String>, due_date: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            course: None,
            due_date,
            estimated_hours: None,
            priority: Priority::default(),
            completed: false,
        }
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Effort in hours, falling back to [`DEFAULT_ESTIMATED_HOURS`] when the
    /// estimate is missing, non-finite, zero or negative.
    pub fn effort_hours(&self) -> f64 {
        match self.estimated_hours {
            Some(hours) if hours.is_finite() && hours > 0.0 => hours,
            _ => DEFAULT_ESTIMATED_HOURS,
        }
    }

    /// Pending and already past its due date.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_date < now
    }

    /// Days until due, rounded up. Zero or negative once the due date has passed.
    pub fn days_until_due(&self, now: NaiveDateTime) -> i64 {
        ceil_days_between(now, self.due_date)
    }
}

fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHours {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match RawHours::deserialize(deserializer)? {
        RawHours::Number(hours) => Some(hours),
        RawHours::Text(text) => text.trim().parse().ok(),
        RawHours::Other(_) => None,
    })
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label
        .as_deref()
        .and_then(Priority::from_label)
        .unwrap_or_default())
}
