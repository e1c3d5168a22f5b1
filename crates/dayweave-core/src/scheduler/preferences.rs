//! User scheduling preferences.
//!
//! Passed wholesale into every planning call. The planner never reads
//! ambient configuration; callers load a [`SchedulingPreferences`] from
//! [`crate::Config`] or build one directly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::hours_to_minutes;

const HOURS_PER_DAY: f64 = 24.0;

/// Hour-of-day half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: u32,
    pub end: u32,
}

impl PeriodRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether `minute_of_day` (0..1440) falls inside the period.
    pub fn contains_minute(&self, minute_of_day: i64) -> bool {
        minute_of_day >= i64::from(self.start) * 60 && minute_of_day < i64::from(self.end) * 60
    }
}

/// Named preferred periods in enumeration order.
pub type PreferredPeriods = IndexMap<String, PeriodRange>;

/// Preferences driving slot generation and daily load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPreferences {
    /// Session length in hours.
    #[serde(default = "default_session_length")]
    pub session_length: f64,
    /// Break between consecutive sessions of one period, in hours.
    #[serde(default = "default_break_length")]
    pub break_length: f64,
    #[serde(default = "default_max_sessions_per_day")]
    pub max_sessions_per_day: u32,
    #[serde(default)]
    pub avoid_weekends: bool,
    /// Days subtracted from each due date to form the effective deadline.
    #[serde(default = "default_buffer_days")]
    pub buffer_days: u32,
    /// Reject windows that start before the planning clock.
    #[serde(default)]
    pub skip_elapsed_slots: bool,
    #[serde(default = "default_preferred_periods")]
    pub preferred_periods: PreferredPeriods,
}

fn default_session_length() -> f64 {
    2.0
}
fn default_break_length() -> f64 {
    0.5
}
fn default_max_sessions_per_day() -> u32 {
    4
}
fn default_buffer_days() -> u32 {
    1
}
fn default_preferred_periods() -> PreferredPeriods {
    let mut periods = IndexMap::new();
    periods.insert("morning".to_string(), PeriodRange::new(9, 12));
    periods.insert("afternoon".to_string(), PeriodRange::new(14, 17));
    periods.insert("evening".to_string(), PeriodRange::new(19, 22));
    periods
}

impl Default for SchedulingPreferences {
    fn default() -> Self {
        Self {
            session_length: default_session_length(),
            break_length: default_break_length(),
            max_sessions_per_day: default_max_sessions_per_day(),
            avoid_weekends: false,
            buffer_days: default_buffer_days(),
            skip_elapsed_slots: false,
            preferred_periods: default_preferred_periods(),
        }
    }
}

impl SchedulingPreferences {
    pub fn with_session_length(mut self, hours: f64) -> Self {
        self.session_length = hours;
        self
    }

    pub fn with_break_length(mut self, hours: f64) -> Self {
        self.break_length = hours;
        self
    }

    pub fn with_max_sessions_per_day(mut self, max: u32) -> Self {
        self.max_sessions_per_day = max;
        self
    }

    pub fn with_avoid_weekends(mut self, avoid: bool) -> Self {
        self.avoid_weekends = avoid;
        self
    }

    pub fn with_buffer_days(mut self, days: u32) -> Self {
        self.buffer_days = days;
        self
    }

    pub fn with_skip_elapsed_slots(mut self, skip: bool) -> Self {
        self.skip_elapsed_slots = skip;
        self
    }

    /// Replace all periods, keeping the given order.
    pub fn with_periods<I, S>(mut self, periods: I) -> Self
    where
        I: IntoIterator<Item = (S, PeriodRange)>,
        S: Into<String>,
    {
        self.preferred_periods = periods
            .into_iter()
            .map(|(name, range)| (name.into(), range))
            .collect();
        self
    }

    pub fn session_minutes(&self) -> i64 {
        hours_to_minutes(self.session_length)
    }

    pub fn break_minutes(&self) -> i64 {
        hours_to_minutes(self.break_length)
    }

    /// Whether `minute_of_day` lies inside any preferred period.
    pub fn in_preferred_period(&self, minute_of_day: i64) -> bool {
        self.preferred_periods.values().any(|range| range.contains_minute(minute_of_day))
    }

    /// Basic numeric validity.
    ///
    /// Periods with `start >= end` are accepted and simply produce no slots.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.session_length.is_finite()
            || self.session_minutes() < 1
            || self.session_length > HOURS_PER_DAY
        {
            return Err(ValidationError::invalid(
                "sessionLength",
                format!(
                    "must be between one minute and 24 hours, got {} hours",
                    self.session_length
                ),
            ));
        }
        if !self.break_length.is_finite()
            || self.break_length < 0.0
            || self.break_length > HOURS_PER_DAY
        {
            return Err(ValidationError::invalid(
                "breakLength",
                format!("must be between 0 and 24 hours, got {} hours", self.break_length),
            ));
        }
        if self.max_sessions_per_day == 0 {
            return Err(ValidationError::invalid("maxSessionsPerDay", "must be at least 1"));
        }
        let overlong = self.preferred_periods.iter().find(|(_, range)| range.end > 24);
        if let Some((name, range)) = overlong {
            return Err(ValidationError::invalid(
                "preferredPeriods",
                format!("period '{name}' ends at hour {}, past the end of the day", range.end),
            ));
        }
        Ok(())
    }
}
