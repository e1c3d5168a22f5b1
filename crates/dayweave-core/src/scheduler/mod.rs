//! Study-session scheduler.
//!
//! This module turns pending assignments into study sessions:
//! - Generates candidate windows inside preferred daily periods ([`SlotFinder`])
//! - Plans each assignment day by day up to its buffered deadline ([`plan_sessions_for`])
//! - Runs assignments in a caller-chosen order, threading one conflict set
//!   through the whole pass so no two sessions overlap ([`StudyScheduler`])

mod order;
mod planner;
mod preferences;
mod slots;

pub use order::PlanOrder;
pub use planner::{effective_deadline, plan_sessions_for, sessions_needed, AssignmentPlan};
pub use preferences::{PeriodRange, PreferredPeriods, SchedulingPreferences};
pub use slots::{find_slots, Slot, SlotFinder};

use planner::{plan_with_daily_load, DailyLoad};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::error::Result;
use crate::session::StudySession;

/// How much of one assignment's effort made it onto the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub assignment_id: String,
    pub assignment_title: String,
    pub sessions_needed: u32,
    pub sessions_placed: u32,
}

impl Allocation {
    pub fn shortfall(&self) -> u32 {
        self.sessions_needed.saturating_sub(self.sessions_placed)
    }
}

/// Output of one planning pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// New sessions in the order they were planned.
    pub sessions: Vec<StudySession>,
    /// One entry per planned assignment, in processing order.
    pub allocations: Vec<Allocation>,
}

impl StudyPlan {
    /// Allocations that received fewer sessions than they need.
    pub fn shortfalls(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(|a| a.shortfall() > 0)
    }

    pub fn is_complete(&self) -> bool {
        self.shortfalls().next().is_none()
    }

    pub fn sessions_for<'a>(
        &'a self,
        assignment_id: &'a str,
    ) -> impl Iterator<Item = &'a StudySession> + 'a {
        self.sessions.iter().filter(move |s| s.assignment_id == assignment_id)
    }

    pub fn allocation(&self, assignment_id: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.assignment_id == assignment_id)
    }
}

/// Planner bundling preferences and processing order.
#[derive(Debug, Clone, Default)]
pub struct StudyScheduler {
    preferences: SchedulingPreferences,
    order: PlanOrder,
}

impl StudyScheduler {
    /// Create a scheduler with default preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom preferences
    pub fn with_preferences(preferences: SchedulingPreferences) -> Self {
        Self {
            preferences,
            order: PlanOrder::default(),
        }
    }

    pub fn order(mut self, order: PlanOrder) -> Self {
        self.order = order;
        self
    }

    pub fn preferences(&self) -> &SchedulingPreferences {
        &self.preferences
    }

    /// Plan every pending assignment.
    ///
    /// # Arguments
    /// * `assignments` - All assignments; completed ones are skipped
    /// * `existing` - Sessions already on the calendar that must not be overlapped
    /// * `now` - Planning clock; day 0 of the walk
    ///
    /// # Errors
    /// Returns a validation error when the preferences fail basic numeric checks.
    pub fn generate_plan(
        &self,
        assignments: &[Assignment],
        existing: &[StudySession],
        now: NaiveDateTime,
    ) -> Result<StudyPlan> {
        self.preferences.validate()?;

        let mut pending: Vec<&Assignment> = assignments.iter().filter(|a| !a.completed).collect();
        self.order.sort(&mut pending);

        let mut conflicts = existing.to_vec();
        let mut daily_load = DailyLoad::new();
        let mut plan = StudyPlan::default();

        for assignment in pending {
            let planned =
                plan_with_daily_load(assignment, &self.preferences, &conflicts, &daily_load, now);

            plan.allocations.push(Allocation {
                assignment_id: assignment.id.clone(),
                assignment_title: assignment.title.clone(),
                sessions_needed: planned.sessions_needed,
                sessions_placed: planned.sessions_placed(),
            });
            for session in &planned.sessions {
                *daily_load.entry(session.start_time.date()).or_default() += 1;
            }
            conflicts.extend(planned.sessions.iter().cloned());
            plan.sessions.extend(planned.sessions);
        }

        tracing::debug!(
            assignments = plan.allocations.len(),
            sessions = plan.sessions.len(),
            shortfalls = plan.shortfalls().count(),
            order = %self.order,
            "study plan generated"
        );

        Ok(plan)
    }
}

/// Convenience function: plan pending assignments in the supplied order.
pub fn generate_plan(
    assignments: &[Assignment],
    preferences: &SchedulingPreferences,
    existing: &[StudySession],
    now: NaiveDateTime,
) -> Result<StudyPlan> {
    StudyScheduler::with_preferences(preferences.clone()).generate_plan(assignments, existing, now)
}
