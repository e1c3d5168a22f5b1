//! Per-assignment session planning.
//!
//! Walks forward one day at a time from the planning clock, asking the slot
//! finder for windows until the assignment's session count is met or the
//! effective deadline passes.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::preferences::SchedulingPreferences;
use super::slots::SlotFinder;
use crate::assignment::Assignment;
use crate::session::StudySession;
use crate::time::{ceil_days_between, ceil_div, is_weekend};

/// Sessions already planned per day in the current run.
pub(crate) type DailyLoad = HashMap<NaiveDate, usize>;

/// Sessions planned for one assignment, with the count it needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPlan {
    pub assignment_id: String,
    pub sessions_needed: u32,
    pub sessions: Vec<StudySession>,
}

impl AssignmentPlan {
    pub fn sessions_placed(&self) -> u32 {
        u32::try_from(self.sessions.len()).unwrap_or(u32::MAX)
    }

    /// Sessions that could not be placed before the deadline.
    pub fn shortfall(&self) -> u32 {
        self.sessions_needed.saturating_sub(self.sessions_placed())
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// `ceil(effort / sessionLength)`, saturating at `u32::MAX`.
///
/// Any positive effort needs at least one session.
pub fn sessions_needed(assignment: &Assignment, preferences: &SchedulingPreferences) -> u32 {
    let session = preferences.session_length;
    if !session.is_finite() || session <= 0.0 {
        return 0;
    }
    let needed = (assignment.effort_hours() / session).ceil();
    needed.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Due date minus buffer days.
pub fn effective_deadline(
    assignment: &Assignment,
    preferences: &SchedulingPreferences,
) -> NaiveDateTime {
    assignment.due_date - Duration::days(i64::from(preferences.buffer_days))
}

/// Plan study sessions for `assignment`, avoiding everything in `occupied`.
///
/// Sessions created here join the conflict set as they are placed, so they
/// never collide with each other. `occupied` only blocks time; it does not
/// count against `maxSessionsPerDay`. Fewer sessions than needed is a valid
/// outcome; see [`AssignmentPlan::shortfall`].
pub fn plan_sessions_for(
    assignment: &Assignment,
    preferences: &SchedulingPreferences,
    occupied: &[StudySession],
    now: NaiveDateTime,
) -> AssignmentPlan {
    plan_with_daily_load(assignment, preferences, occupied, &DailyLoad::new(), now)
}

/// [`plan_sessions_for`] inside a larger run: `daily_load` holds the
/// sessions earlier assignments of the same run placed on each day.
pub(crate) fn plan_with_daily_load(
    assignment: &Assignment,
    preferences: &SchedulingPreferences,
    occupied: &[StudySession],
    daily_load: &DailyLoad,
    now: NaiveDateTime,
) -> AssignmentPlan {
    let needed = sessions_needed(assignment, preferences);
    let deadline = effective_deadline(assignment, preferences);
    let max_per_day = preferences.max_sessions_per_day as usize;

    let days_available = ceil_days_between(now, deadline).max(1);
    let per_day = usize::try_from(ceil_div(i64::from(needed), days_available))
        .unwrap_or(0)
        .min(max_per_day);

    let mut finder = SlotFinder::new(preferences);
    if preferences.skip_elapsed_slots {
        finder = finder.not_before(now);
    }

    let mut conflicts = occupied.to_vec();
    let mut sessions: Vec<StudySession> = Vec::new();
    let mut current = now;

    while sessions.len() < needed as usize && current <= deadline {
        let day = current.date();
        current += Duration::days(1);

        if preferences.avoid_weekends && is_weekend(day) {
            continue;
        }

        // Each day is visited once, so only earlier assignments can have filled it
        let already_on_day = daily_load.get(&day).copied().unwrap_or(0);
        let wanted = per_day
            .min(needed as usize - sessions.len())
            .min(max_per_day.saturating_sub(already_on_day));

        for slot in finder.find(day, wanted, &conflicts) {
            let session = StudySession::for_assignment(assignment, slot.start, slot.end);
            conflicts.push(session.clone());
            sessions.push(session);
        }
    }

    let plan = AssignmentPlan {
        assignment_id: assignment.id.clone(),
        sessions_needed: needed,
        sessions,
    };

    if plan.is_complete() {
        tracing::debug!(
            assignment = %assignment.id,
            sessions = plan.sessions_placed(),
            "planned study sessions"
        );
    } else {
        tracing::debug!(
            assignment = %assignment.id,
            needed = plan.sessions_needed,
            placed = plan.sessions_placed(),
            deadline = %deadline,
            "assignment under-allocated"
        );
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::preferences::PeriodRange;
    use crate::time::parse_timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    fn starts(plan: &AssignmentPlan) -> Vec<String> {
        plan.sessions
            .iter()
            .map(|s| s.start_time.format("%Y-%m-%d %H:%M").to_string())
            .collect()
    }

    #[test]
    fn needed_sessions_round_up() {
        let prefs = SchedulingPreferences::default();
        let due = ts("2026-10-29T12:00:00");
        let with_hours = |hours: f64| Assignment::new("a", "a", due).with_estimated_hours(hours);
        assert_eq!(sessions_needed(&with_hours(4.0), &prefs), 2);
        assert_eq!(sessions_needed(&with_hours(4.5), &prefs), 3);
        assert_eq!(sessions_needed(&Assignment::new("a", "a", due), &prefs), 1);
    }

    #[test]
    fn deadline_subtracts_buffer_days() {
        let prefs = SchedulingPreferences::default().with_buffer_days(3);
        let assignment = Assignment::new("a", "a", ts("2026-10-29T12:00:00"));
        assert_eq!(effective_deadline(&assignment, &prefs), ts("2026-10-26T12:00:00"));
    }

    #[test]
    fn spreads_sessions_one_per_day_when_time_allows() {
        // Monday 08:00, due ten days later
        let now = ts("2026-10-19T08:00:00");
        let assignment = Assignment::new("a", "Essay", ts("2026-10-29T08:00:00"))
            .with_estimated_hours(4.0);
        let plan = plan_sessions_for(&assignment, &SchedulingPreferences::default(), &[], now);
        assert_eq!(starts(&plan), ["2026-10-19 09:00", "2026-10-20 09:00"]);
        assert!(plan.is_complete());
    }

    #[test]
    fn packs_days_when_deadline_is_close() {
        let now = ts("2026-10-19T08:00:00");
        // Deadline two days out after the buffer, five sessions needed
        let assignment = Assignment::new("a", "Project", ts("2026-10-22T08:00:00"))
            .with_estimated_hours(10.0);
        let plan = plan_sessions_for(&assignment, &SchedulingPreferences::default(), &[], now);
        assert_eq!(
            starts(&plan),
            [
                "2026-10-19 09:00",
                "2026-10-19 14:00",
                "2026-10-19 19:00",
                "2026-10-20 09:00",
                "2026-10-20 14:00",
            ]
        );
    }

    #[test]
    fn caps_sessions_per_day() {
        let now = ts("2026-10-19T08:00:00");
        let prefs = SchedulingPreferences::default()
            .with_session_length(1.0)
            .with_break_length(0.0)
            .with_max_sessions_per_day(2);
        let assignment = Assignment::new("a", "Cram", ts("2026-10-21T08:00:00"))
            .with_estimated_hours(6.0);
        let plan = plan_sessions_for(&assignment, &prefs, &[], now);
        // deadline 10-20 08:00: days 10-19 and 10-20 are walked, two sessions each
        assert_eq!(plan.sessions_placed(), 4);
        assert_eq!(plan.shortfall(), 2);
    }

    #[test]
    fn past_deadline_places_nothing() {
        let now = ts("2026-10-19T08:00:00");
        let prefs = SchedulingPreferences::default().with_buffer_days(5);
        let assignment = Assignment::new("a", "Late", ts("2026-10-21T08:00:00"));
        let plan = plan_sessions_for(&assignment, &prefs, &[], now);
        assert!(plan.sessions.is_empty());
        assert_eq!(plan.shortfall(), 1);
    }

    #[test]
    fn same_day_deadline_still_uses_today() {
        let now = ts("2026-10-19T08:00:00");
        let prefs = SchedulingPreferences::default().with_buffer_days(0);
        let assignment = Assignment::new("a", "Quiz prep", ts("2026-10-19T23:00:00"))
            .with_estimated_hours(6.0);
        let plan = plan_sessions_for(&assignment, &prefs, &[], now);
        assert_eq!(plan.sessions_placed(), 3);
        assert!(plan.sessions.iter().all(|s| s.start_time.date() == now.date()));
    }

    #[test]
    fn avoids_weekends() {
        // Friday 20:00 with elapsed windows skipped: next usable day is Monday
        let now = ts("2026-10-23T20:00:00");
        let prefs = SchedulingPreferences::default()
            .with_avoid_weekends(true)
            .with_skip_elapsed_slots(true);
        let assignment = Assignment::new("a", "Reading", ts("2026-10-29T12:00:00"));
        let plan = plan_sessions_for(&assignment, &prefs, &[], now);
        assert_eq!(starts(&plan), ["2026-10-26 09:00"]);
    }

    #[test]
    fn elapsed_windows_are_offered_by_default() {
        let now = ts("2026-10-23T20:00:00");
        let prefs = SchedulingPreferences::default().with_avoid_weekends(true);
        let assignment = Assignment::new("a", "Reading", ts("2026-10-29T12:00:00"));
        let plan = plan_sessions_for(&assignment, &prefs, &[], now);
        assert_eq!(starts(&plan), ["2026-10-23 09:00"]);
    }

    #[test]
    fn routes_around_occupied_sessions() {
        let now = ts("2026-10-19T08:00:00");
        let other = Assignment::new("b", "Other", ts("2026-11-01T00:00:00"));
        let occupied = vec![StudySession::for_assignment(
            &other,
            ts("2026-10-19T09:00:00"),
            ts("2026-10-19T11:00:00"),
        )];
        let assignment = Assignment::new("a", "Essay", ts("2026-10-29T08:00:00"));
        let prefs = SchedulingPreferences::default();
        let plan = plan_sessions_for(&assignment, &prefs, &occupied, now);
        assert_eq!(starts(&plan), ["2026-10-19 14:00"]);
    }

    #[test]
    fn external_sessions_do_not_count_against_daily_cap() {
        let now = ts("2026-10-19T08:00:00");
        let prefs = SchedulingPreferences::default()
            .with_max_sessions_per_day(1)
            .with_periods([("day", PeriodRange::new(8, 20))]);
        let other = Assignment::new("b", "Other", ts("2026-11-01T00:00:00"));
        let occupied = vec![StudySession::for_assignment(
            &other,
            ts("2026-10-19T18:00:00"),
            ts("2026-10-19T20:00:00"),
        )];
        let assignment = Assignment::new("a", "Essay", ts("2026-10-29T08:00:00"));
        let plan = plan_sessions_for(&assignment, &prefs, &occupied, now);
        assert_eq!(starts(&plan), ["2026-10-19 08:00"]);
    }

    #[test]
    fn earlier_run_sessions_count_against_daily_cap() {
        let now = ts("2026-10-19T08:00:00");
        let prefs = SchedulingPreferences::default()
            .with_max_sessions_per_day(1)
            .with_periods([("day", PeriodRange::new(8, 20))]);
        let mut load = DailyLoad::new();
        load.insert(now.date(), 1);
        let assignment = Assignment::new("a", "Essay", ts("2026-10-29T08:00:00"));
        let plan = plan_with_daily_load(&assignment, &prefs, &[], &load, now);
        assert_eq!(starts(&plan), ["2026-10-20 08:00"]);
    }

    #[test]
    fn tiny_or_unaligned_efforts_round_up() {
        let prefs = SchedulingPreferences::default();
        let due = ts("2026-10-29T12:00:00");
        let with_hours = |hours: f64| Assignment::new("a", "a", due).with_estimated_hours(hours);

        // 0.005 h is under a minute but still real work
        assert_eq!(sessions_needed(&with_hours(0.005), &prefs), 1);
        assert_eq!(sessions_needed(&with_hours(2.004), &prefs), 2);
        assert_eq!(sessions_needed(&with_hours(1.999), &prefs), 1);

        let now = ts("2026-10-19T08:00:00");
        let plan = plan_sessions_for(&with_hours(0.005), &prefs, &[], now);
        assert_eq!(plan.sessions_placed(), 1);
        assert!(plan.is_complete());
    }

    #[test]
    fn huge_effort_saturates_instead_of_wrapping() {
        let prefs = SchedulingPreferences::default().with_session_length(1.0);
        let now = ts("2026-10-19T08:00:00");
        // 2^32 sessions would wrap to zero in a plain cast to u32
        let assignment = Assignment::new("a", "Thesis", ts("2026-10-22T08:00:00"))
            .with_estimated_hours(8_589_934_592.0 / 2.0);
        assert_eq!(sessions_needed(&assignment, &prefs), u32::MAX);

        let plan = plan_sessions_for(&assignment, &prefs, &[], now);
        assert!(plan.sessions_placed() > 0);
        assert!(!plan.is_complete());
        assert_eq!(plan.shortfall(), u32::MAX - plan.sessions_placed());
    }
}
