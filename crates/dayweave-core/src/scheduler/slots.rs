//! Candidate study windows inside preferred periods.
//!
//! Windows are generated per period from `period.start`, each exactly one
//! session long, stepping by session plus break, and dropped when they
//! overlap an occupied session.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::preferences::SchedulingPreferences;
use crate::session::StudySession;
use crate::time::at_minute;

/// An accepted `[start, end)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open interval overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Finds open windows on a single day.
pub struct SlotFinder<'a> {
    preferences: &'a SchedulingPreferences,
    not_before: Option<NaiveDateTime>,
}

impl<'a> SlotFinder<'a> {
    pub fn new(preferences: &'a SchedulingPreferences) -> Self {
        Self {
            preferences,
            not_before: None,
        }
    }

    /// Also reject windows starting before `instant`.
    pub fn not_before(mut self, instant: NaiveDateTime) -> Self {
        self.not_before = Some(instant);
        self
    }

    /// Up to `max_slots` windows on `day`, in period order then time order.
    ///
    /// The time of day carried by callers is irrelevant: only the date is used.
    pub fn find(
        &self,
        day: NaiveDate,
        max_slots: usize,
        occupied: &[StudySession],
    ) -> Vec<Slot> {
        let session = self.preferences.session_minutes();
        let step = session.saturating_add(self.preferences.break_minutes().max(0));
        let mut slots = Vec::new();

        if max_slots == 0 || session <= 0 {
            return slots;
        }

        for range in self.preferences.preferred_periods.values() {
            if slots.len() >= max_slots {
                break;
            }

            let period_end = i64::from(range.end) * 60;
            let mut offset = i64::from(range.start) * 60;

            while offset.saturating_add(session) <= period_end && slots.len() < max_slots {
                let slot = Slot::new(at_minute(day, offset), at_minute(day, offset + session));
                offset = offset.saturating_add(step);

                if self.not_before.is_some_and(|instant| slot.start < instant) {
                    continue;
                }
                if occupied.iter().any(|existing| existing.overlaps(slot.start, slot.end)) {
                    continue;
                }
                // Overlapping periods can offer the same stretch twice
                if slots.iter().any(|accepted| accepted.overlaps(&slot)) {
                    continue;
                }
                slots.push(slot);
            }
        }

        slots
    }
}

/// Convenience function: open windows on `day` with default finder settings.
pub fn find_slots(
    day: NaiveDate,
    max_slots: usize,
    occupied: &[StudySession],
    preferences: &SchedulingPreferences,
) -> Vec<Slot> {
    SlotFinder::new(preferences).find(day, max_slots, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Assignment;
    use crate::scheduler::preferences::PeriodRange;
    use crate::time::parse_timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn busy(start: &str, end: &str) -> StudySession {
        let owner = Assignment::new("busy", "Busy", ts("2026-11-01T00:00:00"));
        StudySession::for_assignment(&owner, ts(start), ts(end))
    }

    fn starts(slots: &[Slot]) -> Vec<String> {
        slots.iter().map(|s| s.start.format("%H:%M").to_string()).collect()
    }

    #[test]
    fn default_preferences_give_one_window_per_period() {
        let prefs = SchedulingPreferences::default();
        let slots = find_slots(day(), 10, &[], &prefs);
        // 11:30 + 2h would end past 12:00, same for 16:30 and 21:30
        assert_eq!(starts(&slots), ["09:00", "14:00", "19:00"]);
        assert!(slots.iter().all(|s| s.duration_minutes() == 120));
    }

    #[test]
    fn steps_by_session_plus_break() {
        let prefs = SchedulingPreferences::default()
            .with_session_length(1.0)
            .with_break_length(0.25)
            .with_periods([("morning", PeriodRange::new(8, 12))]);
        let slots = find_slots(day(), 10, &[], &prefs);
        assert_eq!(starts(&slots), ["08:00", "09:15", "10:30"]);
    }

    #[test]
    fn window_may_end_exactly_at_period_end() {
        let prefs = SchedulingPreferences::default()
            .with_break_length(0.0)
            .with_periods([("block", PeriodRange::new(8, 12))]);
        let slots = find_slots(day(), 10, &[], &prefs);
        assert_eq!(starts(&slots), ["08:00", "10:00"]);
        assert_eq!(slots[1].end, ts("2026-10-20T12:00:00"));
    }

    #[test]
    fn respects_max_slots() {
        let prefs = SchedulingPreferences::default();
        assert_eq!(starts(&find_slots(day(), 2, &[], &prefs)), ["09:00", "14:00"]);
        assert!(find_slots(day(), 0, &[], &prefs).is_empty());
    }

    #[test]
    fn skips_overlapping_windows() {
        let prefs = SchedulingPreferences::default();
        let occupied = vec![busy("2026-10-20T10:00:00", "2026-10-20T10:30:00")];
        let slots = find_slots(day(), 10, &occupied, &prefs);
        assert_eq!(starts(&slots), ["14:00", "19:00"]);
    }

    #[test]
    fn touching_sessions_do_not_conflict() {
        let prefs = SchedulingPreferences::default();
        // Ends as the afternoon window starts and starts as the morning one ends
        let occupied = vec![busy("2026-10-20T11:00:00", "2026-10-20T14:00:00")];
        let slots = find_slots(day(), 10, &occupied, &prefs);
        assert_eq!(starts(&slots), ["09:00", "14:00", "19:00"]);
    }

    #[test]
    fn sessions_on_other_days_are_ignored() {
        let prefs = SchedulingPreferences::default();
        let occupied = vec![busy("2026-10-21T09:00:00", "2026-10-21T11:00:00")];
        assert_eq!(find_slots(day(), 10, &occupied, &prefs).len(), 3);
    }

    #[test]
    fn follows_period_enumeration_order() {
        let prefs = SchedulingPreferences::default().with_periods([
            ("evening", PeriodRange::new(19, 22)),
            ("morning", PeriodRange::new(9, 12)),
        ]);
        assert_eq!(starts(&find_slots(day(), 10, &[], &prefs)), ["19:00", "09:00"]);
    }

    #[test]
    fn empty_or_inverted_periods_yield_nothing() {
        let empty = SchedulingPreferences::default()
            .with_periods(Vec::<(String, PeriodRange)>::new());
        assert!(find_slots(day(), 10, &[], &empty).is_empty());

        let inverted = SchedulingPreferences::default()
            .with_periods([("odd", PeriodRange::new(17, 14))]);
        assert!(find_slots(day(), 10, &[], &inverted).is_empty());
    }

    #[test]
    fn overlapping_periods_do_not_double_book() {
        let prefs = SchedulingPreferences::default().with_periods([
            ("early", PeriodRange::new(9, 12)),
            ("late", PeriodRange::new(10, 13)),
        ]);
        let slots = find_slots(day(), 10, &[], &prefs);
        assert_eq!(starts(&slots), ["09:00"]);
    }

    #[test]
    fn period_ending_at_midnight() {
        let prefs = SchedulingPreferences::default()
            .with_periods([("night", PeriodRange::new(22, 24))]);
        let slots = find_slots(day(), 10, &[], &prefs);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].end, ts("2026-10-21T00:00:00"));
    }

    #[test]
    fn not_before_drops_elapsed_windows() {
        let prefs = SchedulingPreferences::default();
        let finder = SlotFinder::new(&prefs).not_before(ts("2026-10-20T13:00:00"));
        assert_eq!(starts(&finder.find(day(), 10, &[])), ["14:00", "19:00"]);
    }

    #[test]
    fn oversized_lengths_do_not_overflow() {
        let huge_break = SchedulingPreferences::default().with_break_length(1e300);
        assert_eq!(starts(&find_slots(day(), 10, &[], &huge_break)), ["09:00", "14:00", "19:00"]);

        let huge_session = SchedulingPreferences::default().with_session_length(1e300);
        assert!(find_slots(day(), 10, &[], &huge_session).is_empty());
    }
}
