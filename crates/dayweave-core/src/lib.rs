//! # DayWeave Core Library
//!
//! This library turns a student's assignment list into concrete,
//! non-overlapping study sessions on a calendar. It follows a CLI-first
//! philosophy: every operation is available through the standalone
//! `dayweave-cli` binary, and other front ends are thin layers over the
//! same core.
//!
//! ## Architecture
//!
//! - **Scheduler**: greedy, deterministic placement of study sessions inside
//!   preferred daily periods, up to a buffer-adjusted deadline
//! - **Agenda**: read-side queries for today, upcoming and calendar-day views
//! - **Storage**: TOML-based configuration holding scheduling preferences
//!
//! ## Key Components
//!
//! - [`StudyScheduler`]: plans every pending assignment in one pass
//! - [`SlotFinder`]: open windows on a single day
//! - [`plan_sessions_for`]: sessions for a single assignment
//! - [`Config`]: application configuration management
//!
//! ## Example
//!
//! ```rust
//! use dayweave_core::{parse_timestamp, Assignment, SchedulingPreferences, StudyScheduler};
//!
//! let now = parse_timestamp("2026-10-19T08:00:00").unwrap();
//! let due = parse_timestamp("2026-10-29T17:00").unwrap();
//! let essay = Assignment::new("essay", "History essay", due).with_estimated_hours(4.0);
//!
//! let plan = StudyScheduler::with_preferences(SchedulingPreferences::default())
//!     .generate_plan(&[essay], &[], now)
//!     .unwrap();
//!
//! assert_eq!(plan.sessions.len(), 2);
//! assert!(plan.is_complete());
//! ```

pub mod agenda;
pub mod assignment;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod time;

pub use agenda::{entries_on, sessions_on, upcoming_sessions, CalendarEntry};
pub use assignment::{Assignment, Priority};
pub use error::{ConfigError, CoreError, ValidationError};
pub use scheduler::{
    find_slots, generate_plan, plan_sessions_for, Allocation, AssignmentPlan, PeriodRange,
    PlanOrder, SchedulingPreferences, Slot, SlotFinder, StudyPlan, StudyScheduler,
};
pub use session::{EntryType, StudySession};
pub use storage::{Config, PlannerConfig};
pub use time::parse_timestamp;
