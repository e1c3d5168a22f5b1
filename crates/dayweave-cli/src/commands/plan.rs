use std::path::PathBuf;

use clap::Subcommand;
use dayweave_core::{
    sessions_on, upcoming_sessions, Assignment, Config, PlanOrder, SchedulingPreferences,
    StudyScheduler, StudySession,
};

use super::{read_json, resolve_now};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate study sessions for pending assignments
    Generate {
        /// Assignments JSON array (`-` reads stdin)
        #[arg(long, short)]
        assignments: PathBuf,
        /// Sessions already on the calendar, kept clear of
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Preferences JSON overriding the `study` config section
        #[arg(long)]
        preferences: Option<PathBuf>,
        /// Planning instant (defaults to local now)
        #[arg(long)]
        now: Option<String>,
        /// Assignment order: as-given, due-date, priority, title
        #[arg(long)]
        order: Option<PlanOrder>,
    },
    /// Sessions starting today
    Today {
        /// Sessions JSON array (`-` reads stdin)
        #[arg(long, short)]
        sessions: PathBuf,
        #[arg(long)]
        now: Option<String>,
    },
    /// Next sessions starting after now
    Upcoming {
        /// Sessions JSON array (`-` reads stdin)
        #[arg(long, short)]
        sessions: PathBuf,
        #[arg(long)]
        now: Option<String>,
        /// Maximum number of sessions (defaults to `planner.upcoming_limit`)
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Generate {
            assignments,
            existing,
            preferences,
            now,
            order,
        } => {
            let config = Config::load_or_default();
            let assignments: Vec<Assignment> = read_json(&assignments)?;
            let existing: Vec<StudySession> = match existing {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let preferences: SchedulingPreferences = match preferences {
                Some(path) => read_json(&path)?,
                None => config.study.clone(),
            };
            let now = resolve_now(now.as_deref())?;

            let plan = StudyScheduler::with_preferences(preferences)
                .order(order.unwrap_or(config.planner.order))
                .generate_plan(&assignments, &existing, now)?;

            for allocation in plan.shortfalls() {
                tracing::warn!(
                    "'{}' is short {} of {} sessions before its deadline",
                    allocation.assignment_title,
                    allocation.shortfall(),
                    allocation.sessions_needed
                );
            }

            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        PlanAction::Today { sessions, now } => {
            let sessions: Vec<StudySession> = read_json(&sessions)?;
            let now = resolve_now(now.as_deref())?;
            let today = sessions_on(&sessions, now.date());
            println!("{}", serde_json::to_string_pretty(&today)?);
        }
        PlanAction::Upcoming { sessions, now, limit } => {
            let sessions: Vec<StudySession> = read_json(&sessions)?;
            let now = resolve_now(now.as_deref())?;
            let limit = match limit {
                Some(limit) => limit,
                None => Config::load_or_default().planner.upcoming_limit,
            };
            let upcoming = upcoming_sessions(&sessions, now, limit);
            println!("{}", serde_json::to_string_pretty(&upcoming)?);
        }
    }
    Ok(())
}
