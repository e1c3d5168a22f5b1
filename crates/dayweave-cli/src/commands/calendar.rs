use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use dayweave_core::{entries_on, Assignment, StudySession};

use super::read_json;

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Due dates and study sessions on one day
    Day {
        /// Day to show (YYYY-MM-DD)
        date: NaiveDate,
        /// Assignments JSON array (`-` reads stdin)
        #[arg(long, short)]
        assignments: PathBuf,
        /// Sessions JSON array
        #[arg(long, short)]
        sessions: Option<PathBuf>,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CalendarAction::Day {
            date,
            assignments,
            sessions,
        } => {
            let assignments: Vec<Assignment> = read_json(&assignments)?;
            let sessions: Vec<StudySession> = match sessions {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let entries = entries_on(date, &assignments, &sessions);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
