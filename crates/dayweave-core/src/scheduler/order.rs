//! Caller-selected processing order for a planning pass.
//!
//! Earlier assignments win contested slots, so the order is part of the
//! planning input rather than an accident of iteration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::assignment::Assignment;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanOrder {
    /// Keep the order the assignments were supplied in.
    #[default]
    AsGiven,
    /// Earliest due date first.
    DueDate,
    /// High priority first.
    Priority,
    /// Alphabetical by title.
    Title,
}

impl PlanOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsGiven => "as-given",
            Self::DueDate => "due-date",
            Self::Priority => "priority",
            Self::Title => "title",
        }
    }

    /// Stable sort, so ties keep their supplied order.
    pub fn sort(&self, assignments: &mut [&Assignment]) {
        match self {
            Self::AsGiven => {}
            Self::DueDate => assignments.sort_by_key(|a| a.due_date),
            Self::Priority => assignments.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
            Self::Title => {
                assignments.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
        }
    }
}

impl fmt::Display for PlanOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "as-given" | "given" => Ok(Self::AsGiven),
            "due-date" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            other => Err(ValidationError::invalid(
                "order",
                format!("unknown order '{other}', expected as-given, due-date, priority or title"),
            )),
        }
    }
}
