//! Subcommands and the input plumbing they share.

pub mod calendar;
pub mod config;
pub mod plan;

use std::error::Error;
use std::io::Read;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use dayweave_core::parse_timestamp;
use serde::de::DeserializeOwned;

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()).into())
    }
}

/// Parse a JSON document from a file or stdin.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let content = read_input(path)?;
    serde_json::from_str(&content)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()).into())
}

/// The `--now` override, or the local wall clock.
pub fn resolve_now(now: Option<&str>) -> Result<NaiveDateTime, Box<dyn Error>> {
    match now {
        Some(raw) => Ok(parse_timestamp(raw)?),
        None => Ok(Local::now().naive_local()),
    }
}
