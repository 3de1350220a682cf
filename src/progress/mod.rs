//! Lesson completion tracking.
//!
//! Progress is the only local mutable state the tutorial keeps. It lives
//! in a small JSON file under the app home and is written atomically; the
//! sample database itself is never modified.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config::app_home;

/// Persistent record of which lessons have been completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Slugs of completed lessons, in completion order.
    pub completed: Vec<String>,
    /// When a lesson was last run to completion.
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl Progress {
    /// Returns the path to the progress file.
    fn state_path() -> Result<PathBuf> {
        Ok(app_home()?.join("progress.json"))
    }

    /// Loads progress from disk, defaulting to empty when absent.
    pub fn load() -> Result<Self> {
        let path = Self::state_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read progress file")?;
        let progress: Progress =
            serde_json::from_str(&content).context("Failed to parse progress file")?;
        Ok(progress)
    }

    /// Saves progress to disk atomically (write temp, rename).
    pub fn save(&self) -> Result<()> {
        let path = Self::state_path()?;
        let content = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).context("Failed to write progress temp file")?;
        fs::rename(&temp_path, &path).context("Failed to rename progress file")?;
        Ok(())
    }

    /// Whether a lesson has been completed.
    pub fn is_completed(&self, slug: &str) -> bool {
        self.completed.iter().any(|s| s == slug)
    }

    /// Records a completed lesson. Repeat completions are not duplicated.
    pub fn mark_completed(&mut self, slug: &str) {
        if !self.is_completed(slug) {
            self.completed.push(slug.to_string());
        }
        self.last_completed_at = Some(Utc::now());
    }

    /// Number of completed lessons.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}
