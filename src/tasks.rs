//! # Calendar Tasks
//!
//! A small in-memory task list attached to calendar dates, with per-day
//! tallies for the month view and JSON persistence to a single file.
//!
//! ## Persistence
//! The whole book is written as one JSON document. Writes go to a sibling
//! `.tmp` file first and are then renamed over the target so a crash never
//! leaves a half-written book behind.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from task book operations and persistence.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task book file could not be read or written
    #[error("task book IO: {0}")]
    Io(#[from] io::Error),

    /// Task book file is not valid JSON for this schema
    #[error("task book JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task {0} not found")]
    NotFound(u64),

    #[error("task title must not be empty")]
    EmptyTitle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub date: NaiveDate,
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
}

/// Number of tasks on one day and how many of them are done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    pub total: usize,
    pub done: usize,
}

impl DayTally {
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.done)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskBook {
    /// Highest id ever handed out. May lag behind `tasks` in hand-edited files.
    #[serde(default)]
    next_id: u64,
    tasks: Vec<Task>,
}

impl TaskBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task and return its id. Titles are trimmed; blank titles are rejected.
    pub fn add(
        &mut self,
        title: &str,
        date: NaiveDate,
        priority: Priority,
    ) -> Result<u64, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let highest = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest) + 1;
        let id = self.next_id;
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            date,
            done: false,
            priority,
        });
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Flip a task's done flag and return the new value.
    pub fn toggle(&mut self, id: u64) -> Result<bool, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.done = !task.done;
        Ok(task.done)
    }

    pub fn remove(&mut self, id: u64) -> Result<Task, TaskError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks on `date`, highest priority first, then insertion order.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        let mut out: Vec<&Task> = self.tasks.iter().filter(|t| t.date == date).collect();
        out.sort_by_key(|t| t.priority);
        out
    }

    /// Open tasks ordered by date, then priority.
    pub fn pending(&self) -> Vec<&Task> {
        let mut out: Vec<&Task> = self.tasks.iter().filter(|t| !t.done).collect();
        out.sort_by_key(|t| (t.date, t.priority));
        out
    }

    /// Per-day tallies for every day in `year`-`month` that has at least one task.
    pub fn counts_for_month(&self, year: i32, month: u32) -> BTreeMap<NaiveDate, DayTally> {
        let mut counts = BTreeMap::new();
        for task in self
            .tasks
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
        {
            let tally: &mut DayTally = counts.entry(task.date).or_default();
            tally.total += 1;
            if task.done {
                tally.done += 1;
            }
        }
        counts
    }

    /// Load a book from `path`. A missing file yields an empty book.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaskError> {
        let path = path.as_ref();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no task book yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let book: TaskBook = serde_json::from_slice(&data)?;
        debug!(path = %path.display(), tasks = book.len(), "loaded task book");
        Ok(book)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TaskError> {
        let path = path.as_ref();
        let data = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), tasks = self.len(), "saved task book");
        Ok(())
    }
}
