//! Task identifiers
//!
//! IDs are plain integers derived from the creation time in milliseconds.
//! When the clock would produce an ID that is not greater than every ID
//! already in the collection (two adds in the same millisecond, a clock
//! that went backwards, or hand-edited data), the next free integer above
//! the current maximum is used instead. If the maximum is already
//! `i64::MAX`, the smallest unused positive integer is taken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID: expected an integer, got '{0}'")]
    InvalidTaskId(String),
}

/// Task ID, unique within a collection and never reassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Generates a fresh ID for a task created at `now`
    ///
    /// The result never equals an ID in `existing`. It is greater than all
    /// of them unless the maximum is `i64::MAX`.
    pub fn generate<'a, I>(existing: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a TaskId>,
    {
        let taken: HashSet<i64> = existing.into_iter().map(|id| id.0).collect();
        let candidate = now.timestamp_millis();

        match taken.iter().copied().max() {
            Some(max) if candidate <= max => match max.checked_add(1) {
                Some(next) => Self(next),
                None => Self::smallest_unused(&taken),
            },
            _ => Self(candidate),
        }
    }

    fn smallest_unused(taken: &HashSet<i64>) -> Self {
        let mut next = 1;
        while taken.contains(&next) {
            next += 1;
        }
        Self(next)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| IdError::InvalidTaskId(s.to_string()))
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
