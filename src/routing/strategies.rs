//! Selection modes and cursor persistence policy

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a platform was chosen for a happy visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Only one active platform; chosen unconditionally
    Single,

    /// Active weights total exactly 100; rotate by cursor
    RoundRobin,

    /// Active weights do not total 100; draw proportionally
    WeightedRandom,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::RoundRobin => "round_robin",
            SelectionMode::WeightedRandom => "weighted_random",
        }
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the advanced rotation cursor is written relative to the redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CursorWrite {
    /// Spawn the write and return immediately
    #[default]
    Detached,

    /// Wait for the write before returning the selection
    Awaited,
}

impl FromStr for CursorWrite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detached" => Ok(CursorWrite::Detached),
            "awaited" => Ok(CursorWrite::Awaited),
            _ => Err(format!("Unknown cursor write mode: {}", s)),
        }
    }
}

impl std::fmt::Display for CursorWrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CursorWrite::Detached => write!(f, "detached"),
            CursorWrite::Awaited => write!(f, "awaited"),
        }
    }
}
