//! Solver configuration
//!
//! Every field has a default, so a partial TOML table is a valid configuration.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Knobs of the greedy scheduler
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Most units of one subject on a single day, across all kinds
    pub max_per_subject_per_day: u32,
    /// Weekly day without teaching
    pub rest_day: Weekday,
    /// At most one visible class per (date, slot) across all rooms
    pub single_class_per_slot: bool,
    /// Never book a teacher twice in the same (date, slot)
    pub enforce_teacher_exclusivity: bool,
    /// Add sparse FREE rows for idle day-slots
    pub free_markers: bool,
    /// Add EXTRA rows for declared hours that were not placed
    pub extra_markers: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_per_subject_per_day: 2,
            rest_day: Weekday::Sun,
            single_class_per_slot: true,
            enforce_teacher_exclusivity: false,
            free_markers: true,
            extra_markers: true,
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-subject daily cap
    pub fn max_per_day(mut self, cap: u32) -> Self {
        self.max_per_subject_per_day = cap;
        self
    }

    pub fn rest_day(mut self, day: Weekday) -> Self {
        self.rest_day = day;
        self
    }

    /// Allow parallel classes in different rooms of the same day-slot
    pub fn parallel_classes(mut self) -> Self {
        self.single_class_per_slot = false;
        self
    }

    pub fn teacher_exclusivity(mut self, enforce: bool) -> Self {
        self.enforce_teacher_exclusivity = enforce;
        self
    }

    /// Skip the FREE and EXTRA post-pass
    pub fn without_markers(mut self) -> Self {
        self.free_markers = false;
        self.extra_markers = false;
        self
    }
}
