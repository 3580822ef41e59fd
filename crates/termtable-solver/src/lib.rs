//! # termtable-solver
//!
//! Deterministic greedy curriculum scheduler.
//!
//! This crate provides:
//! - Teaching calendar derivation (rest day and holidays)
//! - Decomposition of subjects into one-slot teaching units
//! - Teacher assignment per subject
//! - A capacity precheck
//! - Greedy placement with deterministic rotation and tie-breaks
//! - FREE / EXTRA advisory rows and the subject → teacher legend
//!
//! The same snapshot and request always produce the same schedule, entry for
//! entry. No external constraint solver is involved.
//!
//! ## Example
//!
//! ```rust,ignore
//! use termtable_core::{ScheduleRequest, Scheduler};
//! use termtable_solver::GreedySolver;
//!
//! let solver = GreedySolver::new();
//! let schedule = solver.schedule(&snapshot, &ScheduleRequest::new(start, end))?;
//! ```

pub mod calendar;
pub mod decompose;
pub mod feasibility;
pub mod gap_fill;
pub mod hash;
pub mod legend;
pub mod occupancy;
pub mod options;
pub mod placement;

pub use calendar::TermCalendar;
pub use decompose::{assign_teachers, decompose, TeacherAssignment};
pub use feasibility::{capacity_report, ensure_capacity, parallel_capacity};
pub use gap_fill::GapFiller;
pub use hash::{stable_hash, subject_hash};
pub use legend::{annotate_teachers, build_legend, teacher_names};
pub use occupancy::Occupancy;
pub use options::SolverOptions;
pub use placement::{placement_order, PlacedUnit, PlacementEngine, PlacementOutcome};

use termtable_core::{
    CapacityReport, Room, RoomCategory, Schedule, ScheduleError, ScheduleRequest, Scheduler,
    Snapshot,
};
use tracing::{debug, info, warn};

/// Name of the room synthesized when the snapshot has none
pub const PLACEHOLDER_ROOM: &str = "UNASSIGNED";

/// Greedy, single-pass scheduler
#[derive(Clone, Debug, Default)]
pub struct GreedySolver {
    pub options: SolverOptions,
}

impl GreedySolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SolverOptions) -> Self {
        Self { options }
    }

    fn calendar(&self, snapshot: &Snapshot) -> TermCalendar {
        TermCalendar::from_snapshot(snapshot, self.options.rest_day)
    }
}

/// Rooms used for a run: ordered by id, or a single placeholder classroom
pub fn placement_rooms(snapshot: &Snapshot) -> Vec<Room> {
    if snapshot.rooms.is_empty() {
        return vec![Room::new(0, PLACEHOLDER_ROOM, RoomCategory::Classroom)];
    }
    let mut rooms = snapshot.rooms.clone();
    rooms.sort_by_key(|r| r.id);
    rooms
}

impl Scheduler for GreedySolver {
    fn schedule(
        &self,
        snapshot: &Snapshot,
        request: &ScheduleRequest,
    ) -> Result<Schedule, ScheduleError> {
        if snapshot.subjects.is_empty() {
            return Err(ScheduleError::NoSubjects);
        }

        let dates = self.calendar(snapshot).teaching_dates(request.start_date, request.end_date)?;
        let slots = snapshot.available_slots();

        let report = capacity_report(snapshot, dates.len(), slots.len());
        debug!(
            required = report.required,
            available = report.available,
            parallel = report.parallel_capacity,
            "capacity precheck"
        );
        ensure_capacity(&report)?;

        let units = decompose(&snapshot.subjects);
        if units.is_empty() {
            return Err(ScheduleError::NoComponents);
        }
        let assignment =
            assign_teachers(&snapshot.subjects, &snapshot.teachers, &request.teacher_overrides);
        if assignment.is_empty() {
            debug!("no teachers in pool, classes carry no teacher");
        } else {
            debug!(subjects = assignment.len(), "teachers assigned");
        }

        let rooms = placement_rooms(snapshot);
        let total_units = units.len();
        let outcome = PlacementEngine::new(&dates, &slots, &rooms, &self.options)
            .with_teachers(&assignment)
            .place(units);

        for unit in &outcome.unplaced {
            warn!(unit = %unit, "unit could not be placed");
        }

        let PlacementOutcome {
            placed,
            unplaced,
            mut occupancy,
        } = outcome;

        let names = teacher_names(&snapshot.teachers, &assignment);
        let mut entries = annotate_teachers(placed, &names);
        let placed_count = entries.len();

        let filler = GapFiller::new(&dates, &slots, &rooms);
        if self.options.free_markers {
            let free = filler.free_markers(&mut occupancy);
            entries.extend(free);
        }
        if self.options.extra_markers {
            let extra = filler.extra_markers(&snapshot.subjects, &entries, &mut occupancy);
            entries.extend(extra);
        }

        info!(
            units = total_units,
            placed = placed_count,
            unplaced = unplaced.len(),
            days = dates.len(),
            booked = occupancy.booked_rooms(),
            "schedule built"
        );

        Ok(Schedule {
            entries,
            legend: build_legend(&snapshot.subjects, &snapshot.teachers, &assignment),
            teaching_dates: dates,
            slots,
            unplaced,
        })
    }

    fn check_capacity(
        &self,
        snapshot: &Snapshot,
        request: &ScheduleRequest,
    ) -> Result<CapacityReport, ScheduleError> {
        let dates = self.calendar(snapshot).teaching_dates(request.start_date, request.end_date)?;
        Ok(capacity_report(snapshot, dates.len(), snapshot.available_slots().len()))
    }
}
