//! Capacity precheck
//!
//! A necessary-but-not-sufficient bound: passing it does not promise the greedy
//! placement will fit every unit.

use termtable_core::{CapacityReport, ScheduleError, Snapshot};

/// Classes that can run side by side in one day-slot.
///
/// An empty room or teacher pool counts as 1 so that a missing pool does not
/// turn into a zero-capacity false negative.
pub fn parallel_capacity(rooms: usize, teachers: usize) -> u64 {
    let rooms = if rooms == 0 { 1 } else { rooms };
    let teachers = if teachers == 0 { 1 } else { teachers };
    rooms.min(teachers).max(1) as u64
}

/// Compare declared hours against `days × slots × parallel capacity`
pub fn capacity_report(
    snapshot: &Snapshot,
    teaching_days: usize,
    slots_per_day: usize,
) -> CapacityReport {
    let parallel = parallel_capacity(snapshot.rooms.len(), snapshot.teachers.len());
    let teaching_days = teaching_days as u64;
    let slots_per_day = slots_per_day as u64;
    CapacityReport {
        required: snapshot.total_required_hours(),
        teaching_days,
        slots_per_day,
        parallel_capacity: parallel,
        available: teaching_days.saturating_mul(slots_per_day).saturating_mul(parallel),
    }
}

/// Fail fast when the report shows more demand than capacity
pub fn ensure_capacity(report: &CapacityReport) -> Result<(), ScheduleError> {
    if report.is_feasible() {
        Ok(())
    } else {
        Err(ScheduleError::InsufficientCapacity {
            required: report.required,
            available: report.available,
        })
    }
}
