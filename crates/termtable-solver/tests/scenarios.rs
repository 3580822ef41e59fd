//! End-to-end scheduling scenarios
//!
//! Each test builds a small snapshot and checks one observable behaviour of the
//! full pipeline: calendar, precheck, placement, advisories and legend.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use pretty_assertions::assert_eq;
use termtable_core::{
    EntryKind, Holiday, Room, RoomCategory, ScheduleError, ScheduleRequest, Scheduler, Snapshot,
    Subject, Teacher, TimeSlot, UnitKind,
};
use termtable_solver::{GreedySolver, SolverOptions, PLACEHOLDER_ROOM};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn hourly_slots(count: u32) -> Vec<TimeSlot> {
    (0..count)
        .map(|i| {
            TimeSlot::new(
                i + 1,
                NaiveTime::from_hms_opt(9 + i, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(10 + i, 0, 0).unwrap(),
            )
        })
        .collect()
}

// =============================================================================
// Single subject, ample capacity
// =============================================================================

#[test]
fn single_subject_is_fully_placed() {
    let mut snapshot = Snapshot::new();
    snapshot.teachers.push(Teacher::new(1, "Dr. Iyer"));
    snapshot.rooms.push(Room::new(1, "R-101", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "Calculus").lecture(3));
    snapshot.time_slots = hourly_slots(3);

    // Monday 2025-01-06 to Friday 2025-01-10
    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 10));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    let lectures: Vec<_> = schedule.classes().collect();
    assert_eq!(lectures.len(), 3);
    assert!(lectures.iter().all(|e| e.kind == EntryKind::Class(UnitKind::Lecture)));
    assert!(lectures.iter().all(|e| e.teacher.as_deref() == Some("Dr. Iyer")));
    let mut indices: Vec<u32> = lectures.iter().map(|e| e.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![1, 2, 3]);

    assert_eq!(schedule.extras().count(), 0);
    assert!(schedule.is_complete());
    assert_eq!(schedule.legend.get("Calculus").map(String::as_str), Some("Dr. Iyer"));
    assert_eq!(schedule.teaching_dates.len(), 5);
}

#[test]
fn single_subject_respects_daily_cap() {
    let mut snapshot = Snapshot::new();
    snapshot.teachers.push(Teacher::new(1, "Dr. Iyer"));
    snapshot.rooms.push(Room::new(1, "R-101", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "Calculus").lecture(3));
    snapshot.time_slots = hourly_slots(3);

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 10));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    let mut days: Vec<NaiveDate> = schedule.classes().map(|e| e.date).collect();
    days.sort();
    days.dedup();
    // Three lectures with a cap of two per day need two distinct days
    assert_eq!(days.len(), 2);
}

// =============================================================================
// Empty room and teacher pools
// =============================================================================

#[test]
fn empty_pools_use_placeholder_room() {
    let mut snapshot = Snapshot::new();
    snapshot.subjects.push(Subject::new(1, "Ethics").lecture(1));
    snapshot.time_slots = hourly_slots(1);

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 6));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    let classes: Vec<_> = schedule.classes().collect();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].room, PLACEHOLDER_ROOM);
    assert_eq!(classes[0].teacher, None);
    assert!(schedule.legend.is_empty());
}

#[test]
fn placeholder_room_cannot_host_practicals() {
    let mut snapshot = Snapshot::new();
    snapshot.subjects.push(Subject::new(1, "Chemistry").practical(1));
    snapshot.time_slots = hourly_slots(2);

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 6));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    assert_eq!(schedule.classes().count(), 0);
    assert_eq!(schedule.unplaced.len(), 1);
    let extras: Vec<_> = schedule.extras().collect();
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].kind, EntryKind::Extra(UnitKind::Practical));
    assert_eq!(extras[0].subject, "EXTRA Chemistry");
}

// =============================================================================
// Demand beyond capacity
// =============================================================================

#[test]
fn insufficient_capacity_reports_both_numbers() {
    let mut snapshot = Snapshot::new();
    snapshot.teachers.push(Teacher::new(1, "T"));
    snapshot.rooms.push(Room::new(1, "R", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "Marathon").lecture(50));
    snapshot.time_slots = hourly_slots(2);

    // 2025-01-06..=2025-01-16 minus Sunday the 12th = 10 teaching dates
    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 16));
    let err = GreedySolver::new().schedule(&snapshot, &request).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::InsufficientCapacity {
            required: 50,
            available: 20
        }
    );
    let message = err.to_string();
    assert!(message.contains("50"), "message should mention demand: {}", message);
    assert!(message.contains("20"), "message should mention capacity: {}", message);
}

#[test]
fn empty_teacher_pool_limits_parallel_capacity_to_one() {
    let mut snapshot = Snapshot::new();
    snapshot.rooms = (1..=4)
        .map(|id| Room::new(id, format!("R-{}", id), RoomCategory::Classroom))
        .collect();
    snapshot.subjects.push(Subject::new(1, "Drama").lecture(2));
    snapshot.time_slots = hourly_slots(1);

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 6));
    let solver = GreedySolver::new();
    assert_eq!(solver.check_capacity(&snapshot, &request).unwrap().parallel_capacity, 1);
    assert_eq!(
        solver.schedule(&snapshot, &request).unwrap_err(),
        ScheduleError::InsufficientCapacity {
            required: 2,
            available: 1
        }
    );
}

#[test]
fn break_slots_do_not_count_as_capacity() {
    let mut snapshot = Snapshot::new();
    snapshot.subjects.push(Subject::new(1, "Art").lecture(2));
    let mut slots = hourly_slots(2);
    slots[1] = slots[1].clone().as_break();
    snapshot.time_slots = slots;

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 6));
    let err = GreedySolver::new().schedule(&snapshot, &request).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::InsufficientCapacity {
            required: 2,
            available: 1
        }
    );
}

// =============================================================================
// Holidays
// =============================================================================

#[test]
fn holiday_is_never_scheduled() {
    let holiday = date(2025, 1, 8);
    let mut snapshot = Snapshot::new();
    snapshot.teachers.push(Teacher::new(1, "A"));
    snapshot.teachers.push(Teacher::new(2, "B"));
    snapshot.rooms.push(Room::new(1, "R", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "History").lecture(4));
    snapshot.subjects.push(Subject::new(2, "Geography").lecture(4).tutorial(2));
    snapshot.time_slots = hourly_slots(3);
    snapshot.holidays.push(Holiday::new(holiday, "Festival"));

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 11));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    assert!(!schedule.teaching_dates.contains(&holiday));
    assert_eq!(schedule.teaching_dates.len(), 5);
    assert!(schedule.entries.iter().all(|e| e.date != holiday));
    assert!(schedule.entries.iter().all(|e| e.date.weekday() != Weekday::Sun));
}

#[test]
fn only_holidays_in_range_is_no_valid_dates() {
    let mut snapshot = Snapshot::new();
    snapshot.subjects.push(Subject::new(1, "History").lecture(1));
    snapshot.time_slots = hourly_slots(1);
    snapshot.holidays.push(Holiday::new(date(2025, 1, 6), "Closed"));

    // Sunday the 5th plus the holiday on the 6th
    let request = ScheduleRequest::new(date(2025, 1, 5), date(2025, 1, 6));
    let err = GreedySolver::new().schedule(&snapshot, &request).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::NoValidDates {
            start: date(2025, 1, 5),
            end: date(2025, 1, 6)
        }
    );
}

// =============================================================================
// Contention for a single lab
// =============================================================================

fn lab_contention_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new();
    snapshot.teachers.push(Teacher::new(1, "A"));
    snapshot.teachers.push(Teacher::new(2, "B"));
    snapshot.rooms.push(Room::new(1, "Lab-1", RoomCategory::Lab));
    snapshot.rooms.push(Room::new(2, "R-2", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "Physics").practical(1));
    snapshot.subjects.push(Subject::new(2, "Biology").practical(1));
    snapshot.time_slots = hourly_slots(1);
    snapshot
}

#[test]
fn lab_contention_moves_second_practical_to_another_day() {
    let snapshot = lab_contention_snapshot();
    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 7));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    let practicals: Vec<_> = schedule.classes().collect();
    assert_eq!(practicals.len(), 2);
    assert!(practicals.iter().all(|e| e.room == "Lab-1"));
    assert_ne!(practicals[0].date, practicals[1].date);
    assert!(schedule.is_complete());
}

#[test]
fn lab_contention_on_one_day_becomes_extra() {
    let snapshot = lab_contention_snapshot();
    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 6));
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    let practicals: Vec<_> = schedule.classes().collect();
    assert_eq!(practicals.len(), 1);
    assert_eq!(practicals[0].room, "Lab-1");
    assert_eq!(schedule.unplaced.len(), 1);

    let extras: Vec<_> = schedule.extras().collect();
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].room, "R-2");
    assert_eq!(extras[0].subject, format!("EXTRA {}", schedule.unplaced[0].subject_name));
    // The day-slot already shows a class, so no FREE row fits
    assert_eq!(schedule.free_rows().count(), 0);
}

// =============================================================================
// Teacher overrides and options
// =============================================================================

#[test]
fn teacher_override_reaches_entries_and_legend() {
    let mut snapshot = Snapshot::new();
    snapshot.teachers.push(Teacher::new(1, "First"));
    snapshot.teachers.push(Teacher::new(2, "Second"));
    snapshot.rooms.push(Room::new(1, "R", RoomCategory::LectureHall));
    snapshot.subjects.push(Subject::new(7, "Logic").lecture(2));
    snapshot.time_slots = hourly_slots(2);

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 10)).assign(7, 2);
    let schedule = GreedySolver::new().schedule(&snapshot, &request).unwrap();

    assert!(schedule.classes().all(|e| e.teacher.as_deref() == Some("Second")));
    assert_eq!(schedule.legend.get("Logic").map(String::as_str), Some("Second"));
}

#[test]
fn markers_can_be_disabled() {
    let mut snapshot = Snapshot::new();
    snapshot.rooms.push(Room::new(1, "R", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "Drawing").lecture(1).practical(1));
    snapshot.time_slots = hourly_slots(2);

    let request = ScheduleRequest::new(date(2025, 1, 6), date(2025, 1, 7));
    let solver = GreedySolver::with_options(SolverOptions::default().without_markers());
    let schedule = solver.schedule(&snapshot, &request).unwrap();

    assert!(schedule.entries.iter().all(|e| !e.kind.is_advisory()));
    // The practical still shows up as unplaced
    assert_eq!(schedule.unplaced.len(), 1);
    assert_eq!(schedule.unplaced[0].kind, UnitKind::Practical);
}

#[test]
fn saturday_rest_day_shifts_the_calendar() {
    let mut snapshot = Snapshot::new();
    snapshot.rooms.push(Room::new(1, "R", RoomCategory::Classroom));
    snapshot.subjects.push(Subject::new(1, "Music").lecture(3));
    snapshot.time_slots = hourly_slots(1);

    // Thursday 2025-01-09 to Sunday 2025-01-12
    let request = ScheduleRequest::new(date(2025, 1, 9), date(2025, 1, 12));
    let solver = GreedySolver::with_options(SolverOptions::default().rest_day(Weekday::Sat));
    let schedule = solver.schedule(&snapshot, &request).unwrap();

    assert_eq!(
        schedule.teaching_dates,
        vec![date(2025, 1, 9), date(2025, 1, 10), date(2025, 1, 12)]
    );
    assert!(schedule.entries.iter().all(|e| e.date.weekday() != Weekday::Sat));
    assert_eq!(schedule.classes().count(), 3);
}
