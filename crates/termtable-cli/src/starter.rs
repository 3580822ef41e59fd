//! Starter files written by `termtable init`

use chrono::{NaiveDate, NaiveTime};
use termtable_core::{Holiday, Room, RoomCategory, Snapshot, Subject, Teacher, TimeSlot};
use termtable_solver::SolverOptions;

/// Replace anything but ASCII alphanumerics, `-` and `_` with `_`
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// A small department: one room of each category, a lunch break and a holiday
pub fn starter_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new();
    snapshot.teachers = vec![
        Teacher::new(1, "Dr. Rao"),
        Teacher::new(2, "Ms. Iyer"),
        Teacher::new(3, "Mr. Das"),
    ];
    snapshot.rooms = vec![
        Room::new(1, "Hall A", RoomCategory::LectureHall),
        Room::new(2, "Room 101", RoomCategory::Classroom),
        Room::new(3, "Physics Lab", RoomCategory::Lab),
    ];
    snapshot.subjects = vec![
        Subject::new(1, "Mathematics").lecture(4).tutorial(2).semester(1).branch("General"),
        Subject::new(2, "Physics").lecture(3).practical(2).semester(1).branch("General"),
        Subject::new(3, "English").lecture(2).semester(1).branch("General"),
    ];
    snapshot.time_slots = vec![
        TimeSlot::new(1, at(9, 0), at(10, 0)),
        TimeSlot::new(2, at(10, 0), at(11, 0)),
        TimeSlot::new(3, at(11, 0), at(12, 0)),
        TimeSlot::new(4, at(12, 0), at(13, 0)).as_break(),
        TimeSlot::new(5, at(13, 0), at(14, 0)),
    ];
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 1, 26) {
        snapshot.holidays = vec![Holiday::new(date, "Republic Day")];
    }
    snapshot
}

/// Default options, spelled out so every key is visible
pub fn starter_config() -> Result<String, toml::ser::Error> {
    let body = toml::to_string_pretty(&SolverOptions::default())?;
    Ok(format!("# termtable solver options (all keys optional)\n\n{}", body))
}
