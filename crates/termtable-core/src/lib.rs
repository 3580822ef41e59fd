//! # termtable-core
//!
//! Core domain model and traits for the termtable curriculum scheduler.
//!
//! This crate provides:
//! - Input types: `Teacher`, `Room`, `Subject`, `TimeSlot`, `Holiday`, `Snapshot`
//! - Derived types: `TeachingUnit`, `ScheduleEntry`, `Schedule`
//! - Core traits: `Scheduler`, `Renderer`
//! - Error types and the external `ScheduleResponse` envelope
//!
//! ## Example
//!
//! ```rust
//! use termtable_core::{Room, RoomCategory, Snapshot, Subject, Teacher};
//!
//! let mut snapshot = Snapshot::new();
//! snapshot.teachers.push(Teacher::new(1, "Dr. Rao"));
//! snapshot.rooms.push(Room::new(1, "R-101", RoomCategory::Classroom));
//! snapshot.subjects.push(Subject::new(1, "Algorithms").lecture(3).tutorial(1));
//! assert_eq!(snapshot.total_required_hours(), 4);
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a teacher
pub type TeacherId = u32;

/// Unique identifier for a room
pub type RoomId = u32;

/// Unique identifier for a subject
pub type SubjectId = u32;

/// Unique identifier for a time slot
pub type SlotId = u32;

/// Teacher marker written on advisory FREE rows
pub const PLACEHOLDER_TEACHER: &str = "—";

/// Subject label of FREE advisory rows
pub const FREE_SUBJECT: &str = "FREE";

/// Prefix of EXTRA advisory subject labels
pub const EXTRA_PREFIX: &str = "EXTRA";

// ============================================================================
// Teachers and Rooms
// ============================================================================

/// A teacher that subjects can be assigned to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    /// Display name used in the legend and on entries
    pub name: String,
}

impl Teacher {
    pub fn new(id: TeacherId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Eligibility class of a room.
///
/// Variants are declared in alphabetical order of their labels; the placement
/// engine walks eligible rooms in `(category, id)` order. Serialized as its
/// label; deserialized through `FromStr`, so any casing or separator works.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RoomCategory {
    Classroom,
    Lab,
    #[serde(rename = "Lecture Hall")]
    LectureHall,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 3] =
        [RoomCategory::Classroom, RoomCategory::Lab, RoomCategory::LectureHall];

    pub fn label(self) -> &'static str {
        match self {
            RoomCategory::Classroom => "Classroom",
            RoomCategory::Lab => "Lab",
            RoomCategory::LectureHall => "Lecture Hall",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "classroom" => Ok(RoomCategory::Classroom),
            "lab" | "laboratory" => Ok(RoomCategory::Lab),
            "lecturehall" | "hall" => Ok(RoomCategory::LectureHall),
            _ => Err(format!("unknown room category '{}'", s)),
        }
    }
}

impl TryFrom<String> for RoomCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A bookable room
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(alias = "room_type")]
    pub category: RoomCategory,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, category: RoomCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }
}

// ============================================================================
// Subjects
// ============================================================================

/// A subject with its declared hour requirements.
///
/// One hour corresponds to one time slot. `semester` and `branch` are
/// informational tags and never influence placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub lecture_hours: u32,
    #[serde(default)]
    pub tutorial_hours: u32,
    #[serde(default)]
    pub practical_hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Subject {
    pub fn new(id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lecture_hours: 0,
            tutorial_hours: 0,
            practical_hours: 0,
            semester: None,
            branch: None,
        }
    }

    /// Set the lecture hours
    pub fn lecture(mut self, hours: u32) -> Self {
        self.lecture_hours = hours;
        self
    }

    /// Set the tutorial hours
    pub fn tutorial(mut self, hours: u32) -> Self {
        self.tutorial_hours = hours;
        self
    }

    /// Set the practical hours
    pub fn practical(mut self, hours: u32) -> Self {
        self.practical_hours = hours;
        self
    }

    pub fn semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Declared hours for one unit kind
    pub fn hours(&self, kind: UnitKind) -> u32 {
        match kind {
            UnitKind::Lecture => self.lecture_hours,
            UnitKind::Tutorial => self.tutorial_hours,
            UnitKind::Practical => self.practical_hours,
        }
    }

    /// Sum of lecture, tutorial and practical hours
    pub fn total_hours(&self) -> u64 {
        UnitKind::ALL.iter().map(|&k| u64::from(self.hours(k))).sum()
    }
}

// ============================================================================
// Calendar Inputs
// ============================================================================

/// A bell-schedule slot within a teaching day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    #[serde(alias = "start_time")]
    pub start: NaiveTime,
    #[serde(alias = "end_time")]
    pub end: NaiveTime,
    /// Break slots are never schedulable
    #[serde(default)]
    pub is_break: bool,
}

impl TimeSlot {
    pub fn new(id: SlotId, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id,
            start,
            end,
            is_break: false,
        }
    }

    /// Mark this slot as a break
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    /// Start time as `HH:MM:SS`
    pub fn start_label(&self) -> String {
        self.start.format("%H:%M:%S").to_string()
    }

    /// End time as `HH:MM:SS`
    pub fn end_label(&self) -> String {
        self.end.format("%H:%M:%S").to_string()
    }
}

/// A date excluded from teaching
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }
}

// ============================================================================
// Snapshot and Request
// ============================================================================

/// Read-only view of everything the scheduler needs.
///
/// A run never mutates the snapshot, so one snapshot can back any number of
/// concurrent runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default, alias = "timeslots")]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-break slots ordered by start time, then id
    pub fn available_slots(&self) -> Vec<TimeSlot> {
        let mut slots: Vec<TimeSlot> =
            self.time_slots.iter().filter(|s| !s.is_break).cloned().collect();
        slots.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        slots
    }

    pub fn holiday_dates(&self) -> BTreeSet<NaiveDate> {
        self.holidays.iter().map(|h| h.date).collect()
    }

    pub fn get_subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn get_teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Total teaching units declared across all subjects
    pub fn total_required_hours(&self) -> u64 {
        self.subjects.iter().map(Subject::total_hours).sum()
    }
}

/// Parameters of a single scheduling run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// First date of the term (inclusive)
    pub start_date: NaiveDate,
    /// Last date of the term (inclusive)
    pub end_date: NaiveDate,
    /// Caller preferences: subject → teacher
    #[serde(default, alias = "teacher_map")]
    pub teacher_overrides: BTreeMap<SubjectId, TeacherId>,
}

impl ScheduleRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            teacher_overrides: BTreeMap::new(),
        }
    }

    /// Prefer `teacher` for `subject`
    pub fn assign(mut self, subject: SubjectId, teacher: TeacherId) -> Self {
        self.teacher_overrides.insert(subject, teacher);
        self
    }
}

// ============================================================================
// Teaching Units
// ============================================================================

/// Kind of a teaching unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Lecture,
    Tutorial,
    Practical,
}

impl UnitKind {
    /// Declaration order used when decomposing a subject
    pub const ALL: [UnitKind; 3] = [UnitKind::Lecture, UnitKind::Tutorial, UnitKind::Practical];

    /// Single-letter tag shown on timetables
    pub fn code(self) -> char {
        match self {
            UnitKind::Lecture => 'L',
            UnitKind::Tutorial => 'T',
            UnitKind::Practical => 'P',
        }
    }

    /// Placement priority: practicals first, tutorials last
    pub fn priority(self) -> u8 {
        match self {
            UnitKind::Practical => 0,
            UnitKind::Lecture => 1,
            UnitKind::Tutorial => 2,
        }
    }

    /// Room categories this kind may be placed in
    pub fn eligible_categories(self) -> &'static [RoomCategory] {
        match self {
            UnitKind::Lecture => &[RoomCategory::Classroom, RoomCategory::LectureHall],
            UnitKind::Tutorial => &RoomCategory::ALL,
            UnitKind::Practical => &[RoomCategory::Lab],
        }
    }

    pub fn allows(self, category: RoomCategory) -> bool {
        self.eligible_categories().contains(&category)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Lecture => write!(f, "Lecture"),
            UnitKind::Tutorial => write!(f, "Tutorial"),
            UnitKind::Practical => write!(f, "Practical"),
        }
    }
}

/// One slot-length block of a subject's requirement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingUnit {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub kind: UnitKind,
    /// 1-based sequence number within the subject's units of this kind
    pub index: u32,
}

impl fmt::Display for TeachingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.subject_name, self.kind.code(), self.index)
    }
}

// ============================================================================
// Schedule (Result)
// ============================================================================

/// What a schedule row represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A placed teaching unit
    Class(UnitKind),
    /// Advisory: idle capacity
    Free,
    /// Advisory: declared hours that could not be placed
    Extra(UnitKind),
}

impl EntryKind {
    /// Unit kind carried by class and EXTRA rows
    pub fn unit_kind(self) -> Option<UnitKind> {
        match self {
            EntryKind::Class(kind) | EntryKind::Extra(kind) => Some(kind),
            EntryKind::Free => None,
        }
    }

    /// Class and FREE rows occupy the single visible cell of their day-slot
    pub fn is_visible(self) -> bool {
        matches!(self, EntryKind::Class(_) | EntryKind::Free)
    }

    pub fn is_advisory(self) -> bool {
        !matches!(self, EntryKind::Class(_))
    }

    /// Single-letter tag (`F` for FREE rows)
    pub fn code(self) -> char {
        self.unit_kind().map_or('F', UnitKind::code)
    }
}

/// One row of the produced timetable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    /// `HH:MM:SS`
    pub start_time: String,
    /// `HH:MM:SS`
    pub end_time: String,
    pub room: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    pub kind: EntryKind,
    pub index: u32,
}

/// The result of a scheduling run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Placed classes, then FREE rows, then EXTRA rows
    pub entries: Vec<ScheduleEntry>,
    /// Subject name → teacher name
    pub legend: BTreeMap<String, String>,
    /// Teaching dates the run considered
    pub teaching_dates: Vec<NaiveDate>,
    /// Schedulable slots, in the order placement used them
    pub slots: Vec<TimeSlot>,
    /// Units the placement engine could not fit
    pub unplaced: Vec<TeachingUnit>,
}

impl Schedule {
    /// Placed class rows only
    pub fn classes(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| matches!(e.kind, EntryKind::Class(_)))
    }

    /// EXTRA advisory rows only
    pub fn extras(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| matches!(e.kind, EntryKind::Extra(_)))
    }

    /// FREE advisory rows only
    pub fn free_rows(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Free)
    }

    /// True when every declared unit was placed
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Outcome of the capacity precheck
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub required: u64,
    pub teaching_days: u64,
    pub slots_per_day: u64,
    pub parallel_capacity: u64,
    pub available: u64,
}

impl CapacityReport {
    pub fn is_feasible(&self) -> bool {
        self.required <= self.available
    }

    /// Units that cannot fit even in the best case
    pub fn shortfall(&self) -> u64 {
        self.required.saturating_sub(self.available)
    }
}

/// External response envelope: success flag plus either the schedule or a
/// diagnostic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unplaced: Option<Vec<TeachingUnit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Schedule, ScheduleError>> for ScheduleResponse {
    fn from(result: Result<Schedule, ScheduleError>) -> Self {
        match result {
            Ok(schedule) => Self {
                success: true,
                schedule: Some(schedule.entries),
                legend: Some(schedule.legend),
                unplaced: Some(schedule.unplaced),
                error: None,
            },
            Err(err) => Self {
                success: false,
                schedule: None,
                legend: None,
                unplaced: None,
                error: Some(err.to_string()),
            },
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Core scheduling abstraction
pub trait Scheduler: Send + Sync {
    /// Produce a timetable for the requested term
    fn schedule(
        &self,
        snapshot: &Snapshot,
        request: &ScheduleRequest,
    ) -> Result<Schedule, ScheduleError>;

    /// Run only the capacity precheck
    fn check_capacity(
        &self,
        snapshot: &Snapshot,
        request: &ScheduleRequest,
    ) -> Result<CapacityReport, ScheduleError>;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a schedule to the output format
    fn render(&self, schedule: &Schedule) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Terminal failure of a scheduling run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("No subjects found. Please add subjects first.")]
    NoSubjects,

    #[error("No valid teaching dates found between {start} and {end}.")]
    NoValidDates { start: NaiveDate, end: NaiveDate },

    #[error(
        "Selected duration is short: need {required} slots but only {available} available. \
         Add more days/slots/rooms/teachers or reduce required hours."
    )]
    InsufficientCapacity { required: u64, available: u64 },

    #[error("No class components to schedule.")]
    NoComponents,
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
