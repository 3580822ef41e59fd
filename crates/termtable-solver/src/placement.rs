//! Greedy Placement Engine
//!
//! Places teaching units one at a time into the first (date, slot, room) triple
//! that satisfies every constraint. There is no backtracking: a unit that finds
//! no triple is reported as unplaced and the run carries on.
//!
//! ## Ordering
//!
//! Units are attempted by ascending sequence index, so round 1 of every subject
//! goes before any round 2. Within a round practicals go first (they have the
//! narrowest room eligibility), then lectures, then tutorials. Remaining ties are
//! broken by the stable subject hash, which interleaves subjects without
//! favouring low ids.
//!
//! ## Search
//!
//! - Dates start at `hash(subject) mod days` and wrap around.
//! - Slots start at the date's next-free pointer and wrap around.
//! - Rooms are tried in `(category, id)` order among eligible categories.
//!
//! ## Constraints
//!
//! 1. The subject has fewer than `max_per_subject_per_day` units on the date.
//! 2. The day-slot shows no other class (when `single_class_per_slot` is on).
//! 3. The room category is eligible for the unit kind.
//! 4. The room is free in that day-slot.
//! 5. Optionally, the subject's teacher is free in that day-slot.

use crate::decompose::TeacherAssignment;
use crate::hash::subject_hash;
use crate::occupancy::Occupancy;
use crate::options::SolverOptions;
use chrono::NaiveDate;
use termtable_core::{
    EntryKind, Room, ScheduleEntry, SubjectId, TeacherId, TeachingUnit, TimeSlot, UnitKind,
};
use tracing::{debug, trace};

/// A unit fixed to a concrete (date, slot, room)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedUnit {
    pub subject_id: SubjectId,
    pub date_index: usize,
    pub slot_index: usize,
    pub room_index: usize,
    /// Row for the timetable; teacher is filled in by a later pass
    pub entry: ScheduleEntry,
}

/// Result of one placement run
#[derive(Clone, Debug, Default)]
pub struct PlacementOutcome {
    /// Placed units in placement order
    pub placed: Vec<PlacedUnit>,
    /// Units for which no triple was found, in placement order
    pub unplaced: Vec<TeachingUnit>,
    /// Booking state after the last placement
    pub occupancy: Occupancy,
}

/// Sort units into placement order
pub fn placement_order(units: &mut [TeachingUnit]) {
    units.sort_by_key(|u| (u.index, u.kind.priority(), subject_hash(u.subject_id), u.subject_id));
}

/// Greedy engine over one run's dates, slots and rooms
pub struct PlacementEngine<'a> {
    dates: &'a [NaiveDate],
    slots: &'a [TimeSlot],
    rooms: &'a [Room],
    options: &'a SolverOptions,
    teachers: Option<&'a TeacherAssignment>,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(
        dates: &'a [NaiveDate],
        slots: &'a [TimeSlot],
        rooms: &'a [Room],
        options: &'a SolverOptions,
    ) -> Self {
        Self {
            dates,
            slots,
            rooms,
            options,
            teachers: None,
        }
    }

    /// Teacher assignment consulted when teacher exclusivity is enforced
    pub fn with_teachers(mut self, teachers: &'a TeacherAssignment) -> Self {
        self.teachers = Some(teachers);
        self
    }

    /// Room positions eligible for `kind`, in `(category, id)` order
    fn eligible_rooms(&self, kind: UnitKind) -> Vec<usize> {
        let mut eligible: Vec<usize> = (0..self.rooms.len())
            .filter(|&r| kind.allows(self.rooms[r].category))
            .collect();
        eligible.sort_by_key(|&r| (self.rooms[r].category, self.rooms[r].id));
        eligible
    }

    fn teacher_for(&self, subject: SubjectId) -> Option<TeacherId> {
        self.teachers.and_then(|t| t.get(subject))
    }

    /// Place `units` in placement order
    pub fn place(&self, mut units: Vec<TeachingUnit>) -> PlacementOutcome {
        placement_order(&mut units);

        let mut outcome = PlacementOutcome {
            occupancy: Occupancy::new(self.dates.len()),
            ..PlacementOutcome::default()
        };

        if self.dates.is_empty() || self.slots.is_empty() || self.rooms.is_empty() {
            outcome.unplaced = units;
            return outcome;
        }

        let by_kind: [Vec<usize>; 3] = [
            self.eligible_rooms(UnitKind::Lecture),
            self.eligible_rooms(UnitKind::Tutorial),
            self.eligible_rooms(UnitKind::Practical),
        ];

        for unit in units {
            let eligible = match unit.kind {
                UnitKind::Lecture => &by_kind[0],
                UnitKind::Tutorial => &by_kind[1],
                UnitKind::Practical => &by_kind[2],
            };
            match self.find_triple(&unit, eligible, &outcome.occupancy) {
                Some((date, slot, room)) => {
                    outcome.occupancy.book_class(
                        date,
                        slot,
                        room,
                        unit.subject_id,
                        self.teacher_for(unit.subject_id),
                        self.slots.len(),
                    );
                    trace!(
                        unit = %unit,
                        date = %self.dates[date],
                        slot,
                        room = %self.rooms[room].name,
                        "placed"
                    );
                    outcome.placed.push(self.placed_unit(unit, date, slot, room));
                }
                None => {
                    debug!(unit = %unit, "no free (date, slot, room) for unit");
                    outcome.unplaced.push(unit);
                }
            }
        }
        outcome
    }

    /// First triple passing every constraint, in rotation/search order
    fn find_triple(
        &self,
        unit: &TeachingUnit,
        eligible: &[usize],
        occ: &Occupancy,
    ) -> Option<(usize, usize, usize)> {
        if eligible.is_empty() {
            return None;
        }
        let days = self.dates.len();
        let slots = self.slots.len();
        let rotation = subject_hash(unit.subject_id) as usize % days;
        let teacher = if self.options.enforce_teacher_exclusivity {
            self.teacher_for(unit.subject_id)
        } else {
            None
        };

        for step in 0..days {
            let date = (rotation + step) % days;
            if occ.subject_load(unit.subject_id, date) >= self.options.max_per_subject_per_day {
                continue;
            }
            let start = occ.next_free(date).min(slots - 1);
            for offset in 0..slots {
                let slot = (start + offset) % slots;
                if self.options.single_class_per_slot && occ.is_day_slot_taken(date, slot) {
                    continue;
                }
                if teacher.is_some_and(|t| occ.is_teacher_busy(t, date, slot)) {
                    continue;
                }
                if let Some(&room) = eligible.iter().find(|&&r| !occ.is_room_busy(date, slot, r)) {
                    return Some((date, slot, room));
                }
            }
        }
        None
    }

    fn placed_unit(&self, unit: TeachingUnit, date: usize, slot: usize, room: usize) -> PlacedUnit {
        let time_slot = &self.slots[slot];
        PlacedUnit {
            subject_id: unit.subject_id,
            date_index: date,
            slot_index: slot,
            room_index: room,
            entry: ScheduleEntry {
                date: self.dates[date],
                start_time: time_slot.start_label(),
                end_time: time_slot.end_label(),
                room: self.rooms[room].name.clone(),
                subject: unit.subject_name,
                teacher: None,
                kind: EntryKind::Class(unit.kind),
                index: unit.index,
            },
        }
    }
}
