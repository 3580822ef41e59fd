//! Per-run booking state.
//!
//! Everything is keyed by positions into the run's date, slot and room lists.
//! One value lives for one scheduling call; the placement engine fills it and
//! hands it to the gap filler, which keeps booking advisory rows into it.

use std::collections::{HashMap, HashSet};
use termtable_core::{SubjectId, TeacherId};

#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    /// (date, slot) pairs that already show a class or FREE row
    visible: HashSet<(usize, usize)>,
    /// (date, slot, room) triples holding any row
    rooms: HashSet<(usize, usize, usize)>,
    /// Units per (subject, date)
    subject_day: HashMap<(SubjectId, usize), u32>,
    /// (teacher, date, slot) bookings
    teachers: HashSet<(TeacherId, usize, usize)>,
    /// Earliest slot worth trying first on each date
    next_free: Vec<usize>,
}

impl Occupancy {
    pub fn new(days: usize) -> Self {
        Self {
            next_free: vec![0; days],
            ..Self::default()
        }
    }

    pub fn is_day_slot_taken(&self, date: usize, slot: usize) -> bool {
        self.visible.contains(&(date, slot))
    }

    pub fn is_room_busy(&self, date: usize, slot: usize, room: usize) -> bool {
        self.rooms.contains(&(date, slot, room))
    }

    pub fn subject_load(&self, subject: SubjectId, date: usize) -> u32 {
        self.subject_day.get(&(subject, date)).copied().unwrap_or(0)
    }

    pub fn is_teacher_busy(&self, teacher: TeacherId, date: usize, slot: usize) -> bool {
        self.teachers.contains(&(teacher, date, slot))
    }

    pub fn next_free(&self, date: usize) -> usize {
        self.next_free.get(date).copied().unwrap_or(0)
    }

    /// Record a placed class and move the day's pointer past taken slots
    pub fn book_class(
        &mut self,
        date: usize,
        slot: usize,
        room: usize,
        subject: SubjectId,
        teacher: Option<TeacherId>,
        slots_per_day: usize,
    ) {
        self.visible.insert((date, slot));
        self.rooms.insert((date, slot, room));
        *self.subject_day.entry((subject, date)).or_insert(0) += 1;
        if let Some(teacher) = teacher {
            self.teachers.insert((teacher, date, slot));
        }

        let mut next = slot + 1;
        while next < slots_per_day && self.visible.contains(&(date, next)) {
            next += 1;
        }
        if let Some(pointer) = self.next_free.get_mut(date) {
            *pointer = next.min(slots_per_day.saturating_sub(1));
        }
    }

    /// Record an advisory row; FREE rows are visible, EXTRA rows are not
    pub fn book_marker(&mut self, date: usize, slot: usize, room: usize, visible: bool) {
        if visible {
            self.visible.insert((date, slot));
        }
        self.rooms.insert((date, slot, room));
    }

    /// Number of booked (date, slot, room) triples
    pub fn booked_rooms(&self) -> usize {
        self.rooms.len()
    }
}
