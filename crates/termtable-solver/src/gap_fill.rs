//! Gap Filler
//!
//! Adds advisory rows to a placed schedule:
//! - FREE: at most one per teaching date, in the first day-slot without a class.
//! - EXTRA: one per declared unit the placement engine did not fit.
//!
//! Both kinds book into the run's `Occupancy`, so no advisory row ever shares a
//! (date, slot, room) triple with another row.

use crate::occupancy::Occupancy;
use chrono::NaiveDate;
use std::collections::HashMap;
use termtable_core::{
    EntryKind, Room, ScheduleEntry, Subject, TimeSlot, UnitKind, EXTRA_PREFIX, FREE_SUBJECT,
    PLACEHOLDER_TEACHER,
};
use tracing::debug;

pub struct GapFiller<'a> {
    dates: &'a [NaiveDate],
    slots: &'a [TimeSlot],
    rooms: &'a [Room],
}

impl<'a> GapFiller<'a> {
    pub fn new(dates: &'a [NaiveDate], slots: &'a [TimeSlot], rooms: &'a [Room]) -> Self {
        Self { dates, slots, rooms }
    }

    fn entry(
        &self,
        date: usize,
        slot: usize,
        room: usize,
        subject: String,
        teacher: Option<String>,
        kind: EntryKind,
    ) -> ScheduleEntry {
        let time_slot = &self.slots[slot];
        ScheduleEntry {
            date: self.dates[date],
            start_time: time_slot.start_label(),
            end_time: time_slot.end_label(),
            room: self.rooms[room].name.clone(),
            subject,
            teacher,
            kind,
            index: 0,
        }
    }

    /// One FREE row per date, in the first idle day-slot (slots, then rooms, in order)
    pub fn free_markers(&self, occupancy: &mut Occupancy) -> Vec<ScheduleEntry> {
        let mut rows = Vec::new();
        for date in 0..self.dates.len() {
            let idle = (0..self.slots.len())
                .filter(|&slot| !occupancy.is_day_slot_taken(date, slot))
                .find_map(|slot| {
                    (0..self.rooms.len())
                        .find(|&room| !occupancy.is_room_busy(date, slot, room))
                        .map(|room| (slot, room))
                });
            if let Some((slot, room)) = idle {
                occupancy.book_marker(date, slot, room, true);
                rows.push(self.entry(
                    date,
                    slot,
                    room,
                    FREE_SUBJECT.to_string(),
                    Some(PLACEHOLDER_TEACHER.to_string()),
                    EntryKind::Free,
                ));
            }
        }
        rows
    }

    /// EXTRA rows for declared hours exceeding placed classes.
    ///
    /// Placed classes are matched to subjects by name. Rows are anchored at the
    /// last date, last slot and last room, walking backwards to the next free
    /// triple; when none is left the advisory is dropped.
    pub fn extra_markers(
        &self,
        subjects: &[Subject],
        placed: &[ScheduleEntry],
        occupancy: &mut Occupancy,
    ) -> Vec<ScheduleEntry> {
        let mut counts: HashMap<(&str, UnitKind), u32> = HashMap::new();
        for entry in placed {
            if let EntryKind::Class(kind) = entry.kind {
                *counts.entry((entry.subject.as_str(), kind)).or_insert(0) += 1;
            }
        }

        let (days, slots, rooms) = (self.dates.len(), self.slots.len(), self.rooms.len());
        let mut candidates = (0..days).rev().flat_map(move |d| {
            (0..slots).rev().flat_map(move |s| (0..rooms).rev().map(move |r| (d, s, r)))
        });

        let mut rows = Vec::new();
        for subject in subjects {
            for kind in UnitKind::ALL {
                let have = counts.get(&(subject.name.as_str(), kind)).copied().unwrap_or(0);
                let missing = subject.hours(kind).saturating_sub(have);
                for _ in 0..missing {
                    let free = candidates.find(|&(d, s, r)| !occupancy.is_room_busy(d, s, r));
                    let Some((date, slot, room)) = free else {
                        debug!(subject = %subject.name, %kind, "no room left for EXTRA advisory");
                        continue;
                    };
                    occupancy.book_marker(date, slot, room, false);
                    rows.push(self.entry(
                        date,
                        slot,
                        room,
                        format!("{} {}", EXTRA_PREFIX, subject.name),
                        None,
                        EntryKind::Extra(kind),
                    ));
                }
            }
        }
        rows
    }
}
