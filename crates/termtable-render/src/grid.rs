//! Weekly timetable grid
//!
//! Renders weekday rows (Monday to Saturday) against slot columns as a
//! Markdown table. Each cell shows `Subject (K)` for the first visible entry
//! on that weekday and slot.
//!
//! ## Example Output
//!
//! ```text
//! | Day | 09:00-10:00 | 10:00-11:00 |
//! |-----|-------------|-------------|
//! | Monday | Maths (L) | FREE |
//! | Tuesday | Physics (P) | - |
//! ```

use crate::cell_label;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;
use termtable_core::{RenderError, Renderer, Schedule, ScheduleEntry, TimeSlot};

const WEEKDAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Markdown grid renderer
#[derive(Clone, Debug)]
pub struct GridRenderer {
    /// One table per calendar week instead of a single term-wide template
    pub per_week: bool,
    /// Text for cells without an entry
    pub empty_cell: String,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self {
            per_week: false,
            empty_cell: "-".into(),
        }
    }
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split the grid by calendar week (weeks start on Monday)
    pub fn weekly(mut self) -> Self {
        self.per_week = true;
        self
    }

    /// Set the placeholder for empty cells
    pub fn empty_cell(mut self, text: impl Into<String>) -> Self {
        self.empty_cell = text.into();
        self
    }

    /// Markdown treats `|` as a column separator
    fn escape(text: &str) -> String {
        text.replace('|', "\\|")
    }

    fn column_label(slot: &TimeSlot) -> String {
        format!("{}-{}", slot.start.format("%H:%M"), slot.end.format("%H:%M"))
    }

    fn matches_slot(entry: &ScheduleEntry, slot: &TimeSlot) -> bool {
        entry.start_time == slot.start_label() && entry.end_time == slot.end_label()
    }

    fn table(&self, slots: &[TimeSlot], entries: &[&ScheduleEntry]) -> String {
        let mut output = String::new();

        output.push_str("| Day |");
        for slot in slots {
            output.push_str(&format!(" {} |", Self::column_label(slot)));
        }
        output.push('\n');

        output.push_str("|-----|");
        for slot in slots {
            output.push_str(&format!("{}|", "-".repeat(Self::column_label(slot).len() + 2)));
        }
        output.push('\n');

        for weekday in WEEKDAYS {
            output.push_str(&format!("| {} |", weekday_name(weekday)));
            for slot in slots {
                let cell = entries
                    .iter()
                    .find(|e| e.date.weekday() == weekday && Self::matches_slot(e, slot))
                    .map_or_else(|| self.empty_cell.clone(), |e| Self::escape(&cell_label(e)));
                output.push_str(&format!(" {} |", cell));
            }
            output.push('\n');
        }

        output
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

impl Renderer for GridRenderer {
    type Output = String;

    fn render(&self, schedule: &Schedule) -> Result<String, RenderError> {
        if schedule.slots.is_empty() {
            return Err(RenderError::InvalidData("No time slots to render".into()));
        }

        // Entry order is kept so classes win over FREE rows in shared cells
        let visible: Vec<&ScheduleEntry> =
            schedule.entries.iter().filter(|e| e.kind.is_visible()).collect();

        if !self.per_week {
            return Ok(self.table(&schedule.slots, &visible));
        }

        let mut weeks: BTreeMap<NaiveDate, Vec<&ScheduleEntry>> = BTreeMap::new();
        for date in &schedule.teaching_dates {
            weeks.entry(week_start(*date)).or_default();
        }
        for &entry in &visible {
            weeks.entry(week_start(entry.date)).or_default().push(entry);
        }

        let mut output = String::new();
        for (i, (monday, entries)) in weeks.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!("### Week of {}\n\n", monday));
            output.push_str(&self.table(&schedule.slots, entries));
        }
        Ok(output)
    }
}
