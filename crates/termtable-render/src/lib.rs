//! # termtable-render
//!
//! Rendering backends for termtable schedules.
//!
//! This crate provides:
//! - Plain-text listing grouped by date (with legend and unplaced summary)
//! - Weekly timetable grid as a Markdown table
//! - CSV export for spreadsheet tools
//!
//! ## Example
//!
//! ```rust,ignore
//! use termtable_core::Renderer;
//! use termtable_render::{CsvRenderer, GridRenderer, TextRenderer};
//!
//! let listing = TextRenderer::new().render(&schedule)?;
//! let grid = GridRenderer::new().weekly().render(&schedule)?;
//! let csv = CsvRenderer::new().render(&schedule)?;
//! ```

pub mod csv;
pub mod grid;

pub use csv::CsvRenderer;
pub use grid::GridRenderer;

use chrono::NaiveDate;
use termtable_core::{EntryKind, RenderError, Renderer, Schedule, ScheduleEntry};

/// Label used in listings and grids: `Subject (K)`, or just `FREE`
pub fn cell_label(entry: &ScheduleEntry) -> String {
    match entry.kind {
        EntryKind::Free => entry.subject.clone(),
        kind => format!("{} ({})", entry.subject, kind.code()),
    }
}

/// Entries ordered for display: by date, start time, room, then subject
pub fn display_order(schedule: &Schedule) -> Vec<&ScheduleEntry> {
    let mut entries: Vec<&ScheduleEntry> = schedule.entries.iter().collect();
    entries.sort_by(|a, b| {
        (a.date, &a.start_time, &a.room, &a.subject)
            .cmp(&(b.date, &b.start_time, &b.room, &b.subject))
    });
    entries
}

/// Chronological plain-text listing
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Print the subject → teacher legend after the listing
    pub show_legend: bool,
    /// Print FREE and EXTRA rows
    pub show_advisories: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_advisories: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit the legend section
    pub fn no_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    /// Only list placed classes
    pub fn classes_only(mut self) -> Self {
        self.show_advisories = false;
        self
    }

    fn format_row(entry: &ScheduleEntry, room_width: usize, label_width: usize) -> String {
        let teacher = entry.teacher.as_deref().unwrap_or("");
        let index = match entry.kind {
            EntryKind::Class(_) => format!("#{}", entry.index),
            _ => String::new(),
        };
        format!(
            "  {}-{}  {:<room_width$}  {:<label_width$}  {:<4}{}",
            entry.start_time,
            entry.end_time,
            entry.room,
            cell_label(entry),
            index,
            teacher,
        )
        .trim_end()
        .to_string()
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, schedule: &Schedule) -> Result<String, RenderError> {
        let entries: Vec<&ScheduleEntry> = display_order(schedule)
            .into_iter()
            .filter(|e| self.show_advisories || !e.kind.is_advisory())
            .collect();

        let mut output = String::new();

        // Header
        match (schedule.teaching_dates.first(), schedule.teaching_dates.last()) {
            (Some(first), Some(last)) => output.push_str(&format!(
                "Timetable {} .. {} ({} teaching days)\n",
                first,
                last,
                schedule.teaching_dates.len()
            )),
            _ => output.push_str("Timetable\n"),
        }

        if entries.is_empty() {
            output.push_str("\nNo entries.\n");
        }

        let room_width = entries.iter().map(|e| e.room.chars().count()).max().unwrap_or(0);
        let label_width = entries.iter().map(|e| cell_label(e).chars().count()).max().unwrap_or(0);

        let mut current: Option<NaiveDate> = None;
        for entry in &entries {
            if current != Some(entry.date) {
                output.push_str(&format!("\n{} {}\n", entry.date, entry.date.format("%A")));
                current = Some(entry.date);
            }
            output.push_str(&Self::format_row(entry, room_width, label_width));
            output.push('\n');
        }

        if self.show_legend && !schedule.legend.is_empty() {
            output.push_str("\nLegend\n");
            for (subject, teacher) in &schedule.legend {
                output.push_str(&format!("  {}: {}\n", subject, teacher));
            }
        }

        if !schedule.unplaced.is_empty() {
            output.push_str(&format!("\nUnplaced ({})\n", schedule.unplaced.len()));
            for unit in &schedule.unplaced {
                output.push_str(&format!("  {}\n", unit));
            }
        }

        Ok(output)
    }
}
