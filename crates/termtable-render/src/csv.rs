//! CSV export
//!
//! One row per schedule entry, in display order. Fields containing the
//! delimiter, quotes or line breaks are quoted with doubled inner quotes.

use crate::display_order;
use termtable_core::{EntryKind, RenderError, Renderer, Schedule, ScheduleEntry};

const HEADER: [&str; 9] = [
    "date", "start_time", "end_time", "room", "subject", "teacher", "kind", "component", "index",
];

/// CSV renderer
#[derive(Clone, Debug)]
pub struct CsvRenderer {
    pub delimiter: char,
    pub include_header: bool,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl CsvRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter (e.g. `;` or `\t`)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn no_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn field(&self, value: &str) -> String {
        if value.contains(self.delimiter) || value.contains(['"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn row(&self, entry: &ScheduleEntry) -> Vec<String> {
        let kind = match entry.kind {
            EntryKind::Class(_) => "class",
            EntryKind::Free => "free",
            EntryKind::Extra(_) => "extra",
        };
        let component = entry.kind.unit_kind().map(|k| k.code().to_string()).unwrap_or_default();
        vec![
            entry.date.to_string(),
            entry.start_time.clone(),
            entry.end_time.clone(),
            entry.room.clone(),
            entry.subject.clone(),
            entry.teacher.clone().unwrap_or_default(),
            kind.to_string(),
            component,
            entry.index.to_string(),
        ]
    }

    fn push_line(&self, output: &mut String, fields: impl IntoIterator<Item = String>) {
        let line: Vec<String> = fields.into_iter().map(|f| self.field(&f)).collect();
        output.push_str(&line.join(&self.delimiter.to_string()));
        output.push('\n');
    }
}

impl Renderer for CsvRenderer {
    type Output = String;

    fn render(&self, schedule: &Schedule) -> Result<String, RenderError> {
        if self.delimiter == '"' || self.delimiter == '\n' {
            return Err(RenderError::Format(format!("invalid delimiter {:?}", self.delimiter)));
        }

        let mut output = String::new();
        if self.include_header {
            self.push_line(&mut output, HEADER.iter().map(|h| (*h).to_string()));
        }
        for entry in display_order(schedule) {
            self.push_line(&mut output, self.row(entry));
        }
        Ok(output)
    }
}
