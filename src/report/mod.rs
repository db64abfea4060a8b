//! Spreadsheet reports built from [`LogEntry`] sequences.
//!
//! A [`ReportWriter`] moves through `Created -> HeaderWritten -> DataWritten`
//! by value, so writing data before the header or saving before the data
//! does not compile.

pub mod sheet;
pub mod xlsx;

use crate::error::Result;
use crate::model::{LogEntry, ReportKind};
use chrono::{DateTime, Local};
use sheet::{Borders, Cell, CellStyle, Sheet};
use std::marker::PhantomData;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BASE_COLUMNS: [&str; 5] = ["Date", "Commit-ID", "Message", "Author", "Changed files"];
const IMPACT_COLUMNS: [&str; 2] = ["Affected testcases", "Tested with version"];

// Positions within BASE_COLUMNS
const ID_COLUMN: usize = 1;
const MESSAGE_COLUMN: usize = 2;
const FILES_COLUMN: usize = 4;

/// Column headers for one report kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    headers: Vec<&'static str>,
}

impl ColumnSet {
    pub fn for_kind(kind: ReportKind) -> Self {
        let mut headers = BASE_COLUMNS.to_vec();
        if kind == ReportKind::Impact {
            headers.extend(IMPACT_COLUMNS);
        }
        Self { headers }
    }

    pub fn headers(&self) -> &[&'static str] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

pub struct Created;
pub struct HeaderWritten;
pub struct DataWritten;

pub struct ReportWriter<S> {
    kind: ReportKind,
    columns: ColumnSet,
    sheet: Sheet,
    _state: PhantomData<S>,
}

impl<S> ReportWriter<S> {
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    fn advance<T>(self) -> ReportWriter<T> {
        ReportWriter {
            kind: self.kind,
            columns: self.columns,
            sheet: self.sheet,
            _state: PhantomData,
        }
    }
}

impl ReportWriter<Created> {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            columns: ColumnSet::for_kind(kind),
            sheet: Sheet::new(),
            _state: PhantomData,
        }
    }

    /// Title row, a spacer row and the column header row.
    pub fn write_header(mut self, generated_at: DateTime<Local>) -> ReportWriter<HeaderWritten> {
        self.sheet.append_row(vec![
            Cell::plain(self.kind.title()),
            Cell::plain(format!("Generated on {}", generated_at.format(TIMESTAMP_FORMAT))),
        ]);
        self.sheet.append_row(Vec::new());

        let style = CellStyle {
            bold: true,
            fill: true,
            borders: Borders::all(),
            ..CellStyle::default()
        };
        let header = self
            .columns
            .headers()
            .iter()
            .map(|h| Cell::new(*h, style))
            .collect();
        self.sheet.append_row(header);
        self.sheet.freeze_rows(self.sheet.len() as u32);

        self.advance()
    }
}

impl ReportWriter<HeaderWritten> {
    /// One row per entry, then the closing bottom border on the last row.
    pub fn write_data<I>(mut self, entries: I) -> ReportWriter<DataWritten>
    where
        I: IntoIterator<Item = LogEntry>,
    {
        let first_data_row = self.sheet.len();
        for entry in entries {
            let row = self.data_row(entry);
            self.sheet.append_row(row);
        }

        let last = self.sheet.len() - 1;
        if last >= first_data_row {
            if let Some(cells) = self.sheet.row_mut(last) {
                for cell in cells.iter_mut() {
                    cell.style.borders.bottom = true;
                }
            }
        }

        self.advance()
    }

    fn data_row(&self, entry: LogEntry) -> Vec<Cell> {
        let base = CellStyle {
            align_top: true,
            borders: Borders::sides(),
            ..CellStyle::default()
        };

        let mut values = vec![
            entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            entry.id,
            entry.message,
            entry.author,
            entry.changed_files.join("\n"),
        ];
        values.resize(self.columns.len(), String::new());

        values
            .into_iter()
            .enumerate()
            .map(|(col, text)| {
                let mut style = base;
                match col {
                    ID_COLUMN => style.monospace = true,
                    MESSAGE_COLUMN => {
                        style.wrap = true;
                        style.small_font = true;
                    }
                    FILES_COLUMN => style.wrap = true,
                    _ => {}
                }
                Cell::new(text, style)
            })
            .collect()
    }
}

impl ReportWriter<DataWritten> {
    pub fn save(&self, destination: &Path) -> Result<()> {
        xlsx::save(&self.sheet, destination)
    }
}
