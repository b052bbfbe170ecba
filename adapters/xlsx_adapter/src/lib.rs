use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::{info, warn};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sentiment_core::domain::{Cell, Dataset};
use sentiment_core::ports::{PipelineError, Result, SpreadsheetWriter};
use std::borrow::Cow;
use std::path::Path;

const MAX_COLUMNS: usize = 16_384;
const MAX_ROWS: usize = 1_048_576;
/// Longest string a worksheet cell accepts, in characters
const MAX_STRING_CHARS: usize = 32_767;

/// How a cell is stored in the worksheet
#[derive(Debug, PartialEq)]
enum SheetValue<'a> {
    String(Cow<'a, str>),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Blank,
}

/// Excel serial dates start in 1900
fn in_excel_range(year: i32) -> bool {
    (1900..=9999).contains(&year)
}

/// Cuts a string to the worksheet cell limit on a char boundary
fn truncate_to_cell_limit(value: &str) -> &str {
    match value.char_indices().nth(MAX_STRING_CHARS) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Dates outside the Excel calendar are written as text
fn sheet_value(cell: &Cell) -> SheetValue<'_> {
    match cell {
        Cell::Text(value) => SheetValue::String(Cow::Borrowed(truncate_to_cell_limit(value))),
        Cell::Integer(value) => SheetValue::Number(*value as f64),
        Cell::Float(value) => SheetValue::Number(*value),
        Cell::Date(date) if in_excel_range(date.year()) => SheetValue::Date(*date),
        Cell::DateTime(dt) if in_excel_range(dt.year()) => SheetValue::DateTime(*dt),
        Cell::Date(_) | Cell::DateTime(_) => SheetValue::String(Cow::Owned(cell.as_text())),
        Cell::Empty => SheetValue::Blank,
    }
}

/// Spreadsheet writer adapter producing a single-sheet `.xlsx` workbook.
/// The header row comes first; no row-index column is written.
pub struct XlsxWriterAdapter {
    output_file: String,
}

impl XlsxWriterAdapter {
    pub fn new(output_file: String) -> Self {
        Self { output_file }
    }

    fn write_error(&self, message: impl ToString) -> PipelineError {
        PipelineError::Write {
            path: self.output_file.clone(),
            message: message.to_string(),
        }
    }

    fn build_workbook(&self, dataset: &Dataset) -> std::result::Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

        for (col, name) in dataset.columns().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
        }

        for (idx, row) in dataset.rows().iter().enumerate() {
            let row_num = idx as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                let col_num = col as u16;
                match sheet_value(cell) {
                    SheetValue::String(value) => {
                        if let Cell::Text(original) = cell {
                            if value.len() < original.len() {
                                warn!(
                                    "Truncated value in row {}, column '{}' to {} characters",
                                    row_num,
                                    dataset.columns()[col],
                                    MAX_STRING_CHARS
                                );
                            }
                        }
                        worksheet.write_string(row_num, col_num, value.as_ref())?;
                    }
                    SheetValue::Number(value) => {
                        worksheet.write_number(row_num, col_num, value)?;
                    }
                    SheetValue::Date(date) => {
                        worksheet.write_datetime_with_format(row_num, col_num, &date, &date_format)?;
                    }
                    SheetValue::DateTime(dt) => {
                        worksheet.write_datetime_with_format(row_num, col_num, &dt, &datetime_format)?;
                    }
                    SheetValue::Blank => {}
                }
            }
        }

        worksheet.autofit();
        Ok(workbook)
    }
}

impl SpreadsheetWriter for XlsxWriterAdapter {
    fn write(&self, dataset: &Dataset) -> Result<()> {
        // Header row plus data rows must fit the worksheet grid
        if dataset.columns().len() > MAX_COLUMNS || dataset.len() + 1 > MAX_ROWS {
            return Err(self.write_error("dataset exceeds worksheet dimensions"));
        }

        if let Some(parent) = Path::new(&self.output_file).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let mut workbook = self
            .build_workbook(dataset)
            .map_err(|e| self.write_error(e))?;
        workbook
            .save(&self.output_file)
            .map_err(|e| self.write_error(e))?;

        info!("Wrote {} rows to {}", dataset.len(), self.output_file);
        Ok(())
    }
}
