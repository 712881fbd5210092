//! Sheet record parsing
//!
//! Each section is read from a fixed range and mapped purely by column offset.
//! The values API drops trailing blank cells and rows, so a cell that is not
//! present reads as blank text rather than an error.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::RecordError;
use crate::records::{ApplicationEvent, ClassificationCode, CoverPage};
use crate::source::FormattedCell;

/// Date layouts accepted in the events tab, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

fn cell(matrix: &[Vec<String>], row: usize, column: usize) -> String {
    matrix
        .get(row)
        .and_then(|cells| cells.get(column))
        .cloned()
        .unwrap_or_default()
}

/// Cover page from `Cover Page!B1:B3`: title, patent number, inventor.
pub fn parse_cover_page(matrix: &[Vec<String>], prepared_by: &str) -> CoverPage {
    CoverPage {
        title: cell(matrix, 0, 0),
        prepared_by: prepared_by.to_string(),
        inventor: cell(matrix, 2, 0),
        patent_no: cell(matrix, 1, 0),
    }
}

pub fn parse_abstract(matrix: &[Vec<String>]) -> String {
    cell(matrix, 0, 0)
}

/// Code in column 0, definition in column 1. Fully blank rows are skipped.
pub fn parse_classification_codes(matrix: &[Vec<String>]) -> Vec<ClassificationCode> {
    matrix
        .iter()
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|cells| ClassificationCode {
            code: cells.first().cloned().unwrap_or_default(),
            definition: cells.get(1).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Events from the formatted `Application Events` rows.
///
/// Rows that do not carry exactly a date and a status cell are skipped. The
/// status cell's hyperlink, if any, becomes the event link.
pub fn parse_application_events(
    rows: &[Vec<FormattedCell>],
) -> Result<Vec<ApplicationEvent>, RecordError> {
    let mut events = Vec::with_capacity(rows.len());

    for (row, cells) in rows.iter().enumerate() {
        let [date, status] = cells.as_slice() else {
            debug!(row, cells = cells.len(), "Skipping application event row");
            continue;
        };

        let raw_date = date.formatted_value.clone().unwrap_or_default();
        let date = parse_date(&raw_date).ok_or_else(|| RecordError::InvalidDate {
            row,
            value: raw_date.clone(),
        })?;

        events.push(ApplicationEvent {
            date,
            status: status.formatted_value.clone().unwrap_or_default(),
            hyperlink: status.hyperlink.clone(),
        });
    }

    Ok(events)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
