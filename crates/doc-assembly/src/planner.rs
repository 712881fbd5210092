//! Patent report planner
//!
//! Renders the fixed report template as positional edit operations:
//!
//! 1. Cover: banner, title, prepared-by / inventor / patent number, page break
//! 2. Abstract: heading plus a 2x1 table (header row, body row)
//! 3. Classification codes: heading plus a code / definition table
//! 4. Claims: heading plus a nested numbered list
//! 5. Application events: heading plus a date / status table
//!
//! A table's inserted length is confirmed by reading the document back, so
//! each table ends a phase. The next phase starts from the read-back end
//! offset, not from the simulated cursor.

use patent_records::claims::flatten_claims;
use patent_records::{ApplicationEvent, Claim, ClassificationCode, CoverPage, PatentRecords};
use tracing::debug;

use crate::cursor::OffsetTracker;
use crate::editor::ContentBoundary;
use crate::error::PlanError;
use crate::operations::{EditBatch, EditOperation, ParagraphStyle, Range, TextStyle};
use crate::styles::{self, PlannerConfig, Rgb};
use crate::table::{CellWriter, TableAnchor};

const ABSTRACT_HEADING: &str = "Abstract";
const CODES_HEADING: &str = "Relevant Classification Codes";
const CLAIMS_HEADING: &str = "Claims";
const EVENTS_HEADING: &str = "Application Events";

const CODES_COLUMNS: [&str; 2] = ["USC Codes", "Definitions"];
const EVENTS_COLUMNS: [&str; 2] = ["Date", "Status"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One executor round-trip of the report, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    CoverAndAbstract,
    ClassificationCodes,
    Claims,
    ApplicationEvents,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::CoverAndAbstract,
        Phase::ClassificationCodes,
        Phase::Claims,
        Phase::ApplicationEvents,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::CoverAndAbstract => "cover_and_abstract",
            Phase::ClassificationCodes => "classification_codes",
            Phase::Claims => "claims",
            Phase::ApplicationEvents => "application_events",
        }
    }
}

/// Batch that empties the body, or `None` when it holds nothing but the
/// implicit start and end markers.
pub fn plan_clear(boundaries: &[ContentBoundary]) -> Option<EditBatch> {
    if boundaries.len() <= 2 {
        return None;
    }
    let last_end = boundaries.last()?.end_index;
    let range = Range::new(1, last_end.saturating_sub(1));
    if range.is_empty() {
        return None;
    }

    let mut batch = EditBatch::new();
    batch.push(EditOperation::delete_range(range));
    Some(batch)
}

/// Authoritative write position after a read-back: just before the body's
/// final newline.
pub fn end_offset(boundaries: &[ContentBoundary]) -> Result<u32, PlanError> {
    boundaries
        .last()
        .map(|last| last.end_index.saturating_sub(1))
        .ok_or(PlanError::EmptyDocument)
}

/// Emits operations for one phase, moving the shared cursor for every one.
struct SectionWriter<'a> {
    cursor: &'a mut OffsetTracker,
    batch: EditBatch,
}

impl<'a> SectionWriter<'a> {
    fn new(cursor: &'a mut OffsetTracker) -> Self {
        Self {
            cursor,
            batch: EditBatch::new(),
        }
    }

    /// Insert `text` as-is; returns the inserted span.
    fn text(&mut self, text: &str, style: Option<TextStyle>) -> Range {
        let at = self.cursor.advance_text(text);
        self.insert(at, text.to_string(), style)
    }

    /// Insert `text` plus a newline; the span covers the newline too.
    fn line(&mut self, text: &str, style: Option<TextStyle>) -> Range {
        let at = self.cursor.advance_line(text);
        self.insert(at, format!("{text}\n"), style)
    }

    fn insert(&mut self, at: u32, text: String, style: Option<TextStyle>) -> Range {
        let range = Range::new(at, self.cursor.current());
        if range.is_empty() {
            return range;
        }
        self.batch.push(EditOperation::insert_text(at, text));
        if let Some(style) = style {
            self.batch.push(EditOperation::text_style(range, style));
        }
        range
    }

    fn line_breaks(&mut self, count: u32) -> Range {
        let start = self.cursor.current();
        for _ in 0..count {
            let at = self.cursor.advance_break();
            self.batch.push(EditOperation::line_break(at));
        }
        Range::new(start, self.cursor.current())
    }

    fn page_break(&mut self) {
        let at = self.cursor.advance_break();
        self.batch.push(EditOperation::page_break(at));
    }

    fn image(&mut self, uri: &str) {
        let at = self.cursor.advance_break();
        self.batch.push(EditOperation::inline_image(at, uri));
    }

    fn paragraph_style(&mut self, range: Range, style: ParagraphStyle) {
        if !range.is_empty() {
            self.batch.push(EditOperation::paragraph_style(range, style));
        }
    }

    /// Document title, centered. No trailing newline.
    fn title(&mut self, text: &str) {
        let range = self.text(text, None);
        self.paragraph_style(range, styles::centered_title());
    }

    /// Bold section heading on its own line.
    fn heading(&mut self, text: &str) {
        let range = self.line(text, Some(styles::bold()));
        let heading = Range::new(range.start_index, range.end_index - 1);
        self.paragraph_style(heading, styles::named(styles::HEADING_2));
    }

    /// Insert an empty table; content goes through the returned writer.
    fn table(&mut self, rows: u32, columns: u32) -> CellWriter {
        let at = self.cursor.advance_table(rows, columns);
        let anchor = TableAnchor::new(at, rows, columns);
        self.batch.push(anchor.insert_operation());
        CellWriter::new(anchor)
    }

    /// Fill every cell of the header row.
    fn header_background(&mut self, anchor: TableAnchor, color: Rgb) {
        for column in 0..anchor.columns {
            self.batch.push(anchor.cell_background(0, column, color));
        }
    }

    fn finish(self) -> EditBatch {
        self.batch
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentEditPlanner {
    config: PlannerConfig,
}

impl DocumentEditPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn plan_phase(
        &self,
        phase: Phase,
        cursor: &mut OffsetTracker,
        records: &PatentRecords,
    ) -> Result<EditBatch, PlanError> {
        let batch = match phase {
            Phase::CoverAndAbstract => {
                self.plan_cover_and_abstract(cursor, &records.cover_page, &records.abstract_text)?
            }
            Phase::ClassificationCodes => {
                self.plan_classification_codes(cursor, &records.classification_codes)?
            }
            Phase::Claims => self.plan_claims(cursor, &records.claims),
            Phase::ApplicationEvents => {
                self.plan_application_events(cursor, &records.application_events)?
            }
        };
        debug!(
            phase = phase.name(),
            operations = batch.len(),
            cursor = cursor.current(),
            "Planned phase"
        );
        Ok(batch)
    }

    /// Cover page followed by the abstract table.
    pub fn plan_cover_and_abstract(
        &self,
        cursor: &mut OffsetTracker,
        cover: &CoverPage,
        abstract_text: &str,
    ) -> Result<EditBatch, PlanError> {
        let mut w = SectionWriter::new(cursor);

        w.image(&self.config.banner_image_uri);
        w.line_breaks(self.config.leading_blank_lines);
        w.title(&cover.title);

        // The title paragraph owns the first spacer newline, so the
        // normal-text span starts one past it.
        let spacer = w.line_breaks(self.config.spacer_lines);
        w.paragraph_style(
            Range::new(spacer.start_index + 1, spacer.end_index + 1),
            styles::named(styles::NORMAL_TEXT),
        );

        for (label, value) in [
            ("Prepared by: ", &cover.prepared_by),
            ("Inventor: ", &cover.inventor),
            ("Patent No: ", &cover.patent_no),
        ] {
            w.text(label, Some(styles::cover_label()));
            w.line(value, Some(styles::cover_value()));
        }
        w.page_break();

        w.heading(ABSTRACT_HEADING);
        let mut cells = w.table(2, 1);
        w.header_background(cells.anchor(), styles::ABSTRACT_HEADER);
        cells.write(&mut w.batch, ABSTRACT_HEADING, styles::bold())?;
        cells.write(&mut w.batch, abstract_text, styles::abstract_body())?;

        Ok(w.finish())
    }

    pub fn plan_classification_codes(
        &self,
        cursor: &mut OffsetTracker,
        codes: &[ClassificationCode],
    ) -> Result<EditBatch, PlanError> {
        let mut w = SectionWriter::new(cursor);

        w.page_break();
        w.heading(CODES_HEADING);

        let mut cells = w.table(codes.len() as u32 + 1, 2);
        w.header_background(cells.anchor(), styles::CODES_HEADER);
        for header in CODES_COLUMNS {
            cells.write(&mut w.batch, header, styles::body_bold())?;
        }
        for code in codes {
            cells.write(&mut w.batch, &code.code, styles::body())?;
            cells.write(&mut w.batch, &code.definition, styles::body())?;
        }

        Ok(w.finish())
    }

    /// Claims as tab-indented lines promoted to one nested numbered list.
    ///
    /// The displayed nesting comes from the leading tabs alone.
    pub fn plan_claims(&self, cursor: &mut OffsetTracker, claims: &[Claim]) -> EditBatch {
        let mut w = SectionWriter::new(cursor);

        w.page_break();
        w.heading(CLAIMS_HEADING);

        let list_start = w.cursor.current();
        for claim in flatten_claims(claims) {
            let line = format!("{}{}", "\t".repeat(claim.level.depth()), claim.content);
            w.line(&line, Some(styles::body_bold()));
        }

        let list = Range::new(list_start, w.cursor.current());
        if !list.is_empty() {
            w.batch
                .push(EditOperation::bullets(list, styles::NUMBERED_DECIMAL_NESTED));
        }

        w.finish()
    }

    pub fn plan_application_events(
        &self,
        cursor: &mut OffsetTracker,
        events: &[ApplicationEvent],
    ) -> Result<EditBatch, PlanError> {
        let mut w = SectionWriter::new(cursor);

        w.heading(EVENTS_HEADING);

        let mut cells = w.table(events.len() as u32 + 1, 2);
        w.header_background(cells.anchor(), styles::EVENTS_HEADER);
        for header in EVENTS_COLUMNS {
            cells.write(&mut w.batch, header, styles::body_bold())?;
        }
        for event in events {
            let date = event.date.format(DATE_FORMAT).to_string();
            cells.write(&mut w.batch, &date, styles::body())?;
            cells.write(
                &mut w.batch,
                &event.status,
                styles::event_status(event.hyperlink.as_deref()),
            )?;
        }

        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{InsertTable, UpdateTextStyle};
    use chrono::NaiveDate;
    use patent_records::ClaimLevel;
    use pretty_assertions::assert_eq;

    fn boundary(start: u32, end: u32) -> ContentBoundary {
        ContentBoundary {
            start_index: Some(start),
            end_index: end,
        }
    }

    fn tables(batch: &EditBatch) -> Vec<InsertTable> {
        batch
            .operations()
            .iter()
            .filter_map(|op| match op {
                EditOperation::InsertTable(table) => Some(*table),
                _ => None,
            })
            .collect()
    }

    fn text_styles(batch: &EditBatch) -> Vec<&UpdateTextStyle> {
        batch
            .operations()
            .iter()
            .filter_map(|op| match op {
                EditOperation::UpdateTextStyle(style) => Some(style),
                _ => None,
            })
            .collect()
    }

    fn event(day: u32, status: &str, hyperlink: Option<&str>) -> ApplicationEvent {
        ApplicationEvent {
            date: NaiveDate::from_ymd_opt(2021, 3, day).unwrap(),
            status: status.to_string(),
            hyperlink: hyperlink.map(str::to_string),
        }
    }

    #[test]
    fn test_clear_is_noop_for_empty_document() {
        assert_eq!(plan_clear(&[boundary(0, 1), boundary(1, 2)]), None);
    }

    #[test]
    fn test_clear_deletes_whole_body() {
        let batch = plan_clear(&[boundary(0, 1), boundary(1, 20), boundary(20, 45)]).unwrap();
        assert_eq!(
            batch.operations(),
            &[EditOperation::delete_range(Range::new(1, 44))]
        );
    }

    #[test]
    fn test_end_offset_reads_last_boundary() {
        assert_eq!(end_offset(&[boundary(0, 1), boundary(1, 58)]), Ok(57));
        assert_eq!(end_offset(&[]), Err(PlanError::EmptyDocument));
    }

    #[test]
    fn test_cover_and_abstract_offsets() {
        let planner = DocumentEditPlanner::default();
        let cover = CoverPage {
            title: "Widget".into(),
            prepared_by: "Agent Name".into(),
            inventor: "Ada".into(),
            patent_no: "US1".into(),
        };
        let mut cursor = OffsetTracker::default();

        let batch = planner
            .plan_cover_and_abstract(&mut cursor, &cover, "Body")
            .unwrap();

        assert_eq!(
            batch.operations()[0],
            EditOperation::inline_image(1, styles::DEFAULT_BANNER_IMAGE_URI)
        );
        let inserted = batch.inserted_text();
        assert!(inserted.contains(&(5, "Widget")));
        assert!(inserted.contains(&(23, "Prepared by: ")));
        assert!(inserted.contains(&(36, "Agent Name\n")));
        assert!(inserted.contains(&(47, "Inventor: ")));
        assert!(inserted.contains(&(72, "US1\n")));
        assert!(batch
            .operations()
            .contains(&EditOperation::page_break(76)));
        assert!(batch.operations().contains(&EditOperation::paragraph_style(
            Range::new(5, 11),
            styles::centered_title()
        )));
        assert!(batch.operations().contains(&EditOperation::paragraph_style(
            Range::new(12, 24),
            styles::named(styles::NORMAL_TEXT)
        )));
        assert!(batch.operations().contains(&EditOperation::paragraph_style(
            Range::new(77, 85),
            styles::named(styles::HEADING_2)
        )));

        let table = tables(&batch);
        assert_eq!(table.len(), 1);
        assert_eq!(
            (table[0].location.index, table[0].rows, table[0].columns),
            (86, 2, 1)
        );
        assert!(batch
            .operations()
            .contains(&EditOperation::cell_background(87, 0, 0, styles::ABSTRACT_HEADER.to_color())));
        assert_eq!(&inserted[inserted.len() - 2..], &[(90, "Abstract"), (101, "Body")]);
        assert_eq!(cursor.current(), 86 + 2 + 1);
    }

    #[test]
    fn test_empty_cover_fields_render_blank() {
        let planner = DocumentEditPlanner::default();
        let mut cursor = OffsetTracker::default();

        let batch = planner
            .plan_cover_and_abstract(&mut cursor, &CoverPage::default(), "")
            .unwrap();

        // Blank values still end their line.
        let newlines = batch
            .inserted_text()
            .iter()
            .filter(|(_, text)| *text == "\n")
            .count();
        assert_eq!(newlines, 3 + 12 + 3);
        assert!(batch.operations().iter().all(|op| match op {
            EditOperation::UpdateTextStyle(style) => !style.range.is_empty(),
            EditOperation::UpdateParagraphStyle(style) => !style.range.is_empty(),
            _ => true,
        }));
    }

    #[test]
    fn test_classification_code_rows_follow_header() {
        let planner = DocumentEditPlanner::default();
        let codes = vec![
            ClassificationCode {
                code: "A01B".into(),
                definition: "Farming".into(),
            },
            ClassificationCode {
                code: "G06F".into(),
                definition: "Computing".into(),
            },
        ];
        let mut cursor = OffsetTracker::new(100);

        let batch = planner.plan_classification_codes(&mut cursor, &codes).unwrap();

        let table = tables(&batch);
        assert_eq!(table.len(), 1);
        assert_eq!((table[0].rows, table[0].columns), (3, 2));
        assert_eq!(table[0].location.index, 131);

        let inserted = batch.inserted_text();
        let cells: Vec<(u32, &str)> = inserted[1..].to_vec();
        assert_eq!(
            cells,
            vec![
                (135, "USC Codes"),
                (146, "Definitions"),
                (160, "A01B"),
                (166, "Farming"),
                (176, "G06F"),
                (182, "Computing"),
            ]
        );
        // second data row = first data row + both cell lengths + boundaries
        assert_eq!(cells[4].0, cells[2].0 + 4 + 7 + 5);

        let header_fills: Vec<&EditOperation> = batch
            .operations()
            .iter()
            .filter(|op| matches!(op, EditOperation::UpdateTableCellStyle(_)))
            .collect();
        assert_eq!(header_fills.len(), 2);
        assert_eq!(
            header_fills[1],
            &EditOperation::cell_background(132, 0, 1, styles::CODES_HEADER.to_color())
        );
    }

    #[test]
    fn test_empty_tables_have_header_row_only() {
        let planner = DocumentEditPlanner::default();
        let mut cursor = OffsetTracker::new(1);

        let codes = planner.plan_classification_codes(&mut cursor, &[]).unwrap();
        cursor.resync(50);
        let events = planner.plan_application_events(&mut cursor, &[]).unwrap();

        for (batch, headers) in [(&codes, CODES_COLUMNS), (&events, EVENTS_COLUMNS)] {
            let table = tables(batch);
            assert_eq!(table[0].rows, 1);
            let cell_text: Vec<&str> = batch.inserted_text()[1..]
                .iter()
                .map(|(_, text)| *text)
                .collect();
            assert_eq!(cell_text, headers.to_vec());
        }
    }

    #[test]
    fn test_claims_are_tab_indented_numbered_list() {
        let planner = DocumentEditPlanner::default();
        let mut b = Claim::new(ClaimLevel::L2, "B");
        b.children.push(Claim::new(ClaimLevel::L3, "C"));
        let mut a = Claim::new(ClaimLevel::L1, "A");
        a.children.push(b);
        let claims = vec![a, Claim::new(ClaimLevel::L1, "D")];
        let mut cursor = OffsetTracker::new(10);

        let batch = planner.plan_claims(&mut cursor, &claims);

        assert_eq!(
            batch.inserted_text(),
            vec![
                (11, "Claims\n"),
                (18, "A\n"),
                (20, "\tB\n"),
                (23, "\t\tC\n"),
                (27, "D\n"),
            ]
        );
        assert_eq!(
            batch.operations().last(),
            Some(&EditOperation::bullets(
                Range::new(18, 29),
                styles::NUMBERED_DECIMAL_NESTED
            ))
        );
        assert_eq!(cursor.current(), 29);
    }

    #[test]
    fn test_no_claims_means_no_list() {
        let planner = DocumentEditPlanner::default();
        let mut cursor = OffsetTracker::new(10);

        let batch = planner.plan_claims(&mut cursor, &[]);

        assert!(!batch
            .operations()
            .iter()
            .any(|op| matches!(op, EditOperation::CreateParagraphBullets(_))));
    }

    #[test]
    fn test_event_status_link_styling() {
        let planner = DocumentEditPlanner::default();
        let events = vec![
            event(4, "Filed", Some("https://example.com/filing")),
            event(5, "Granted", None),
        ];
        let mut cursor = OffsetTracker::new(1);

        let batch = planner.plan_application_events(&mut cursor, &events).unwrap();

        let inserted = batch.inserted_text();
        assert!(inserted.iter().any(|(_, text)| *text == "2021-03-04"));

        let statuses: Vec<&UpdateTextStyle> = text_styles(&batch)
            .into_iter()
            .filter(|style| style.text_style.foreground_color.is_some())
            .collect();
        assert_eq!(statuses.len(), 2);

        assert_eq!(statuses[0].text_style.underline, Some(true));
        assert_eq!(
            statuses[0].text_style.foreground_color,
            Some(styles::LINK.to_color())
        );
        assert_eq!(
            statuses[0].text_style.link.as_ref().map(|l| l.url.as_str()),
            Some("https://example.com/filing")
        );

        assert_eq!(statuses[1].text_style.underline, Some(false));
        assert_eq!(
            statuses[1].text_style.foreground_color,
            Some(styles::MUTED.to_color())
        );
        assert!(statuses[1].text_style.link.is_none());
    }

    #[test]
    fn test_events_section_has_no_page_break() {
        let planner = DocumentEditPlanner::default();
        let mut cursor = OffsetTracker::new(1);

        let batch = planner.plan_application_events(&mut cursor, &[]).unwrap();

        assert_eq!(batch.operations()[0], EditOperation::insert_text(1, "Application Events\n"));
    }

    #[test]
    fn test_plan_phase_dispatches_in_document_order() {
        let planner = DocumentEditPlanner::default();
        let records = PatentRecords::default();

        let kinds: Vec<&str> = Phase::ALL
            .iter()
            .map(|&phase| {
                let mut cursor = OffsetTracker::default();
                let batch = planner.plan_phase(phase, &mut cursor, &records).unwrap();
                batch.operations()[0].kind()
            })
            .collect();

        assert_eq!(
            kinds,
            vec!["insertInlineImage", "insertPageBreak", "insertPageBreak", "insertText"]
        );
    }
}
