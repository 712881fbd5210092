//! Spreadsheet to document conversion
//!
//! Extraction finishes completely before the document is touched, so a bad
//! sheet never leaves a half-cleared report behind. Each phase after the
//! first starts from the editor's own read-back of the body end.

use std::sync::Arc;

use doc_assembly::{
    end_offset, plan_clear, DocumentEditPlanner, DocumentEditor, OffsetTracker, Phase, BODY_START,
};
use patent_records::{
    build_claims, parse_abstract, parse_application_events, parse_classification_codes,
    parse_cover_page, ranges, PatentRecords, SpreadsheetReader,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::ConvertError;

/// What one phase sent to the editor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: String,
    /// Offset the phase was planned from.
    pub start: u32,
    pub operations: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConvertReport {
    pub cleared: bool,
    pub phases: Vec<PhaseReport>,
    /// Insertion point after the last phase, from the final read-back.
    pub end_offset: u32,
}

pub struct ConvertWorkflow {
    reader: Arc<dyn SpreadsheetReader>,
    editor: Arc<dyn DocumentEditor>,
    planner: DocumentEditPlanner,
    prepared_by: String,
}

impl ConvertWorkflow {
    pub fn new(
        reader: Arc<dyn SpreadsheetReader>,
        editor: Arc<dyn DocumentEditor>,
        planner: DocumentEditPlanner,
        prepared_by: impl Into<String>,
    ) -> Self {
        Self {
            reader,
            editor,
            planner,
            prepared_by: prepared_by.into(),
        }
    }

    /// Read every section and build the records.
    ///
    /// All five reads run together and are awaited in full; the first failure
    /// in section order is the one reported.
    #[instrument(skip(self))]
    pub async fn extract(&self, sheet_id: &str) -> Result<PatentRecords, ConvertError> {
        let reader = self.reader.as_ref();
        let (cover, abstract_cells, codes, claims, events) = tokio::join!(
            reader.values_range(sheet_id, ranges::COVER_PAGE),
            reader.values_range(sheet_id, ranges::ABSTRACT),
            reader.values_range(sheet_id, ranges::CLASSIFICATION_CODES),
            reader.values_range(sheet_id, ranges::CLAIMS),
            reader.formatted_range(sheet_id, ranges::APPLICATION_EVENTS),
        );

        let (cover, abstract_cells, codes, claims, events) =
            (cover?, abstract_cells?, codes?, claims?, events?);

        let records = PatentRecords {
            cover_page: parse_cover_page(&cover, &self.prepared_by),
            abstract_text: parse_abstract(&abstract_cells),
            classification_codes: parse_classification_codes(&codes),
            claims: build_claims(&claims)?,
            application_events: parse_application_events(&events)?,
        };

        debug!(
            codes = records.classification_codes.len(),
            claims = records.claims.len(),
            events = records.application_events.len(),
            "Extracted records"
        );
        Ok(records)
    }

    /// Clear the document and write the report, one batch per phase.
    #[instrument(skip(self, records))]
    pub async fn build(
        &self,
        document_id: &str,
        records: &PatentRecords,
    ) -> Result<ConvertReport, ConvertError> {
        let boundaries = self.editor.content_boundaries(document_id).await?;

        let cleared = match plan_clear(&boundaries) {
            Some(clear) => {
                debug!(operations = clear.len(), "Clearing document body");
                self.editor.batch_update(document_id, &clear).await?;
                true
            }
            None => false,
        };

        let mut phases = Vec::with_capacity(Phase::ALL.len());
        for (i, phase) in Phase::ALL.into_iter().enumerate() {
            let start = if i == 0 {
                BODY_START
            } else {
                end_offset(&self.editor.content_boundaries(document_id).await?)?
            };

            let mut cursor = OffsetTracker::new(start);
            let batch = self.planner.plan_phase(phase, &mut cursor, records)?;
            self.editor.batch_update(document_id, &batch).await?;

            info!(phase = phase.name(), start, operations = batch.len(), "Applied phase");
            phases.push(PhaseReport {
                phase: phase.name().to_string(),
                start,
                operations: batch.len(),
            });
        }

        let end_offset = end_offset(&self.editor.content_boundaries(document_id).await?)?;

        Ok(ConvertReport {
            cleared,
            phases,
            end_offset,
        })
    }

    pub async fn convert(
        &self,
        sheet_id: &str,
        document_id: &str,
    ) -> Result<ConvertReport, ConvertError> {
        info!("Converting sheet {} into document {}", sheet_id, document_id);
        let records = self.extract(sheet_id).await?;
        let report = self.build(document_id, &records).await?;
        info!(end_offset = report.end_offset, "Conversion complete");
        Ok(report)
    }
}
