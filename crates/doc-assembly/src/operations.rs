//! Edit operations for the remote document editor
//!
//! Every operation serializes to the request object the editor's batch
//! endpoint expects (`{"insertText": {...}}` and so on). Positions are
//! absolute offsets computed when the operation is built; nothing here is
//! relative to a cursor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub index: u32,
}

/// Half-open `[start_index, end_index)` span of the content stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: u32,
    pub end_index: u32,
}

impl Range {
    pub fn new(start_index: u32, end_index: u32) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end_index <= self.start_index
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub magnitude: f32,
    pub unit: String,
}

impl Dimension {
    pub fn points(magnitude: f32) -> Self {
        Self {
            magnitude,
            unit: "PT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    pub font_family: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub url: String,
}

/// Character-level style. Unset fields are omitted from the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableCellStyle {
    pub background_color: OptionalColor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub table_start_location: Location,
    pub row_index: u32,
    pub column_index: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableRange {
    pub table_cell_location: TableCellLocation,
    pub row_span: u32,
    pub column_span: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    pub text: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertPageBreak {
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertInlineImage {
    pub uri: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertTable {
    pub rows: u32,
    pub columns: u32,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyle {
    pub paragraph_style: ParagraphStyle,
    pub fields: String,
    pub range: Range,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub text_style: TextStyle,
    pub fields: String,
    pub range: Range,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableCellStyle {
    pub table_range: TableRange,
    pub table_cell_style: TableCellStyle,
    pub fields: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub range: Range,
    pub bullet_preset: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentRange {
    pub range: Range,
}

/// Field mask that replaces every style field on the target range.
const ALL_FIELDS: &str = "*";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum EditOperation {
    /// Also used for line breaks (`"\n"`).
    InsertText(InsertText),
    InsertPageBreak(InsertPageBreak),
    InsertInlineImage(InsertInlineImage),
    InsertTable(InsertTable),
    UpdateParagraphStyle(UpdateParagraphStyle),
    UpdateTextStyle(UpdateTextStyle),
    /// Cell background for a single table cell.
    UpdateTableCellStyle(UpdateTableCellStyle),
    /// Promote a range of paragraphs to a list.
    CreateParagraphBullets(CreateParagraphBullets),
    DeleteContentRange(DeleteContentRange),
}

impl EditOperation {
    pub fn insert_text(index: u32, text: impl Into<String>) -> Self {
        EditOperation::InsertText(InsertText {
            text: text.into(),
            location: Location { index },
        })
    }

    pub fn line_break(index: u32) -> Self {
        Self::insert_text(index, "\n")
    }

    pub fn page_break(index: u32) -> Self {
        EditOperation::InsertPageBreak(InsertPageBreak {
            location: Location { index },
        })
    }

    pub fn inline_image(index: u32, uri: impl Into<String>) -> Self {
        EditOperation::InsertInlineImage(InsertInlineImage {
            uri: uri.into(),
            location: Location { index },
        })
    }

    pub fn table(index: u32, rows: u32, columns: u32) -> Self {
        EditOperation::InsertTable(InsertTable {
            rows,
            columns,
            location: Location { index },
        })
    }

    pub fn paragraph_style(range: Range, paragraph_style: ParagraphStyle) -> Self {
        EditOperation::UpdateParagraphStyle(UpdateParagraphStyle {
            paragraph_style,
            fields: ALL_FIELDS.to_string(),
            range,
        })
    }

    pub fn text_style(range: Range, text_style: TextStyle) -> Self {
        EditOperation::UpdateTextStyle(UpdateTextStyle {
            text_style,
            fields: ALL_FIELDS.to_string(),
            range,
        })
    }

    pub fn cell_background(
        table_start: u32,
        row_index: u32,
        column_index: u32,
        background: OptionalColor,
    ) -> Self {
        EditOperation::UpdateTableCellStyle(UpdateTableCellStyle {
            table_range: TableRange {
                table_cell_location: TableCellLocation {
                    table_start_location: Location { index: table_start },
                    row_index,
                    column_index,
                },
                row_span: 1,
                column_span: 1,
            },
            table_cell_style: TableCellStyle {
                background_color: background,
            },
            fields: "backgroundColor".to_string(),
        })
    }

    pub fn bullets(range: Range, preset: impl Into<String>) -> Self {
        EditOperation::CreateParagraphBullets(CreateParagraphBullets {
            range,
            bullet_preset: preset.into(),
        })
    }

    pub fn delete_range(range: Range) -> Self {
        EditOperation::DeleteContentRange(DeleteContentRange { range })
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EditOperation::InsertText(_) => "insertText",
            EditOperation::InsertPageBreak(_) => "insertPageBreak",
            EditOperation::InsertInlineImage(_) => "insertInlineImage",
            EditOperation::InsertTable(_) => "insertTable",
            EditOperation::UpdateParagraphStyle(_) => "updateParagraphStyle",
            EditOperation::UpdateTextStyle(_) => "updateTextStyle",
            EditOperation::UpdateTableCellStyle(_) => "updateTableCellStyle",
            EditOperation::CreateParagraphBullets(_) => "createParagraphBullets",
            EditOperation::DeleteContentRange(_) => "deleteContentRange",
        }
    }

    /// Insertion index for operations that add content.
    pub fn insert_index(&self) -> Option<u32> {
        match self {
            EditOperation::InsertText(op) => Some(op.location.index),
            EditOperation::InsertPageBreak(op) => Some(op.location.index),
            EditOperation::InsertInlineImage(op) => Some(op.location.index),
            EditOperation::InsertTable(op) => Some(op.location.index),
            _ => None,
        }
    }
}

/// Ordered operations sent to the editor in one round-trip.
///
/// Serializes as the batch request body, `{"requests": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditBatch {
    requests: Vec<EditOperation>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: EditOperation) {
        self.requests.push(op);
    }

    pub fn operations(&self) -> &[EditOperation] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Text insertions in batch order, as `(index, text)`.
    pub fn inserted_text(&self) -> Vec<(u32, &str)> {
        self.requests
            .iter()
            .filter_map(|op| match op {
                EditOperation::InsertText(insert) => {
                    Some((insert.location.index, insert.text.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
