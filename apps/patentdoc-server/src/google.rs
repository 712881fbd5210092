//! HTTP clients for the Sheets v4 and Docs v1 REST APIs
//!
//! Both clients authenticate with a caller-supplied OAuth access token;
//! obtaining and refreshing that token is left to the deployment.

use std::time::Duration;

use async_trait::async_trait;
use doc_assembly::{ContentBoundary, DocumentEditor, EditBatch, EditorError};
use patent_records::{FormattedCell, SourceError, SpreadsheetReader};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Field mask for document reads; only top-level boundaries are needed.
const BODY_BOUNDARY_FIELDS: &str = "body.content(startIndex,endIndex)";

const GRID_FIELDS: &str = "sheets.data.rowData.values(formattedValue,hyperlink)";

/// Transport-level failure, mapped onto each seam's error type.
#[derive(Debug)]
enum ApiFailure {
    NotFound,
    Upstream(String),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Shared connection state: HTTP client, token and API root.
#[derive(Clone)]
struct GoogleApi {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl GoogleApi {
    fn new(base_url: &str, access_token: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            access_token: access_token.to_string(),
        })
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiFailure::Upstream(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiFailure> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| ApiFailure::Upstream(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiFailure::Upstream(format!("Failed to parse response: {}", e)));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiFailure::NotFound);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiFailure::Upstream(error_message(status, &body)))
    }
}

/// The API's own `error.message`, falling back to the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => status.to_string(),
    }
}

/// Display text of a values-API cell; numbers and booleans arrive unquoted.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
struct Sheet {
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    #[serde(default)]
    row_data: Vec<RowData>,
}

#[derive(Deserialize)]
struct RowData {
    #[serde(default)]
    values: Vec<FormattedCellData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormattedCellData {
    formatted_value: Option<String>,
    hyperlink: Option<String>,
}

impl ValueRange {
    fn into_matrix(self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }
}

impl Spreadsheet {
    /// Rows of the first grid of the first sheet; a single range is requested.
    fn into_rows(self) -> Vec<Vec<FormattedCell>> {
        self.sheets
            .into_iter()
            .next()
            .and_then(|sheet| sheet.data.into_iter().next())
            .map(|grid| {
                grid.row_data
                    .into_iter()
                    .map(|row| {
                        row.values
                            .into_iter()
                            .map(|cell| FormattedCell {
                                formatted_value: cell.formatted_value,
                                hyperlink: cell.hyperlink,
                            })
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct SheetsClient {
    api: GoogleApi,
}

impl SheetsClient {
    pub fn new(base_url: &str, access_token: &str) -> anyhow::Result<Self> {
        Ok(Self {
            api: GoogleApi::new(base_url, access_token)?,
        })
    }

    fn source_error(failure: ApiFailure, sheet_id: &str) -> SourceError {
        match failure {
            ApiFailure::NotFound => SourceError::NotFound(sheet_id.to_string()),
            ApiFailure::Upstream(message) => SourceError::Upstream(message),
        }
    }
}

#[async_trait]
impl SpreadsheetReader for SheetsClient {
    async fn values_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SourceError> {
        debug!(range, "Reading values");
        let url = self
            .api
            .url(&["v4", "spreadsheets", sheet_id, "values", range])
            .map_err(|f| Self::source_error(f, sheet_id))?;

        let values: ValueRange = self
            .api
            .send(self.api.client.get(url))
            .await
            .map_err(|f| Self::source_error(f, sheet_id))?;
        Ok(values.into_matrix())
    }

    async fn formatted_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<FormattedCell>>, SourceError> {
        debug!(range, "Reading formatted grid");
        let url = self
            .api
            .url(&["v4", "spreadsheets", sheet_id])
            .map_err(|f| Self::source_error(f, sheet_id))?;

        let request = self.api.client.get(url).query(&[
            ("ranges", range),
            ("includeGridData", "true"),
            ("fields", GRID_FIELDS),
        ]);
        let spreadsheet: Spreadsheet = self
            .api
            .send(request)
            .await
            .map_err(|f| Self::source_error(f, sheet_id))?;
        Ok(spreadsheet.into_rows())
    }
}

// ---------------------------------------------------------------------------
// Docs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    body: Body,
}

#[derive(Deserialize, Default)]
struct Body {
    #[serde(default)]
    content: Vec<ContentBoundary>,
}

#[derive(Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Value>,
}

pub struct DocsClient {
    api: GoogleApi,
}

impl DocsClient {
    pub fn new(base_url: &str, access_token: &str) -> anyhow::Result<Self> {
        Ok(Self {
            api: GoogleApi::new(base_url, access_token)?,
        })
    }

    fn editor_error(failure: ApiFailure, document_id: &str) -> EditorError {
        match failure {
            ApiFailure::NotFound => EditorError::NotFound(document_id.to_string()),
            ApiFailure::Upstream(message) => EditorError::Upstream(message),
        }
    }
}

#[async_trait]
impl DocumentEditor for DocsClient {
    async fn batch_update(
        &self,
        document_id: &str,
        batch: &EditBatch,
    ) -> Result<Vec<Value>, EditorError> {
        debug!(operations = batch.len(), "Sending batch update");
        let endpoint = format!("{}:batchUpdate", document_id);
        let url = self
            .api
            .url(&["v1", "documents", &endpoint])
            .map_err(|f| Self::editor_error(f, document_id))?;

        let response: BatchUpdateResponse = self
            .api
            .send(self.api.client.post(url).json(batch))
            .await
            .map_err(|f| Self::editor_error(f, document_id))?;
        Ok(response.replies)
    }

    async fn content_boundaries(
        &self,
        document_id: &str,
    ) -> Result<Vec<ContentBoundary>, EditorError> {
        let url = self
            .api
            .url(&["v1", "documents", document_id])
            .map_err(|f| Self::editor_error(f, document_id))?;

        let request = self
            .api
            .client
            .get(url)
            .query(&[("fields", BODY_BOUNDARY_FIELDS)]);
        let document: Document = self
            .api
            .send(request)
            .await
            .map_err(|f| Self::editor_error(f, document_id))?;
        Ok(document.body.content)
    }
}
