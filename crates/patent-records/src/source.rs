//! Spreadsheet reader seam
//!
//! Authentication and transport live in the implementing client; records only
//! need the two read shapes below.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One cell read with formatting: the rendered text plus an optional link.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedCell {
    pub formatted_value: Option<String>,
    pub hyperlink: Option<String>,
}

impl FormattedCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            formatted_value: Some(value.into()),
            hyperlink: None,
        }
    }

    pub fn link(value: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            formatted_value: Some(value.into()),
            hyperlink: Some(url.into()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

#[async_trait]
pub trait SpreadsheetReader: Send + Sync {
    /// Dense matrix of display values for `range` (e.g. `"Claims!B4:E"`).
    async fn values_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SourceError>;

    /// Rows of formatted cells for `range`, including per-cell hyperlinks.
    async fn formatted_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<FormattedCell>>, SourceError>;
}
