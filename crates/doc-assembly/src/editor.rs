//! Document editor seam
//!
//! The editor applies a batch atomically and in order, and can report the
//! body's content boundaries afterwards. Those read-backs are the only
//! authoritative source for where the next phase starts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operations::EditBatch;

/// Start/end offsets of one top-level block of the document body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentBoundary {
    /// Absent on the leading section break.
    #[serde(default)]
    pub start_index: Option<u32>,
    pub end_index: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

#[async_trait]
pub trait DocumentEditor: Send + Sync {
    /// Apply `batch` in order; returns one reply per operation.
    async fn batch_update(
        &self,
        document_id: &str,
        batch: &EditBatch,
    ) -> Result<Vec<serde_json::Value>, EditorError>;

    /// Current top-level content boundaries of the document body.
    async fn content_boundaries(
        &self,
        document_id: &str,
    ) -> Result<Vec<ContentBoundary>, EditorError>;
}
