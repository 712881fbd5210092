//! Document assembly for patent reports
//!
//! The target document is a flat character stream addressed by integer
//! offsets. Every insertion shifts everything after it, and the remote editor
//! applies a batch in order while reporting only pre-batch positions, so the
//! positions of each operation are simulated here before the batch is sent:
//! - `cursor`: the offset tracker every emitted operation advances
//! - `table`: cell offsets inside freshly inserted tables
//! - `planner`: the fixed report template, one batch per phase
//! - `operations`: the edit operations in the editor's wire shape

pub mod cursor;
pub mod editor;
pub mod error;
pub mod operations;
pub mod planner;
pub mod styles;
pub mod table;

pub use cursor::{text_len, OffsetTracker, BODY_START};
pub use editor::{ContentBoundary, DocumentEditor, EditorError};
pub use error::PlanError;
pub use operations::{EditBatch, EditOperation, Location, Range};
pub use planner::{end_offset, plan_clear, DocumentEditPlanner, Phase};
pub use styles::{PlannerConfig, Rgb};
pub use table::{CellWriter, TableAnchor};
