use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Document read-back returned no content")]
    EmptyDocument,

    #[error("Table with {rows} rows and {columns} columns has no cell left to write")]
    TableOverflow { rows: u32, columns: u32 },
}
