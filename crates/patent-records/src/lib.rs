//! Patent application records read from the source spreadsheet
//!
//! This crate turns the raw cell matrices of the patent tracking sheet into
//! typed records:
//! - `parser`: cover page, abstract, classification codes, application events
//! - `claims`: the 3-level claim tree rebuilt from indent-marker columns
//! - `source`: the spreadsheet reader seam the records are fetched through

pub mod claims;
pub mod error;
pub mod parser;
pub mod ranges;
pub mod records;
pub mod source;

pub use claims::{build_claims, flatten_claims, ClaimHierarchyBuilder};
pub use error::RecordError;
pub use parser::{
    parse_abstract, parse_application_events, parse_classification_codes, parse_cover_page,
};
pub use records::{
    ApplicationEvent, Claim, ClaimLevel, ClassificationCode, CoverPage, PatentRecords,
};
pub use source::{FormattedCell, SourceError, SpreadsheetReader};
