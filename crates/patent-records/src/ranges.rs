//! Fixed cell ranges of the patent tracking sheet template
//!
//! The sheet layout is authored by hand; there is no header detection, each
//! section is read from a hard-coded rectangle and mapped by column offset.

/// Title, patent number and inventor, one per row in column B.
pub const COVER_PAGE: &str = "Cover Page!B1:B3";

/// Single cell holding the abstract body.
pub const ABSTRACT: &str = "Abstract!B5";

/// Code in column B, definition in column C.
pub const CLASSIFICATION_CODES: &str = "Classification Codes!B4:C";

/// Three indent-marker columns (B, C, D) followed by the claim text.
pub const CLAIMS: &str = "Claims!B4:E";

/// Date in column A, status (optionally hyperlinked) in column B.
pub const APPLICATION_EVENTS: &str = "Application Events!A5:B";

/// Name printed on the cover page when none is configured.
pub const DEFAULT_PREPARED_BY: &str = "Agent Name";
