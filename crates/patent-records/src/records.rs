use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverPage {
    pub title: String,
    pub prepared_by: String,
    pub inventor: String,
    pub patent_no: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationCode {
    pub code: String,
    pub definition: String,
}

/// Nesting level of a claim, decided by which marker column is filled in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClaimLevel {
    L1,
    L2,
    L3,
}

impl ClaimLevel {
    /// Map a marker column (0-based) to its level.
    pub fn from_column(column: usize) -> Option<Self> {
        match column {
            0 => Some(ClaimLevel::L1),
            1 => Some(ClaimLevel::L2),
            2 => Some(ClaimLevel::L3),
            _ => None,
        }
    }

    /// Zero for top-level claims. Doubles as the tab prefix count when rendered.
    pub fn depth(self) -> usize {
        match self {
            ClaimLevel::L1 => 0,
            ClaimLevel::L2 => 1,
            ClaimLevel::L3 => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claim {
    pub level: ClaimLevel,
    pub content: String,
    #[serde(default)]
    pub children: Vec<Claim>,
}

impl Claim {
    pub fn new(level: ClaimLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationEvent {
    pub date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub hyperlink: Option<String>,
}

/// Everything one conversion reads from the sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatentRecords {
    pub cover_page: CoverPage,
    pub abstract_text: String,
    pub classification_codes: Vec<ClassificationCode>,
    pub claims: Vec<Claim>,
    pub application_events: Vec<ApplicationEvent>,
}
