//! Dataset document shape shared by ingestion and validation.
//!
//! The ingestion stage serializes these types; the build reads the same
//! document back through [`crate::dataset::validate`], which checks the shape
//! field by field before converting it into typed books.

use serde::{Deserialize, Serialize};

/// Top-level dataset document: `{ translation, source, license, books }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDocument {
    pub translation: String,
    pub source: String,
    pub license: LicenseInfo,
    pub books: Vec<BookEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub short: String,
    pub links: LicenseLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseLinks {
    pub leb: String,
    pub logos: String,
}

/// One book with chapters in positional order (chapter n at index n-1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookEntry {
    pub name: String,
    pub abbr: String,
    pub slug: String,
    pub chapters: Vec<Vec<VerseEntry>>,
}

/// One verse as written to disk: `{ "v": 3, "t": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseEntry {
    pub v: u32,
    pub t: String,
}

impl LicenseInfo {
    /// Attribution terms for the Lexham English Bible.
    pub fn leb() -> Self {
        Self {
            short: "Free to distribute with attribution; annual reporting if used with a \
                    commercial product or >1,000 verses."
                .to_string(),
            links: LicenseLinks {
                leb: "https://lexhamenglishbible.com".to_string(),
                logos: "https://www.logos.com".to_string(),
            },
        }
    }
}
