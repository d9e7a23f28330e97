//! Plain-text ingestion.
//!
//! Converts a flat `reference<TAB>text` file into the nested dataset document
//! the build consumes. One verse per line:
//!
//! ```text
//! Genesis 1:1	In the beginning God created the heavens and the earth.
//! Genesis 1:2	Now the earth was formless and empty...
//! 1 Samuel 3:10	And Yahweh came and stood...
//! ```
//!
//! ## Tolerance
//!
//! Individual bad lines never abort ingestion. Blank lines are ignored;
//! lines without a tab-separated text, references that do not parse, and
//! book names outside the canon are logged and skipped. Verses may arrive in
//! any order: the chapter and verse arrays grow on demand and unfilled slots
//! hold empty strings, so the written verse numbers are always dense from 1.
//!
//! Every canon book appears in the output, in canon order, even when the
//! input contains none of its verses.

use crate::canon::{CANON, canon_index, slugify};
use crate::types::{BookEntry, DatasetDocument, LicenseInfo, VerseEntry};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Upper bound on chapter and verse numbers accepted from a reference.
const MAX_REFERENCE_NUMBER: u32 = 1000;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-3]?\s?[A-Za-z .]+?)\s+(\d+):(\d+)$").expect("reference pattern is valid")
});

/// Why a line was left out of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No tab, or nothing on one side of it.
    MissingText,
    /// The reference does not look like `Book C:V`.
    BadReference(String),
    /// The book part is not one of the 66 canon names.
    UnknownBook(String),
    /// Chapter or verse is zero or implausibly large.
    OutOfRange(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingText => write!(f, "missing tab-separated reference or text"),
            SkipReason::BadReference(r) => write!(f, "bad reference: {r}"),
            SkipReason::UnknownBook(b) => write!(f, "unknown book: {b}"),
            SkipReason::OutOfRange(r) => write!(f, "chapter or verse out of range: {r}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub reason: SkipReason,
}

/// A canon book being filled in from text lines.
#[derive(Debug, Clone)]
pub struct IngestedBook {
    pub name: &'static str,
    pub slug: String,
    /// `chapters[c - 1][v - 1]` holds the text of `c:v`.
    pub chapters: Vec<Vec<String>>,
}

/// Result of normalizing a text file: all canon books plus what was dropped.
#[derive(Debug)]
pub struct Ingested {
    pub books: Vec<IngestedBook>,
    pub accepted: usize,
    pub skipped: Vec<SkippedLine>,
}

impl Ingested {
    /// Build the dataset document written to disk.
    pub fn to_document(&self) -> DatasetDocument {
        let books = self
            .books
            .iter()
            .map(|book| BookEntry {
                name: book.name.to_string(),
                abbr: book.name.to_string(),
                slug: book.slug.clone(),
                chapters: book
                    .chapters
                    .iter()
                    .map(|verses| {
                        verses
                            .iter()
                            .enumerate()
                            .map(|(i, t)| VerseEntry {
                                v: i as u32 + 1,
                                t: t.clone(),
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        DatasetDocument {
            translation: "LEB".to_string(),
            source: "Lexham Press".to_string(),
            license: LicenseInfo::leb(),
            books,
        }
    }
}

/// Normalize tab-separated verse lines into canon-ordered books.
pub fn ingest(input: &str) -> Ingested {
    let mut books: Vec<IngestedBook> = CANON
        .iter()
        .map(|&name| IngestedBook {
            name,
            slug: slugify(name),
            chapters: Vec::new(),
        })
        .collect();
    let mut accepted = 0;
    let mut skipped = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match place_line(line, &mut books) {
            Ok(()) => accepted += 1,
            Err(reason) => {
                tracing::warn!(line = idx + 1, "skipping line: {reason}");
                skipped.push(SkippedLine {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }

    Ingested {
        books,
        accepted,
        skipped,
    }
}

fn place_line(line: &str, books: &mut [IngestedBook]) -> Result<(), SkipReason> {
    let mut parts = line.split('\t');
    let reference = parts.next().unwrap_or_default().trim();
    let raw_text = parts.next().unwrap_or_default();
    if reference.is_empty() || raw_text.is_empty() {
        return Err(SkipReason::MissingText);
    }

    let caps = REFERENCE
        .captures(reference)
        .ok_or_else(|| SkipReason::BadReference(reference.to_string()))?;
    let book = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
    let chapter: u32 = caps[2]
        .parse()
        .map_err(|_| SkipReason::OutOfRange(reference.to_string()))?;
    let verse: u32 = caps[3]
        .parse()
        .map_err(|_| SkipReason::OutOfRange(reference.to_string()))?;
    if chapter == 0 || verse == 0 || chapter > MAX_REFERENCE_NUMBER || verse > MAX_REFERENCE_NUMBER
    {
        return Err(SkipReason::OutOfRange(reference.to_string()));
    }

    let bi = canon_index(&book).ok_or(SkipReason::UnknownBook(book))?;
    let chapters = &mut books[bi].chapters;
    let (c, v) = (chapter as usize, verse as usize);
    if chapters.len() < c {
        chapters.resize_with(c, Vec::new);
    }
    let verses = &mut chapters[c - 1];
    if verses.len() < v {
        verses.resize(v, String::new());
    }
    verses[v - 1] = raw_text.trim().to_string();
    Ok(())
}

/// Read `input`, normalize it, and write the dataset JSON to `output`.
///
/// Parent directories of `output` are created as needed.
pub fn ingest_file(input: &Path, output: &Path) -> Result<Ingested, IngestError> {
    let text = fs::read_to_string(input)?;
    let ingested = ingest(&text);

    let json = serde_json::to_string(&ingested.to_document())?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, json)?;
    tracing::info!(path = %output.display(), verses = ingested.accepted, "wrote dataset");

    Ok(ingested)
}
