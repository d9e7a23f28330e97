//! Dataset loading and structural validation.
//!
//! The build input is a nested JSON document:
//!
//! ```text
//! { "books": [ { "name": "Genesis", "slug": "genesis",
//!                "chapters": [ [ { "v": 1, "t": "In the beginning..." }, ... ], ... ] },
//!              ... ] }
//! ```
//!
//! Validation walks the raw [`serde_json::Value`] rather than deserializing
//! straight into typed structs, so that every defect can be reported with
//! its position in the document (book, chapter, verse entry). The whole
//! document is checked before anything is returned: callers either get a
//! complete [`Dataset`] or an error, never a partial one.
//!
//! ## Rules
//!
//! - `books` exists and is a non-empty array
//! - every book has a non-empty `name`, a `chapters` array, and a `slug` made
//!   of lowercase ASCII letters and digits joined by single hyphens
//!   (`1-corinthians`); the slug becomes a directory name and a URL segment
//! - every chapter is an array
//! - every verse entry is an object with a positive integer `v` and a string `t`
//! - no two books share a slug, and no chapter repeats a verse number
//!   (either would give two verses the same page path)
//!
//! Verse numbers are taken as given; they need not be dense.

use crate::canon::slugify;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid dataset: {0}")]
    Invalid(#[from] ValidateError),
}

/// A structural defect, located as precisely as the document allows.
#[derive(Error, Debug, PartialEq)]
pub enum ValidateError {
    #[error("top level is not an object")]
    NotAnObject,
    #[error("missing `books` field")]
    MissingBooks,
    #[error("`books` is not an array")]
    BooksNotArray,
    #[error("`books` is empty")]
    NoBooks,
    #[error("{0}: not an object")]
    BookNotObject(BookLoc),
    #[error("{0}: `name` must be a non-empty string")]
    BadName(BookLoc),
    #[error("{0}: `slug` must be lowercase letters and digits joined by hyphens")]
    BadSlug(BookLoc),
    #[error("{0}: `chapters` must be an array")]
    ChaptersNotArray(BookLoc),
    #[error("{0} chapter {1}: not an array")]
    ChapterNotArray(BookLoc, usize),
    #[error("{0} chapter {1} entry {2}: not an object")]
    VerseNotObject(BookLoc, usize, usize),
    #[error("{0} chapter {1} entry {2}: `v` must be a positive integer")]
    BadVerseNumber(BookLoc, usize, usize),
    #[error("{0} chapter {1} entry {2}: `t` must be a string")]
    BadVerseText(BookLoc, usize, usize),
    #[error("{0} chapter {1}: verse {2} appears more than once")]
    DuplicateVerse(BookLoc, usize, u32),
    #[error("{0}: slug `{1}` already used by {2}")]
    DuplicateSlug(BookLoc, String, BookLoc),
}

/// Position of a book in the document, with its name when one was readable.
#[derive(Debug, Clone, PartialEq)]
pub struct BookLoc {
    pub index: usize,
    pub name: Option<String>,
}

impl std::fmt::Display for BookLoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "books[{}] ({})", self.index, name),
            None => write!(f, "books[{}]", self.index),
        }
    }
}

/// A fully validated dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Translation label from the document, e.g. `"LEB"`.
    pub translation: Option<String>,
    /// Short license terms from `license.short`.
    pub license_short: Option<String>,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub name: String,
    pub slug: String,
    /// Chapter `n` is `chapters[n - 1]`.
    pub chapters: Vec<Vec<Verse>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

impl Dataset {
    /// Total verse entries across all books.
    pub fn verse_count(&self) -> usize {
        self.books
            .iter()
            .flat_map(|b| &b.chapters)
            .map(Vec::len)
            .sum()
    }
}

/// Read and validate a dataset file.
pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(validate(&value)?)
}

/// Validate a parsed document and convert it into a [`Dataset`].
pub fn validate(value: &Value) -> Result<Dataset, ValidateError> {
    let root = value.as_object().ok_or(ValidateError::NotAnObject)?;
    let books_value = root.get("books").ok_or(ValidateError::MissingBooks)?;
    let entries = books_value.as_array().ok_or(ValidateError::BooksNotArray)?;
    if entries.is_empty() {
        return Err(ValidateError::NoBooks);
    }

    let mut books = Vec::with_capacity(entries.len());
    let mut slugs: HashMap<String, BookLoc> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        let book = validate_book(index, entry)?;
        let loc = BookLoc {
            index,
            name: Some(book.name.clone()),
        };
        if let Some(first) = slugs.get(&book.slug) {
            return Err(ValidateError::DuplicateSlug(
                loc,
                book.slug.clone(),
                first.clone(),
            ));
        }
        slugs.insert(book.slug.clone(), loc);
        books.push(book);
    }

    Ok(Dataset {
        translation: non_empty_str(root.get("translation")).map(str::to_string),
        license_short: root
            .get("license")
            .and_then(|l| non_empty_str(l.get("short")))
            .map(str::to_string),
        books,
    })
}

fn validate_book(index: usize, entry: &Value) -> Result<Book, ValidateError> {
    let mut loc = BookLoc { index, name: None };
    let obj = entry
        .as_object()
        .ok_or_else(|| ValidateError::BookNotObject(loc.clone()))?;

    let name = non_empty_str(obj.get("name")).ok_or_else(|| ValidateError::BadName(loc.clone()))?;
    loc.name = Some(name.to_string());
    let slug = non_empty_str(obj.get("slug"))
        .filter(|s| slugify(s) == *s)
        .ok_or_else(|| ValidateError::BadSlug(loc.clone()))?;
    let chapter_values = obj
        .get("chapters")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidateError::ChaptersNotArray(loc.clone()))?;

    let mut chapters = Vec::with_capacity(chapter_values.len());
    for (ci, chapter_value) in chapter_values.iter().enumerate() {
        let chapter = ci + 1;
        let verse_values = chapter_value
            .as_array()
            .ok_or_else(|| ValidateError::ChapterNotArray(loc.clone(), chapter))?;

        let mut seen = HashSet::with_capacity(verse_values.len());
        let mut verses = Vec::with_capacity(verse_values.len());
        for (vi, verse_value) in verse_values.iter().enumerate() {
            let position = vi + 1;
            let verse = verse_value
                .as_object()
                .ok_or_else(|| ValidateError::VerseNotObject(loc.clone(), chapter, position))?;
            let number = verse
                .get("v")
                .and_then(verse_number)
                .ok_or_else(|| ValidateError::BadVerseNumber(loc.clone(), chapter, position))?;
            let text = verse
                .get("t")
                .and_then(Value::as_str)
                .ok_or_else(|| ValidateError::BadVerseText(loc.clone(), chapter, position))?;
            if !seen.insert(number) {
                return Err(ValidateError::DuplicateVerse(loc, chapter, number));
            }
            verses.push(Verse {
                number,
                text: text.to_string(),
            });
        }
        chapters.push(verses);
    }

    Ok(Book {
        name: name.to_string(),
        slug: slug.to_string(),
        chapters,
    })
}

/// A JSON number usable as a verse number: positive and integral.
///
/// `3.0` is accepted as 3; `2.5`, `0` and `-1` are not.
fn verse_number(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok().filter(|n| *n > 0);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= 1.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn loc(index: usize, name: &str) -> BookLoc {
        BookLoc {
            index,
            name: Some(name.to_string()),
        }
    }

    fn minimal() -> Value {
        json!({
            "translation": "LEB",
            "license": { "short": "Attribution required." },
            "books": [
                { "name": "Genesis", "slug": "genesis", "chapters": [
                    [ { "v": 1, "t": "In the beginning" }, { "v": 2, "t": "Now the earth" } ],
                    [ { "v": 1, "t": "Thus the heavens" } ]
                ] },
                { "name": "Exodus", "slug": "exodus", "chapters": [] }
            ]
        })
    }

    #[test]
    fn valid_document_converts() {
        let dataset = validate(&minimal()).unwrap();
        assert_eq!(dataset.translation.as_deref(), Some("LEB"));
        assert_eq!(dataset.license_short.as_deref(), Some("Attribution required."));
        assert_eq!(dataset.books.len(), 2);
        assert_eq!(dataset.books[0].chapters[1][0].text, "Thus the heavens");
        assert_eq!(dataset.verse_count(), 3);
    }

    #[test]
    fn empty_object_is_missing_books() {
        assert_eq!(validate(&json!({})), Err(ValidateError::MissingBooks));
    }

    #[test]
    fn non_object_root_rejected() {
        assert_eq!(validate(&json!([1, 2])), Err(ValidateError::NotAnObject));
    }

    #[test]
    fn books_must_be_array() {
        assert_eq!(
            validate(&json!({ "books": { "name": "Genesis" } })),
            Err(ValidateError::BooksNotArray)
        );
    }

    #[test]
    fn books_must_not_be_empty() {
        assert_eq!(validate(&json!({ "books": [] })), Err(ValidateError::NoBooks));
    }

    #[test]
    fn book_without_name_rejected() {
        let doc = json!({ "books": [ { "slug": "genesis", "chapters": [] } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::BadName(BookLoc {
                index: 0,
                name: None
            }))
        );
    }

    #[test]
    fn book_with_empty_slug_rejected() {
        let doc = json!({ "books": [ { "name": "Genesis", "slug": "", "chapters": [] } ] });
        assert_eq!(validate(&doc), Err(ValidateError::BadSlug(loc(0, "Genesis"))));
    }

    #[test]
    fn slug_must_be_a_path_segment() {
        for bad in ["../x", "a/b", "Genesis", "song of songs", "-ruth", "ruth--2", "."] {
            let doc = json!({ "books": [ { "name": "Genesis", "slug": bad, "chapters": [] } ] });
            assert_eq!(
                validate(&doc),
                Err(ValidateError::BadSlug(loc(0, "Genesis"))),
                "slug {bad:?} accepted"
            );
        }
    }

    #[test]
    fn canon_slugs_accepted() {
        let doc = json!({ "books": [
            { "name": "1 Corinthians", "slug": "1-corinthians", "chapters": [] },
            { "name": "Song of Songs", "slug": "song-of-songs", "chapters": [] }
        ] });
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn chapters_must_be_array() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": "many" } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::ChaptersNotArray(loc(0, "Ruth")))
        );
    }

    #[test]
    fn chapter_must_be_array() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [ [], {} ] } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::ChapterNotArray(loc(0, "Ruth"), 2))
        );
    }

    #[test]
    fn verse_must_be_object() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [ [ "text" ] ] } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::VerseNotObject(loc(0, "Ruth"), 1, 1))
        );
    }

    #[test]
    fn verse_number_must_be_numeric() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [
            [ { "v": 1, "t": "a" }, { "v": "2", "t": "b" } ]
        ] } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::BadVerseNumber(loc(0, "Ruth"), 1, 2))
        );
    }

    #[test]
    fn verse_number_must_be_positive_integer() {
        for bad in [json!(0), json!(-3), json!(2.5)] {
            let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [
                [ { "v": bad, "t": "a" } ]
            ] } ] });
            assert!(matches!(
                validate(&doc),
                Err(ValidateError::BadVerseNumber(_, 1, 1))
            ));
        }
    }

    #[test]
    fn integral_float_verse_number_accepted() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [
            [ { "v": 4.0, "t": "a" } ]
        ] } ] });
        assert_eq!(validate(&doc).unwrap().books[0].chapters[0][0].number, 4);
    }

    #[test]
    fn verse_text_must_be_string() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [
            [ { "v": 1, "t": null } ]
        ] } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::BadVerseText(loc(0, "Ruth"), 1, 1))
        );
    }

    #[test]
    fn sparse_verse_numbers_taken_as_given() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [
            [ { "v": 1, "t": "a" }, { "v": 5, "t": "e" } ]
        ] } ] });
        let dataset = validate(&doc).unwrap();
        let numbers: Vec<u32> = dataset.books[0].chapters[0].iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 5]);
    }

    #[test]
    fn duplicate_verse_number_rejected() {
        let doc = json!({ "books": [ { "name": "Ruth", "slug": "ruth", "chapters": [
            [ { "v": 1, "t": "a" }, { "v": 1, "t": "b" } ]
        ] } ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::DuplicateVerse(loc(0, "Ruth"), 1, 1))
        );
    }

    #[test]
    fn duplicate_slug_rejected() {
        let doc = json!({ "books": [
            { "name": "1 John", "slug": "1-john", "chapters": [] },
            { "name": "I John", "slug": "1-john", "chapters": [] }
        ] });
        assert_eq!(
            validate(&doc),
            Err(ValidateError::DuplicateSlug(
                loc(1, "I John"),
                "1-john".to_string(),
                loc(0, "1 John")
            ))
        );
    }

    #[test]
    fn error_message_names_location() {
        let doc = json!({ "books": [
            { "name": "Genesis", "slug": "genesis", "chapters": [] },
            { "name": "Exodus", "slug": "exodus", "chapters": [ [], [], [ { "v": 1 } ] ] }
        ] });
        let message = validate(&doc).unwrap_err().to_string();
        assert_eq!(message, "books[1] (Exodus) chapter 3 entry 1: `t` must be a string");
    }

    #[test]
    fn late_defect_rejects_whole_document() {
        let mut doc = minimal();
        doc["books"][1]["chapters"] = json!([[{ "v": 1, "t": 7 }]]);
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bible.json");
        fs::write(&path, minimal().to_string()).unwrap();
        assert_eq!(load(&path).unwrap().books[0].slug, "genesis");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }

    #[test]
    fn load_invalid_json_is_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bible.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path), Err(DatasetError::Json(_))));
    }

    #[test]
    fn load_empty_object_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bible.json");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            load(&path),
            Err(DatasetError::Invalid(ValidateError::MissingBooks))
        ));
    }
}
