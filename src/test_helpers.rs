//! Shared test utilities for the leb-verses test suite.
//!
//! Builds synthetic datasets of a chosen shape so tests can exercise the
//! index, guard and emitter without a real Bible text on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! // Genesis with chapters of 2 and 1 verses, then Exodus with one chapter of 3
//! let dataset = dataset_with_shape(&[("Genesis", &[2, 1]), ("Exodus", &[3])]);
//!
//! // All 66 books, 31,102 verses in total
//! let full = full_canon_dataset();
//! ```

use crate::canon::{CANON, CANON_VERSE_COUNT, slugify};
use crate::dataset::{Book, Dataset, Verse};
use serde_json::{Value, json};

/// Longest chapter produced by [`canon_dataset`].
const CHAPTER_LEN: usize = 30;

fn verse_text(book: &str, chapter: usize, verse: usize) -> String {
    format!("Text of {book} {chapter}:{verse}.")
}

/// A dataset whose books have exactly the given chapter lengths.
pub fn dataset_with_shape(shape: &[(&str, &[usize])]) -> Dataset {
    let books = shape
        .iter()
        .map(|(name, lengths)| Book {
            name: name.to_string(),
            slug: slugify(name),
            chapters: lengths
                .iter()
                .enumerate()
                .map(|(ci, len)| {
                    (1..=*len)
                        .map(|v| Verse {
                            number: v as u32,
                            text: verse_text(name, ci + 1, v),
                        })
                        .collect()
                })
                .collect(),
        })
        .collect();

    Dataset {
        translation: Some("LEB".to_string()),
        license_short: Some("Free to distribute with attribution.".to_string()),
        books,
    }
}

/// All 66 canon books holding `total` verses between them.
///
/// Verses are spread as evenly as possible over the books; each book is cut
/// into chapters of at most 30 verses. Books left with no verses get no
/// chapters.
pub fn canon_dataset(total: usize) -> Dataset {
    let per_book = total / CANON.len();
    let remainder = total % CANON.len();
    let lengths: Vec<Vec<usize>> = (0..CANON.len())
        .map(|i| {
            let mut count = per_book + usize::from(i < remainder);
            let mut chapters = Vec::new();
            while count > 0 {
                let len = count.min(CHAPTER_LEN);
                chapters.push(len);
                count -= len;
            }
            chapters
        })
        .collect();
    let shape: Vec<(&str, &[usize])> = CANON
        .iter()
        .zip(&lengths)
        .map(|(name, chapters)| (*name, chapters.as_slice()))
        .collect();
    dataset_with_shape(&shape)
}

/// The whole canon at its real verse total.
pub fn full_canon_dataset() -> Dataset {
    canon_dataset(CANON_VERSE_COUNT)
}

/// The JSON document form of a dataset, as the build reads it from disk.
pub fn dataset_json(dataset: &Dataset) -> Value {
    let books: Vec<Value> = dataset
        .books
        .iter()
        .map(|book| {
            let chapters: Vec<Value> = book
                .chapters
                .iter()
                .map(|verses| {
                    verses
                        .iter()
                        .map(|v| json!({ "v": v.number, "t": v.text }))
                        .collect()
                })
                .collect();
            json!({ "name": book.name, "slug": book.slug, "chapters": chapters })
        })
        .collect();
    json!({
        "translation": dataset.translation,
        "license": { "short": dataset.license_short },
        "books": books,
    })
}
