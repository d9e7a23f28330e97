//! Canonical verse index.
//!
//! Flattens a validated [`Dataset`] into one ordered sequence of
//! [`VerseRecord`]s: books in document order, then chapters by position, then
//! verses by position. The builder never re-sorts; canon order is the
//! dataset's responsibility.
//!
//! Every record has a previous and a next neighbour. At the edges of the
//! canon the neighbour is the record itself, so the first page's "previous"
//! link and the last page's "next" link point back to their own page rather
//! than nowhere.

use crate::dataset::Dataset;
use serde::Serialize;

/// One verse with its place in the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseRecord {
    pub book: String,
    pub book_slug: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    /// `/<book_slug>/<chapter>/<verse>/`
    pub path: String,
}

impl VerseRecord {
    /// Human-readable reference, e.g. `"John 3:16"`.
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Page path for a verse.
pub fn canonical_path(book_slug: &str, chapter: u32, verse: u32) -> String {
    format!("/{book_slug}/{chapter}/{verse}/")
}

/// Per-book chapter shape, kept alongside the records for the metadata file.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub name: String,
    pub slug: String,
    /// Verse count of each chapter, in chapter order.
    pub chapter_lengths: Vec<usize>,
    /// Highest verse number of each chapter, 0 for an empty chapter.
    ///
    /// Equals the count when numbering is dense. With gaps (`v` = 1 and 5)
    /// only the endpoints are guaranteed pages, so lookups clamp to this and
    /// a number inside a gap still lands on the 404 page.
    pub last_verses: Vec<u32>,
}

/// The ordered verse sequence for one build.
#[derive(Debug, Clone)]
pub struct VerseIndex {
    records: Vec<VerseRecord>,
    books: Vec<BookSummary>,
}

impl VerseIndex {
    /// Flatten a dataset into canonical order.
    pub fn build(dataset: &Dataset) -> Self {
        let mut records = Vec::with_capacity(dataset.verse_count());
        let mut books = Vec::with_capacity(dataset.books.len());

        for book in &dataset.books {
            for (ci, verses) in book.chapters.iter().enumerate() {
                let chapter = ci as u32 + 1;
                for verse in verses {
                    records.push(VerseRecord {
                        book: book.name.clone(),
                        book_slug: book.slug.clone(),
                        chapter,
                        verse: verse.number,
                        text: verse.text.clone(),
                        path: canonical_path(&book.slug, chapter, verse.number),
                    });
                }
            }
            books.push(BookSummary {
                name: book.name.clone(),
                slug: book.slug.clone(),
                chapter_lengths: book.chapters.iter().map(Vec::len).collect(),
                last_verses: book
                    .chapters
                    .iter()
                    .map(|verses| verses.iter().map(|v| v.number).max().unwrap_or(0))
                    .collect(),
            });
            tracing::debug!(book = %book.name, chapters = book.chapters.len(), "indexed");
        }

        Self { records, books }
    }

    pub fn records(&self) -> &[VerseRecord] {
        &self.records
    }

    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&VerseRecord> {
        self.records.first()
    }

    /// Record before position `i`; the first record is its own predecessor.
    ///
    /// Panics if `i` is out of bounds.
    pub fn prev(&self, i: usize) -> &VerseRecord {
        &self.records[i.saturating_sub(1)]
    }

    /// Record after position `i`; the last record is its own successor.
    ///
    /// Panics if `i` is out of bounds.
    pub fn next(&self, i: usize) -> &VerseRecord {
        let last = self.records.len() - 1;
        &self.records[(i + 1).min(last)]
    }

    /// Iterate records together with their neighbours.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        (0..self.records.len()).map(move |i| Entry {
            record: &self.records[i],
            prev: self.prev(i),
            next: self.next(i),
        })
    }

    /// Every page path, in canonical order.
    pub fn paths(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.path.as_str()).collect()
    }
}

/// A record with resolved neighbours.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub record: &'a VerseRecord,
    pub prev: &'a VerseRecord,
    pub next: &'a VerseRecord,
}
