//! CLI output formatting for every command.
//!
//! Output is a book-by-book inventory: each line leads with the book's
//! canonical position and name, with counts and paths as secondary detail.
//! Diagnostics that explain a failure (skipped lines, guard shortfall) follow
//! the inventory as indented context.
//!
//! # Output Format
//!
//! ## Ingest
//!
//! ```text
//! 001 Genesis (50 chapters, 1533 verses)
//! 002 Exodus (40 chapters, 1213 verses)
//! ...
//! Skipped 2 lines
//!     line 14: missing tab-separated reference or text
//!     line 90: unknown book: Hezekiah
//!
//! Wrote 31102 verses to data/bible.json
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Genesis → genesis/ (50 chapters, 1533 verses)
//! ...
//! Generated 31102 verse pages from 66 books → dist
//!     Start: /genesis/1/1/
//! ```
//!
//! ## Check
//!
//! ```text
//! Dataset valid: 66 books, 31102 verses
//! Guard: passed (31102 indexed, minimum 31000)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::dataset::Dataset;
use crate::generate::BuildSummary;
use crate::guard::GuardReport;
use crate::ingest::Ingested;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn book_detail(chapters: usize, verses: usize) -> String {
    format!(
        "({}, {})",
        plural(chapters, "chapter", "chapters"),
        plural(verses, "verse", "verses")
    )
}

// ============================================================================
// Ingest
// ============================================================================

pub fn format_ingest_output(ingested: &Ingested, output: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, book) in ingested.books.iter().enumerate() {
        if book.chapters.is_empty() {
            continue;
        }
        let verses: usize = book.chapters.iter().map(Vec::len).sum();
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            book.name,
            book_detail(book.chapters.len(), verses)
        ));
        let gaps = book
            .chapters
            .iter()
            .flatten()
            .filter(|t| t.is_empty())
            .count();
        if gaps > 0 {
            lines.push(format!(
                "{}{} with no text",
                indent(1),
                plural(gaps, "verse", "verses")
            ));
        }
    }

    if !ingested.skipped.is_empty() {
        lines.push(format!(
            "Skipped {}",
            plural(ingested.skipped.len(), "line", "lines")
        ));
        for skip in &ingested.skipped {
            lines.push(format!("{}line {}: {}", indent(1), skip.line, skip.reason));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Wrote {} to {}",
        plural(ingested.accepted, "verse", "verses"),
        output.display()
    ));
    lines
}

pub fn print_ingest_output(ingested: &Ingested, output: &Path) {
    for line in format_ingest_output(ingested, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, book) in summary.books.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/ {}",
            format_index(i + 1),
            book.name,
            book.slug,
            book_detail(book.chapters, book.verses)
        ));
    }

    lines.push(format!(
        "Generated {} from {} → {}",
        plural(summary.pages, "verse page", "verse pages"),
        plural(summary.books.len(), "book", "books"),
        output_dir.display()
    ));
    lines.push(format!("{}Start: {}", indent(1), summary.first_path));
    lines
}

pub fn print_build_output(summary: &BuildSummary, output_dir: &Path) {
    for line in format_build_output(summary, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(dataset: &Dataset, report: &GuardReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Dataset valid: {}, {}",
        plural(dataset.books.len(), "book", "books"),
        plural(dataset.verse_count(), "verse", "verses")
    )];
    if report.passed() {
        lines.push(format!(
            "Guard: passed ({} indexed, minimum {})",
            report.actual, report.minimum
        ));
    } else {
        lines.push(format!(
            "Guard: FAILED ({} indexed, minimum {})",
            report.actual, report.minimum
        ));
        lines.push(format!(
            "{}{} short of the expected {}",
            indent(1),
            plural(report.shortfall(), "verse", "verses"),
            report.expected
        ));
    }
    lines
}

pub fn print_check_output(dataset: &Dataset, report: &GuardReport) {
    for line in format_check_output(dataset, report) {
        println!("{}", line);
    }
}
