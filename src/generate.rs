//! Static site emission.
//!
//! Final stage of the build. Takes a validated dataset and its verse index
//! and writes the whole site into a freshly cleared output directory.
//!
//! ## Ordering
//!
//! Validation has already happened in memory before anything here runs. The
//! guard is checked next: a short dataset gets only its lookup files and a
//! health page, and the build fails. Verse pages are written only after the
//! guard passes.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Redirect to the first verse
//! ├── 404.html                   # Not-found page with reference resolution
//! ├── index.json                 # Every page path, canonical order
//! ├── meta.json                  # Per-book chapter lengths
//! ├── robots.txt
//! ├── CNAME                      # Only when configured
//! ├── LICENSE-LEB.txt
//! ├── BUILD.txt                  # Counts for this build
//! ├── assets/
//! │   ├── site.css
//! │   └── site.js
//! ├── license/index.html
//! └── genesis/
//!     └── 1/
//!         ├── 1/index.html       # One page per verse
//!         └── 2/index.html
//! ```
//!
//! `health.html` replaces everything but the lookup files when the guard trips.

use crate::config::{self, SiteConfig};
use crate::dataset::{self, Dataset, DatasetError};
use crate::guard::{self, GuardReport};
use crate::index::VerseIndex;
use crate::manifest;
use crate::render::{self, Site};
use maud::Markup;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Build guard failed: {0}; see health.html")]
    Guard(GuardReport),
}

/// Per-book line of the build summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BookTotals {
    pub name: String,
    pub slug: String,
    pub chapters: usize,
    pub verses: usize,
}

/// What a successful build wrote.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub books: Vec<BookTotals>,
    pub pages: usize,
    pub first_path: String,
    pub guard: GuardReport,
}

/// Load, validate, index and emit in one call.
pub fn build(
    dataset_path: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<BuildSummary, GenerateError> {
    let dataset = dataset::load(dataset_path)?;
    tracing::info!(books = dataset.books.len(), "dataset valid");
    let index = VerseIndex::build(&dataset);
    tracing::info!(verses = index.len(), "index built");
    generate(&dataset, &index, output_dir, config)
}

/// Write the site for an already validated and indexed dataset.
pub fn generate(
    dataset: &Dataset,
    index: &VerseIndex,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<BuildSummary, GenerateError> {
    let site = Site::new(config, dataset);
    let report = guard::check(index.len(), &config.guard);

    prepare_output_dir(output_dir)?;
    write_json(&output_dir.join("index.json"), &manifest::path_manifest(index))?;
    write_json(&output_dir.join("meta.json"), &manifest::meta_manifest(index))?;

    let first = match index.first() {
        Some(first) if report.passed() => first,
        _ => {
            write_html(
                &output_dir.join("health.html"),
                render::render_health_page(&site, &report),
            )?;
            write_assets(output_dir, config)?;
            tracing::error!(
                actual = report.actual,
                minimum = report.minimum,
                "verse count below minimum, wrote health.html"
            );
            return Err(GenerateError::Guard(report));
        }
    };

    write_assets(output_dir, config)?;

    for entry in index.entries() {
        let record = entry.record;
        let page_dir = output_dir
            .join(&record.book_slug)
            .join(record.chapter.to_string())
            .join(record.verse.to_string());
        fs::create_dir_all(&page_dir)?;
        write_html(
            &page_dir.join("index.html"),
            render::render_verse_page(&site, entry),
        )?;
    }
    tracing::info!(pages = index.len(), "verse pages written");

    write_html(
        &output_dir.join("index.html"),
        render::render_redirect_page(&site, &first.path),
    )?;
    write_html(
        &output_dir.join("404.html"),
        render::render_not_found_page(&site, &first.path),
    )?;
    let license_dir = output_dir.join("license");
    fs::create_dir_all(&license_dir)?;
    write_html(
        &license_dir.join("index.html"),
        render::render_license_page(&site),
    )?;

    fs::write(output_dir.join("robots.txt"), "User-agent: *\nAllow: /\n")?;
    fs::write(output_dir.join("LICENSE-LEB.txt"), render::LICENSE_TXT)?;
    if let Some(cname) = &config.cname {
        fs::write(output_dir.join("CNAME"), format!("{cname}\n"))?;
    }

    let books = summarize_books(index);
    fs::write(
        output_dir.join("BUILD.txt"),
        build_note(&site, books.len(), index.len()),
    )?;

    Ok(BuildSummary {
        books,
        pages: index.len(),
        first_path: first.path.clone(),
        guard: report,
    })
}

/// Remove any previous output and recreate the directory empty.
fn prepare_output_dir(output_dir: &Path) -> std::io::Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)
}

fn write_assets(output_dir: &Path, config: &SiteConfig) -> std::io::Result<()> {
    let assets = output_dir.join("assets");
    fs::create_dir_all(&assets)?;
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        render::CSS_STATIC
    );
    fs::write(assets.join("site.css"), css)?;
    fs::write(assets.join("site.js"), render::JS)
}

fn write_html(path: &Path, markup: Markup) -> std::io::Result<()> {
    fs::write(path, markup.into_string())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), GenerateError> {
    fs::write(path, serde_json::to_string(value)?)?;
    Ok(())
}

fn summarize_books(index: &VerseIndex) -> Vec<BookTotals> {
    index
        .books()
        .iter()
        .map(|b| BookTotals {
            name: b.name.clone(),
            slug: b.slug.clone(),
            chapters: b.chapter_lengths.len(),
            verses: b.chapter_lengths.iter().sum(),
        })
        .collect()
}

fn build_note(site: &Site, books: usize, verses: usize) -> String {
    format!(
        "{title} build output\n\
         - Translation: {translation}\n\
         - Books: {books}\n\
         - Verse pages: {verses}\n\
         - Every page lives at /<book>/<chapter>/<verse>/index.html\n",
        title = site.title,
        translation = site.translation,
    )
}

// ============================================================================
// Tests
// ============================================================================
