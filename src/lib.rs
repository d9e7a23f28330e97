//! # LEB Verses
//!
//! A static site generator that publishes the Lexham English Bible as one
//! HTML page per verse, at stable addresses like `/john/3/16/`.
//!
//! # Architecture: Ingest, Then a Two-Phase Build
//!
//! ```text
//! 1. Ingest    bible.txt   →  bible.json   (tab-separated lines → nested dataset)
//! 2. Build     bible.json  →  dist/        (validate → index → guard → emit)
//! ```
//!
//! Ingestion is tolerant: a bad line is logged and skipped. The build is the
//! opposite. The dataset is validated completely in memory and any violation
//! stops the run before the output directory is touched. Only a dataset that
//! passes validation is flattened into the canonical verse sequence, and only
//! a sequence that clears the verse-count guard is written as pages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`canon`] | The 66 book names in canonical order, slug rules |
//! | [`types`] | Serialized dataset document written by ingestion |
//! | [`ingest`] | Plain-text normalizer producing the dataset JSON |
//! | [`dataset`] | Structural validation of the dataset JSON into typed books |
//! | [`index`] | Flattened verse sequence with previous/next neighbours |
//! | [`render`] | Maud templates for every page |
//! | [`manifest`] | `/index.json` and `/meta.json` lookup documents |
//! | [`guard`] | Minimum verse-count check |
//! | [`generate`] | Clears the output directory and writes the site |
//! | [`config`] | `site.toml` loading, validation and colour CSS |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## One Page Per Verse
//!
//! Every verse is a real file at `/<book>/<chapter>/<verse>/index.html`, so
//! any static host serves it and every verse has a shareable canonical URL.
//! Shared CSS and JavaScript live once under `/assets/` rather than being
//! inlined into tens of thousands of pages.
//!
//! ## Self-Referencing Edges
//!
//! The first verse's previous link and the last verse's next link point at
//! the page itself. Every page has both links and no wraparound jump from
//! Revelation to Genesis.
//!
//! ## Reproducible Output
//!
//! Nothing time- or environment-dependent reaches the output. Rebuilding
//! unchanged input gives byte-identical files, so deploys only ship real
//! changes.

pub mod canon;
pub mod config;
pub mod dataset;
pub mod generate;
pub mod guard;
pub mod index;
pub mod ingest;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
