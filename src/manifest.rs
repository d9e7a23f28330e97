//! Client-side lookup files derived from the verse index.
//!
//! - `/index.json`: `{ "verses": ["/genesis/1/1/", ...] }` every page path in
//!   canonical order; the random-verse button picks one uniformly.
//! - `/meta.json`: `{ "books": [{ "name", "slug", "chapters": [31, 25, ...],
//!   "last": [31, 25, ...] }] }` verse count and highest verse number per
//!   chapter. Search clamps out-of-range chapter and verse numbers against
//!   them before redirecting; `last` differs from `chapters` only when a
//!   chapter's verse numbers have gaps.
//!
//! Both are snapshots of the same [`VerseIndex`] the pages are rendered
//! from, so ordering and slugs always agree with the emitted site.

use crate::index::VerseIndex;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PathManifest<'a> {
    pub verses: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct BookMeta<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub chapters: &'a [usize],
    pub last: &'a [u32],
}

#[derive(Debug, Serialize)]
pub struct MetaManifest<'a> {
    pub books: Vec<BookMeta<'a>>,
}

pub fn path_manifest(index: &VerseIndex) -> PathManifest<'_> {
    PathManifest {
        verses: index.paths(),
    }
}

pub fn meta_manifest(index: &VerseIndex) -> MetaManifest<'_> {
    MetaManifest {
        books: index
            .books()
            .iter()
            .map(|b| BookMeta {
                name: &b.name,
                slug: &b.slug,
                chapters: &b.chapter_lengths,
                last: &b.last_verses,
            })
            .collect(),
    }
}
