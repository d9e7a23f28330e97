//! The fixed 66-book Protestant canon and URL slug derivation.
//!
//! Canon order is the single source of truth for global verse ordering: the
//! ingestion stage places books by their position in [`CANON`], and every
//! later stage trusts that the dataset's book order already matches it.
//!
//! ## Slugs
//!
//! A slug is the book name lowercased, with every run of characters outside
//! `[a-z0-9]` collapsed to one dash and leading/trailing dashes stripped:
//! - `"1 Corinthians"` → `"1-corinthians"`
//! - `"Song of Songs"` → `"song-of-songs"`
//! - `"Genesis"` → `"genesis"`

/// The 66 canonical book names, in canon order.
pub const CANON: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Songs",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Known verse total of the complete canon in the LEB versification.
pub const CANON_VERSE_COUNT: usize = 31_102;

/// Derive the URL slug for a book name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Position of a book in canon order, matched exactly by name.
pub fn canon_index(name: &str) -> Option<usize> {
    CANON.iter().position(|b| *b == name)
}
