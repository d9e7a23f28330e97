//! HTML templates.
//!
//! Every function here is pure: it takes already-built data and returns
//! [`Markup`], with no filesystem access. [`crate::generate`] decides where
//! the documents go.
//!
//! ## Pages
//!
//! - **Verse page**: reference, text, previous/next links, copy/share/random
//!   controls, static share links, reference search
//! - **Redirect page** (`/index.html`): sends visitors to the first verse
//! - **Not-found page** (`/404.html`): resolves loose references client-side
//! - **Health page** (`/health.html`): guard diagnostics for a failed build
//! - **License page** (`/license/`): attribution terms from bundled Markdown
//!
//! Templates use [maud](https://maud.lambda.xyz/), so verse text and book
//! names are HTML-escaped on interpolation. Pages contain no timestamps or
//! other per-run values; identical input renders byte-identical output.

use crate::config::SiteConfig;
use crate::dataset::Dataset;
use crate::guard::GuardReport;
use crate::index::Entry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

pub const CSS_STATIC: &str = include_str!("../static/style.css");
pub const JS: &str = include_str!("../static/site.js");
pub const LICENSE_MD: &str = include_str!("../static/license.md");
pub const LICENSE_TXT: &str = include_str!("../static/LICENSE-LEB.txt");

pub const CSS_PATH: &str = "/assets/site.css";
pub const JS_PATH: &str = "/assets/site.js";

const LEB_URL: &str = "https://lexhamenglishbible.com";
const LOGOS_URL: &str = "https://www.logos.com";

/// Longest `<meta name="description">`, in characters.
const DESCRIPTION_LEN: usize = 155;

/// Site-wide values shared by every page of one build.
#[derive(Debug, Clone)]
pub struct Site {
    pub title: String,
    /// Absolute origin without trailing slash.
    pub origin: String,
    pub translation: String,
    pub license_short: Option<String>,
    /// Book names offered as search suggestions.
    pub book_names: Vec<String>,
}

impl Site {
    /// Dataset values win over config fallbacks.
    pub fn new(config: &SiteConfig, dataset: &Dataset) -> Self {
        Self {
            title: config.site_title.clone(),
            origin: config.origin().to_string(),
            translation: dataset
                .translation
                .clone()
                .unwrap_or_else(|| config.translation.clone()),
            license_short: dataset.license_short.clone(),
            book_names: dataset.books.iter().map(|b| b.name.clone()).collect(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

// ============================================================================
// Share links
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub label: &'static str,
    pub href: String,
}

/// Outbound share links for a page, parameterized only by its URL and title.
pub fn share_links(url: &str, title: &str) -> Vec<ShareLink> {
    let u = encode_component(url);
    let t = encode_component(title);
    vec![
        ShareLink {
            label: "Facebook",
            href: format!("https://www.facebook.com/sharer/sharer.php?u={u}"),
        },
        ShareLink {
            label: "X",
            href: format!("https://twitter.com/intent/tweet?url={u}&text={t}"),
        },
        ShareLink {
            label: "WhatsApp",
            href: format!("https://wa.me/?text={t}%20{u}"),
        },
        ShareLink {
            label: "Telegram",
            href: format!("https://t.me/share/url?url={u}&text={t}"),
        },
        ShareLink {
            label: "Email",
            href: format!("mailto:?subject={t}&body={u}"),
        },
    ]
}

/// Percent-encode like JavaScript's `encodeURIComponent`.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Cut `text` to at most `max` characters on a char boundary, adding `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, head_extra: Markup, body_attrs: BodyAttrs, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width,initial-scale=1";
                title { (title) }
                link rel="stylesheet" href=(CSS_PATH);
                (head_extra)
            }
            body class=[body_attrs.class] data-resolve[body_attrs.resolve] {
                div.wrap {
                    (content)
                }
                script src=(JS_PATH) defer {}
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BodyAttrs {
    class: Option<&'static str>,
    /// Ask the script to resolve the current URL as a reference.
    resolve: bool,
}

fn site_header(site: &Site) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site.title) }
            div.site-subtitle { "The Holy Bible, " (translation_name(&site.translation)) }
        }
    }
}

fn translation_name(label: &str) -> String {
    if label == "LEB" {
        "Lexham English Bible (LEB)".to_string()
    } else {
        label.to_string()
    }
}

/// Reference search form with book-name suggestions.
fn search_widget(site: &Site) -> Markup {
    html! {
        form.search #search action="/404.html" method="get" role="search" {
            input.input #search-input type="search" name="ref" list="book-names"
                placeholder="Go to (e.g., John 3:16)" autocomplete="off" aria-label="Go to reference";
            button.btn type="submit" { "Go" }
            button.btn #random type="button" { "Random verse" }
        }
        div.search-error #search-error aria-live="polite" {}
        datalist #book-names {
            @for name in &site.book_names {
                option value=(name) {}
            }
        }
    }
}

fn site_footer(site: &Site) -> Markup {
    html! {
        footer.site-footer {
            p {
                "Scripture quotations marked "
                a href=(LEB_URL) target="_blank" rel="noopener" { (site.translation) }
                " are from the "
                a href=(LEB_URL) target="_blank" rel="noopener" { "Lexham English Bible" }
                ". Copyright © 2012 "
                a href=(LOGOS_URL) target="_blank" rel="noopener" { "Logos Bible Software" }
                ". “Lexham” is a registered trademark of Logos Bible Software."
            }
            @if let Some(short) = &site.license_short {
                p { (short) " " a href="/license/" { "License details" } }
            } @else {
                p { a href="/license/" { "License details" } }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one verse page.
pub fn render_verse_page(site: &Site, entry: Entry<'_>) -> Markup {
    let record = entry.record;
    let reference = record.reference();
    let share_title = format!("{} ({})", reference, site.translation);
    let page_title = format!("{} | {}", share_title, site.title);
    let url = site.url(&record.path);
    let description = truncate_chars(&record.text, DESCRIPTION_LEN);
    let copy_text = format!(
        "{}\n\n{}\n\n({}) {}",
        reference, record.text, site.translation, LEB_URL
    );

    let head = html! {
        link rel="canonical" href=(url);
        link rel="prev" href=(entry.prev.path);
        link rel="next" href=(entry.next.path);
        meta name="description" content=(description);
        meta property="og:type" content="article";
        meta property="og:title" content=(share_title);
        meta property="og:description" content=(description);
        meta property="og:url" content=(url);
    };

    let content = html! {
        (site_header(site))
        main.verse-page {
            nav.verse-nav {
                a.prev rel="prev" href=(entry.prev.path) title="Previous verse" {
                    "← " (entry.prev.reference())
                }
                h1.reference { (reference) }
                a.next rel="next" href=(entry.next.path) title="Next verse" {
                    (entry.next.reference()) " →"
                }
            }
            blockquote.verse-text cite=(url) {
                @if record.text.is_empty() {
                    p.verse-missing { "This verse has no text in the source edition." }
                } @else {
                    p { (record.text) }
                }
            }
            div.actions {
                button.btn #copy type="button" data-copy=(copy_text) { "Copy" }
                button.btn #share type="button" data-url=(url) data-title=(share_title) { "Share" }
            }
            ul.share-links {
                @for link in share_links(&url, &share_title) {
                    li {
                        a href=(link.href) target="_blank" rel="noopener" { (link.label) }
                    }
                }
            }
            (search_widget(site))
        }
        (site_footer(site))
    };

    base_document(&page_title, head, BodyAttrs::default(), content)
}

/// Renders `/index.html`: an immediate redirect to `target`.
pub fn render_redirect_page(site: &Site, target: &str) -> Markup {
    let refresh = format!("0; url={target}");
    let head = html! {
        meta http-equiv="refresh" content=(refresh);
        link rel="canonical" href=(site.url(target));
    };
    let content = html! {
        (site_header(site))
        main {
            p { "Opening " a href=(target) { (target) } "…" }
        }
    };
    base_document(&site.title, head, BodyAttrs::default(), content)
}

/// Renders `/404.html`: resolves `?ref=`, `#ref=` or loose paths client-side,
/// otherwise offers search.
pub fn render_not_found_page(site: &Site, first: &str) -> Markup {
    let content = html! {
        (site_header(site))
        main.not-found-page {
            h1 { "Verse not found" }
            p {
                "That address does not match a verse. Search for a reference, pick a random verse, or "
                a href=(first) { "start at the beginning" } "."
            }
            (search_widget(site))
        }
        (site_footer(site))
    };
    let attrs = BodyAttrs {
        class: None,
        resolve: true,
    };
    base_document(&format!("Not found | {}", site.title), html! {}, attrs, content)
}

/// Renders `/health.html` for a build the guard stopped.
pub fn render_health_page(site: &Site, report: &GuardReport) -> Markup {
    let content = html! {
        main.health-page {
            h1 { "Build health" }
            p.status { "FAILED: verse count below minimum. Do not deploy this output." }
            dl {
                dt { "Indexed verses" } dd #actual { (report.actual) }
                dt { "Expected verses" } dd #expected { (report.expected) }
                dt { "Minimum accepted" } dd #minimum { (report.minimum) }
                dt { "Missing" } dd #missing { (report.shortfall()) }
            }
        }
    };
    let attrs = BodyAttrs {
        class: Some("health"),
        resolve: false,
    };
    base_document(&format!("Build health | {}", site.title), html! {}, attrs, content)
}

/// Renders `/license/index.html` from the bundled Markdown.
pub fn render_license_page(site: &Site) -> Markup {
    let parser = Parser::new(LICENSE_MD);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let content = html! {
        (site_header(site))
        main.license-page {
            article { (PreEscaped(body_html)) }
        }
        (site_footer(site))
    };
    base_document(&format!("License | {}", site.title), html! {}, BodyAttrs::default(), content)
}

// ============================================================================
// Tests
// ============================================================================
