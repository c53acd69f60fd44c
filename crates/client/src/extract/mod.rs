//! Structural content extraction from raw HTML.
//!
//! ### Algorithm
//! - `script`, `style`, `noscript` and `iframe` subtrees never contribute text.
//! - Single values: `<title>` text and `<meta name="description">` content.
//! - Headings: every `h1` joined by a space, same for `h2`.
//! - Body candidates: `article`, `main`, elements whose class or id contains
//!   "content", then all `p` and all `li`.
//! - Everything above is joined in that order, normalized and capped at
//!   [`MAX_CONTENT_CHARS`].
//!
//! ### Stable Abstraction
//! - Callers depend on the `Extractor` trait so the engine can be swapped.

pub mod normalize;

pub use normalize::{normalize_text, truncate_chars};

use std::sync::LazyLock;

use pagesift_core::content::MAX_CONTENT_CHARS;
use pagesift_core::{Error, Headings, ScrapedContent};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text is never extracted.
const STRIPPED_TAGS: &[&str] = &["script", "style", "noscript", "iframe"];

struct Selectors {
    title: Selector,
    meta_description: Selector,
    h1: Selector,
    h2: Selector,
    article: Selector,
    main: Selector,
    content_block: Selector,
    paragraph: Selector,
    list_item: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    let parse = |css: &str| Selector::parse(css).expect("invalid selector");
    Selectors {
        title: parse("title"),
        meta_description: parse(r#"meta[name="description"]"#),
        h1: parse("h1"),
        h2: parse("h2"),
        article: parse("article"),
        main: parse("main"),
        content_block: parse(r#"[class*="content"], [id*="content"]"#),
        paragraph: parse("p"),
        list_item: parse("li"),
    }
});

/// Stable extractor trait for content extraction.
pub trait Extractor: Send + Sync {
    /// Build a successful `ScrapedContent` for `url` from its HTML.
    fn extract(&self, html: &str, url: &str) -> Result<ScrapedContent, Error>;
}

/// CSS-selector based extractor built on `scraper`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorExtractor;

impl SelectorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<ScrapedContent, Error> {
        if html.trim().is_empty() {
            return Err(Error::ExtractFailed("empty document".into()));
        }

        let document = Html::parse_document(html);
        let s = &*SELECTORS;

        let title = joined_text(&document, &s.title, "");
        let meta_description = document
            .select(&s.meta_description)
            .find(|el| !is_stripped(el))
            .and_then(|el| el.value().attr("content"))
            .unwrap_or_default()
            .to_string();
        let h1 = joined_text(&document, &s.h1, " ");
        let h2 = joined_text(&document, &s.h2, " ");

        let article = joined_text(&document, &s.article, " ");
        let main = joined_text(&document, &s.main, " ");
        let content_blocks = joined_text(&document, &s.content_block, " ");
        let paragraphs = joined_text(&document, &s.paragraph, " ");
        let list_items = joined_text(&document, &s.list_item, " ");

        let combined = [
            &title,
            &meta_description,
            &h1,
            &h2,
            &article,
            &main,
            &content_blocks,
            &paragraphs,
            &list_items,
        ]
        .map(String::as_str)
        .join(" ");

        let content = truncate_chars(normalize_text(&combined), MAX_CONTENT_CHARS);

        Ok(ScrapedContent::new(
            url,
            normalize_text(&title),
            Headings { h1: normalize_text(&h1), h2: normalize_text(&h2) },
            normalize_text(&meta_description),
            content,
        ))
    }
}

/// Text of every match outside stripped subtrees, joined with `separator`.
fn joined_text(document: &Html, selector: &Selector, separator: &str) -> String {
    document
        .select(selector)
        .filter(|el| !is_stripped(el))
        .map(element_text)
        .collect::<Vec<_>>()
        .join(separator)
}

/// True if the element is, or sits inside, a stripped tag.
fn is_stripped(element: &ElementRef<'_>) -> bool {
    STRIPPED_TAGS.contains(&element.value().name())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| STRIPPED_TAGS.contains(&ancestor.value().name()))
}

/// Concatenated descendant text, skipping stripped subtrees.
fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if STRIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}
