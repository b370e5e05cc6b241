//! Thin traversal layer over a parsed HTML document.
//!
//! The CGI pages are rendered HTML, not an API contract, so every extractor
//! works through a handful of shared primitives: whitespace-collapsed text,
//! attribute-regex lookups, forward sibling walks, and link normalization
//! against the fixed base origin. All access is read-only.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::ProteinLink;

/// Parse raw markup into a queryable tree.
///
/// html5ever recovers from malformed nesting rather than failing, so this
/// never errors; truly unusable bodies surface earlier as fetch errors.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compile a selector that is known-valid at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Extract the text of an element with whitespace collapsed to single spaces.
pub fn clean_text(el: ElementRef) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a root-relative href against the base origin.
pub fn normalize_href(href: &str, base: &str) -> String {
    if href.starts_with('/') {
        match url::Url::parse(base).and_then(|b| b.join(href)) {
            Ok(joined) => joined.to_string(),
            Err(_) => format!("{}{}", base.trim_end_matches('/'), href),
        }
    } else {
        href.to_string()
    }
}

/// All elements of `tag` under `root` whose attribute `attr` matches `re`.
pub fn find_by_attr_regex<'a>(
    root: &'a Html,
    tag: &str,
    attr: &str,
    re: &Regex,
) -> Vec<ElementRef<'a>> {
    let sel = selector(&format!("{}[{}]", tag, attr));
    root.select(&sel)
        .filter(|el| el.value().attr(attr).is_some_and(|v| re.is_match(v)))
        .collect()
}

/// Like [`find_by_attr_regex`] but scoped to a subtree.
pub fn find_by_attr_regex_in<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    attr: &str,
    re: &Regex,
) -> Vec<ElementRef<'a>> {
    let sel = selector(&format!("{}[{}]", tag, attr));
    scope
        .select(&sel)
        .filter(|el| el.value().attr(attr).is_some_and(|v| re.is_match(v)))
        .collect()
}

/// Following sibling elements of `el`, in document order.
pub fn following_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// First enclosing ancestor with the given tag name.
pub fn enclosing<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == tag)
}

/// Extract all hyperlinks under `scope` as (text, normalized href) pairs.
pub fn extract_links(scope: ElementRef, base: &str) -> Vec<ProteinLink> {
    let sel = selector("a[href]");
    scope
        .select(&sel)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let text = clean_text(a);
            if text.is_empty() && href.is_empty() {
                return None;
            }
            Some(ProteinLink::new(text, normalize_href(href, base)))
        })
        .collect()
}
