//! HTML-to-structured-data extraction for the PaperBLAST tool family.
//!
//! The upstream pages are rendered by a generic HTML writer whose exact tag
//! nesting is an implementation detail, so each extractor here is a set of
//! positional and attribute heuristics rather than a fixed schema. A missing
//! piece of markup degrades one field and appends a warning; it never fails
//! the whole response.
//!
//! - [`dom`]: traversal primitives over a parsed document
//! - [`litsearch`]: literature-search hit blocks and field recovery
//! - [`genome_search`]: Curated BLAST genome-protein tables
//! - [`gapmind`]: pathway-confidence tables and the organism index
//! - [`organism`]: fuzzy organism-name resolution

pub mod dom;
pub mod gapmind;
pub mod genome_search;
pub mod litsearch;
pub mod organism;

use regex::Regex;

/// Compile a pattern that is known-valid at compile time.
pub(crate) fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern must compile")
}
