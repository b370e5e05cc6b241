//! Models for Curated BLAST genome-search results (genomeSearch.cgi).

use serde::{Deserialize, Serialize};

/// A hyperlink extracted from result HTML, typically to a database entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProteinLink {
    /// Display text of the link
    pub text: String,

    /// Full URL target
    pub href: String,
}

impl ProteinLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// One genome protein with its best characterized match from Curated BLAST.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuratedMatch {
    /// Description of the genome protein (gene name, locus tag, annotation)
    pub description: String,

    /// Summary of the best curated match, with identity
    pub details: String,

    /// Sequence identity of the best curated match (e.g. "64% id")
    pub identity: String,

    /// How many curated proteins matched this genome protein
    pub curated_hits: usize,

    /// Links to the genome protein and its best curated match
    pub links: Vec<ProteinLink>,
}

/// Results from a Curated BLAST functional search against a genome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuratedBlastResults {
    /// Search query description from the page title
    pub query_info: String,

    /// Number of relevant genome proteins found, regardless of truncation
    pub total_matches: usize,

    /// Genome proteins with their best characterized matches
    pub matches: Vec<CuratedMatch>,

    /// URL to view the full results in a browser
    pub search_url: String,

    /// Parser warnings
    pub warnings: Vec<String>,
}
