//! Models for PaperBLAST literature-search results (litSearch.cgi).

use serde::{Deserialize, Serialize};

/// How a hit's literature links were obtained.
///
/// Curated entries can be drilled into with `paperblast_gene_papers`;
/// text-mining-only hits come back empty from that endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSource {
    /// Papers from curated databases (Swiss-Prot, BRENDA, MetaCyc, ...)
    Curated,
    /// EuropePMC text mining only
    TextMining,
    /// Both curated papers and text-mined snippets
    Both,
    /// Neither detected
    Unknown,
}

impl PaperSource {
    /// Classify from the evidence found in one hit block.
    pub fn classify(curated_papers: usize, snippets: usize) -> Self {
        match (curated_papers > 0, snippets > 0) {
            (true, true) => PaperSource::Both,
            (true, false) => PaperSource::Curated,
            (false, true) => PaperSource::TextMining,
            (false, false) => PaperSource::Unknown,
        }
    }
}

impl std::fmt::Display for PaperSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaperSource::Curated => "curated",
            PaperSource::TextMining => "text_mining",
            PaperSource::Both => "both",
            PaperSource::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// A reference to a scientific paper linked to a protein.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperRef {
    /// Paper title or link text as shown in PaperBLAST
    pub title: String,

    /// Direct URL to the paper (PubMed, DOI, or EuropePMC)
    pub url: String,

    /// Author, journal and year string (e.g. "Smith et al., Nature 2020")
    pub citation: String,

    /// Relevant quoted excerpt mentioning the protein, if text-mined
    pub snippet: String,
}

/// A curated database entry for a gene within a PaperBLAST hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneEntry {
    /// Gene or protein display name
    pub name: String,

    /// Source database (e.g. "SwissProt", "CharProtDB", "BRENDA")
    pub db: String,

    /// Functional description from the curated database
    pub description: String,

    /// Source organism (e.g. "Escherichia coli K-12")
    pub organism: String,

    /// Identifier embedded in the curated:: event marker. Display-level id;
    /// NOT valid as the gene_id argument to paperblast_gene_papers
    pub gene_id: String,
}

/// A single BLAST hit from PaperBLAST with associated literature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperBlastHit {
    /// Curated database entries for this hit protein
    pub gene_entries: Vec<GeneEntry>,

    /// Sequence identity to query (e.g. "100%"), empty if absent
    pub identity: String,

    /// Query coverage (e.g. "89%"), empty if absent
    pub coverage: String,

    /// Experimentally characterized function, empty for text-mining-only hits
    pub function: String,

    /// Subunit composition or complex membership, if annotated
    pub subunit: String,

    /// Number of curated papers linked to this gene
    pub total_curated_papers: usize,

    /// Text-mined paper references with excerpts
    pub paper_snippets: Vec<PaperRef>,

    /// Provenance of the literature links
    pub paper_source: PaperSource,

    /// Bare accession for the `more=` drill-down endpoint (e.g. "P0AEZ3").
    /// Empty if the hit has no detail page. Use this, not gene_entries[].gene_id
    pub detail_id: String,
}

impl PaperBlastHit {
    /// A hit with neither gene entries nor snippets is a parsing artifact.
    pub fn has_content(&self) -> bool {
        !self.gene_entries.is_empty() || !self.paper_snippets.is_empty()
    }
}

/// Complete results from a PaperBLAST protein literature search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Parsed header showing the query protein
    /// (e.g. "PaperBLAST Hits for P0AEZ3 MinD (Escherichia coli) (270 a.a.)")
    pub query_info: String,

    /// Total number of similar proteins found, regardless of truncation
    pub total_found: usize,

    /// Hits in the service's own relevance order (best first)
    pub hits: Vec<PaperBlastHit>,

    /// URL to view the full results in a browser
    pub search_url: String,

    /// Parser warnings (unexpected structure, truncation, upstream notices)
    pub warnings: Vec<String>,
}

/// Full paper list for a specific PaperBLAST gene (`more=` drill-down).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenePapersResults {
    /// The (normalized) gene identifier that was queried
    pub gene_id: String,

    /// Total papers found for this gene
    pub total_found: usize,

    /// Paper hits for this gene
    pub hits: Vec<PaperBlastHit>,

    /// URL to view the full paper list in a browser
    pub detail_url: String,

    /// Parser warnings
    pub warnings: Vec<String>,
}

impl Default for PaperSource {
    fn default() -> Self {
        PaperSource::Unknown
    }
}
