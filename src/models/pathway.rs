//! Models for GapMind metabolic gap analysis (gapView.cgi).

use serde::{Deserialize, Serialize};

use super::ProteinLink;

/// Qualitative pathway-completeness rating, decoded from inline styles on
/// the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// All steps found with good scores (green, bold)
    High,
    /// Some steps only weakly supported (plain black)
    Medium,
    /// Missing steps / gaps (red)
    Low,
    /// No recognized confidence encoding on the row
    Unknown,
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::Unknown
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// A metabolic pathway assessed by GapMind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pathway {
    /// Pathway name (e.g. "histidine biosynthesis")
    pub name: String,

    /// Summary status text from the second table column
    pub status: String,

    /// Overall confidence tier
    pub confidence: Confidence,

    /// Direct link to the detailed pathway view; per-step detail lives
    /// behind this URL, not in the envelope
    pub url: String,

    /// Links extracted from the pathway row
    pub links: Vec<ProteinLink>,
}

/// Organism-specific GapMind analysis results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapMindResults {
    /// Organism name from the results page
    pub organism: String,

    /// The GapMind organism ID that was queried
    pub org_id: String,

    /// Analysis type: "aa" or "carbon"
    pub analysis_type: String,

    /// Total number of pathways assessed
    pub total_pathways: usize,

    /// Pathways in the order GapMind lists them
    pub pathways: Vec<Pathway>,

    /// URL to view the full results in a browser
    pub gapmind_url: String,

    /// Parser warnings
    pub warnings: Vec<String>,
}

/// An organism available in the GapMind pre-computed index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organism {
    /// GapMind organism identifier (e.g. "FitnessBrowser__pseudo1_N1B4")
    pub org_id: String,

    /// Display name (e.g. "Pseudomonas fluorescens FW300-N1B4")
    pub name: String,

    /// Taxonomic lineage, if the index exposes one
    pub taxonomy: String,
}

/// Index of organisms with pre-computed GapMind results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganismIndex {
    /// Analysis type: "aa" or "carbon"
    pub analysis_type: String,

    /// Number of organisms in the index
    pub total_organisms: usize,

    /// Available organisms; pass org_id values to gapmind_check
    pub organisms: Vec<Organism>,

    /// URL to view the organism index in a browser
    pub index_url: String,

    /// Parser warnings
    pub warnings: Vec<String>,
}
