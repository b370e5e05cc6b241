//! Core data structures for the PaperBLAST tool family.
//!
//! One result envelope per tool, each carrying a `warnings` list and a
//! canonical browser URL so a human can verify machine output:
//!
//! - [`SearchResults`]       → `paperblast_search`
//! - [`GenePapersResults`]   → `paperblast_gene_papers`
//! - [`CuratedBlastResults`] → `curated_blast_search`
//! - [`GapMindResults`]      → `gapmind_check`
//! - [`OrganismIndex`]       → `gapmind_check` (unresolved) / `gapmind_list_organisms`
//!
//! All entities are created fresh per call and discarded after serialization;
//! there is no persistent state.

mod genome;
mod hit;
mod pathway;

pub use genome::{CuratedBlastResults, CuratedMatch, ProteinLink};
pub use hit::{GeneEntry, GenePapersResults, PaperBlastHit, PaperRef, PaperSource, SearchResults};
pub use pathway::{Confidence, GapMindResults, Organism, OrganismIndex, Pathway};
