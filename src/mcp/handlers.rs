//! Tool handlers: argument parsing, one upstream fetch, extraction, envelope.
//!
//! Handlers return the serialized result envelope on success. Transport
//! failures become the error string from [`FetchError::user_message`];
//! structural surprises in the HTML never fail a call, they degrade fields
//! and append warnings inside the envelope.

use std::sync::Arc;

use serde_json::Value;

use crate::extract::{gapmind, genome_search, litsearch, organism};
use crate::mcp::tools::ToolHandler;
use crate::models::{GenePapersResults, OrganismIndex, SearchResults};
use crate::utils::PaperBlastClient;

const DEFAULT_MAX_HITS: i64 = 25;
const MAX_HITS_CEILING: i64 = 1000;
const DEFAULT_MAX_GENOME_HITS: i64 = 20;
const MAX_GENOME_HITS_CEILING: i64 = 100;

/// How many index entries to surface when an organism name fails to resolve.
const SUGGESTION_CAP: usize = 20;

fn to_value<T: serde::Serialize>(envelope: &T) -> Result<Value, String> {
    serde_json::to_value(envelope).map_err(|e| format!("serialization failed: {}", e))
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing '{}' parameter", key))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn analysis_type(args: &Value) -> Result<&str, String> {
    let set = args
        .get("analysis_type")
        .and_then(|v| v.as_str())
        .unwrap_or("aa");
    match set {
        "aa" | "carbon" => Ok(set),
        other => Err(format!(
            "Invalid analysis_type '{}'. Use 'aa' or 'carbon'.",
            other
        )),
    }
}

/// Drop a FASTA header line if present and strip whitespace from the
/// remaining sequence lines. Identifiers and free-text queries pass through
/// with surrounding whitespace trimmed.
fn strip_fasta_header(query: &str) -> String {
    let trimmed = query.trim();
    if !trimmed.starts_with('>') {
        return trimmed.to_string();
    }
    trimmed
        .lines()
        .skip(1)
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect()
}

/// Cap the emitted hit list. `total_found` is never reduced; a cap that
/// actually drops hits is recorded as a warning. `-1` means all hits, up to
/// the hard ceiling.
fn apply_hit_cap(results: &mut SearchResults, max_hits: i64) {
    let cap = if max_hits == -1 {
        MAX_HITS_CEILING as usize
    } else {
        max_hits as usize
    };
    if results.hits.len() <= cap {
        return;
    }
    results.hits.truncate(cap);
    if max_hits >= 0 {
        results.warnings.push(format!(
            "Showing top {} of {} hits. Raise max_hits (up to {}) or pass -1 for all.",
            cap, results.total_found, MAX_HITS_CEILING
        ));
    }
}

/// `paperblast_search`: BLAST-backed literature search (litSearch.cgi).
#[derive(Debug)]
pub struct PaperBlastSearchHandler {
    pub client: Arc<PaperBlastClient>,
}

#[async_trait::async_trait]
impl ToolHandler for PaperBlastSearchHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = strip_fasta_header(required_str(&args, "query")?);
        if query.len() < 2 {
            return Err("Query must be at least 2 characters.".to_string());
        }
        let max_hits = args
            .get("max_hits")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_MAX_HITS);
        if !(-1..=MAX_HITS_CEILING).contains(&max_hits) {
            return Err(format!(
                "max_hits must be between -1 and {}.",
                MAX_HITS_CEILING
            ));
        }

        let params = [("query", query.as_str())];
        let html = self
            .client
            .get("litSearch.cgi", &params)
            .await
            .map_err(|e| e.user_message())?;

        let mut results = litsearch::parse_search_results(&html, self.client.base_url());
        results.search_url = self.client.cgi_url("litSearch.cgi", &params);
        apply_hit_cap(&mut results, max_hits);

        tracing::info!(
            total_found = results.total_found,
            returned = results.hits.len(),
            "paperblast_search completed"
        );
        to_value(&results)
    }
}

/// `paperblast_gene_papers`: full paper list for one gene (litSearch.cgi?more=).
#[derive(Debug)]
pub struct GenePapersHandler {
    pub client: Arc<PaperBlastClient>,
}

#[async_trait::async_trait]
impl ToolHandler for GenePapersHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let gene_id = litsearch::normalize_detail_id(required_str(&args, "gene_id")?);
        if gene_id.is_empty() {
            return Err("Missing 'gene_id' parameter".to_string());
        }

        let params = [("more", gene_id.as_str())];
        let html = self
            .client
            .get("litSearch.cgi", &params)
            .await
            .map_err(|e| e.user_message())?;

        let parsed = litsearch::parse_search_results(&html, self.client.base_url());
        let mut results = GenePapersResults {
            gene_id: gene_id.clone(),
            total_found: parsed.total_found,
            hits: parsed.hits,
            detail_url: self.client.cgi_url("litSearch.cgi", &params),
            warnings: parsed.warnings,
        };

        // The drill-down page has no "Found N" banner, so count what the
        // hits actually carry.
        if results.total_found == 0 && !results.hits.is_empty() {
            results.total_found = results
                .hits
                .iter()
                .map(|h| h.total_curated_papers + h.paper_snippets.len())
                .sum();
        }
        if results.total_found == 0 && results.hits.is_empty() {
            results.warnings.push(format!(
                "No papers found for '{}'. The expected format is a bare accession from a \
                 paperblast_search hit's detail_id (e.g. 'P0AEZ3'), not a curated gene_id or \
                 locus tag. Verify at {}",
                gene_id, results.detail_url
            ));
        }

        to_value(&results)
    }
}

/// `curated_blast_search`: characterized proteins by function (genomeSearch.cgi).
#[derive(Debug)]
pub struct CuratedBlastHandler {
    pub client: Arc<PaperBlastClient>,
}

#[async_trait::async_trait]
impl ToolHandler for CuratedBlastHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = required_str(&args, "query")?.trim();
        if query.is_empty() {
            return Err("Missing 'query' parameter".to_string());
        }
        let genome_db = optional_str(&args, "genome_db").unwrap_or("NCBI");
        let genome_id = optional_str(&args, "genome_id");
        let word_match = args
            .get("word_match")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let max_genome_hits = args
            .get("max_genome_hits")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_MAX_GENOME_HITS);
        if !(1..=MAX_GENOME_HITS_CEILING).contains(&max_genome_hits) {
            return Err(format!(
                "max_genome_hits must be between 1 and {}.",
                MAX_GENOME_HITS_CEILING
            ));
        }

        let mut params = vec![("query", query), ("gdb", genome_db)];
        if let Some(gid) = genome_id {
            params.push(("gid", gid));
        }
        if word_match {
            params.push(("word", "1"));
        }

        let html = self
            .client
            .get("genomeSearch.cgi", &params)
            .await
            .map_err(|e| e.user_message())?;

        let mut results = genome_search::parse_genome_search(
            &html,
            self.client.base_url(),
            max_genome_hits as usize,
        );
        results.search_url = self.client.cgi_url("genomeSearch.cgi", &params);
        to_value(&results)
    }
}

/// `gapmind_check`: pathway completeness for an organism (gapView.cgi).
///
/// Three modes by argument shape: a direct `org_id` lookup, fuzzy resolution
/// of an `organism` name against the index, or (neither given) the index
/// itself so the caller can pick an organism.
#[derive(Debug)]
pub struct GapMindCheckHandler {
    pub client: Arc<PaperBlastClient>,
}

impl GapMindCheckHandler {
    async fn fetch_pathways(&self, set: &str, org_id: &str) -> Result<Value, String> {
        let params = [("orgs", "orgsDef"), ("set", set), ("orgId", org_id)];
        let html = self
            .client
            .get("gapView.cgi", &params)
            .await
            .map_err(|e| e.user_message())?;

        let mut results = gapmind::parse_gapmind(&html, self.client.base_url());
        results.org_id = org_id.to_string();
        results.analysis_type = set.to_string();
        results.gapmind_url = self.client.cgi_url("gapView.cgi", &params);
        if results.pathways.is_empty() {
            results.warnings.push(format!(
                "No pathway table found for org_id '{}'. The ID may not exist in the '{}' \
                 set; list valid IDs with gapmind_list_organisms.",
                org_id, set
            ));
        }
        to_value(&results)
    }

    async fn fetch_index(&self, set: &str) -> Result<OrganismIndex, String> {
        let params = [("orgs", "orgsDef"), ("set", set)];
        let html = self
            .client
            .get("gapView.cgi", &params)
            .await
            .map_err(|e| e.user_message())?;

        let organisms = gapmind::parse_organism_index(&html);
        Ok(OrganismIndex {
            analysis_type: set.to_string(),
            total_organisms: organisms.len(),
            organisms,
            index_url: self.client.cgi_url("gapView.cgi", &params),
            warnings: Vec::new(),
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for GapMindCheckHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let set = analysis_type(&args)?;

        if let Some(org_id) = optional_str(&args, "org_id") {
            return self.fetch_pathways(set, org_id).await;
        }

        if let Some(name) = optional_str(&args, "organism") {
            let mut index = self.fetch_index(set).await?;
            if index.organisms.is_empty() {
                index.warnings.push(format!(
                    "The '{}' organism index came back empty; GapMind may have changed its \
                     page layout. Browse {} directly.",
                    set, index.index_url
                ));
                return to_value(&index);
            }

            let Some(matched) = organism::resolve(&index.organisms, name) else {
                let total = index.organisms.len();
                index.organisms.truncate(SUGGESTION_CAP);
                index.warnings.push(format!(
                    "No organism matching '{}' in the '{}' index. Showing the first {} of {} \
                     organisms; pass one of their org_id values to gapmind_check.",
                    name,
                    set,
                    index.organisms.len(),
                    total
                ));
                return to_value(&index);
            };

            let matched_name = matched.name.clone();
            let org_id = matched.org_id.clone();
            let mut result = self.fetch_pathways(set, &org_id).await?;
            if !matched_name.eq_ignore_ascii_case(name.trim()) {
                if let Some(warnings) = result
                    .get_mut("warnings")
                    .and_then(|w| w.as_array_mut())
                {
                    warnings.push(Value::String(format!(
                        "Fuzzy-matched organism '{}' to '{}' (org_id {}).",
                        name, matched_name, org_id
                    )));
                }
            }
            return Ok(result);
        }

        to_value(&self.fetch_index(set).await?)
    }
}

/// `gapmind_list_organisms`: the pre-computed organism index.
#[derive(Debug)]
pub struct GapMindListOrganismsHandler {
    pub client: Arc<PaperBlastClient>,
}

#[async_trait::async_trait]
impl ToolHandler for GapMindListOrganismsHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let set = analysis_type(&args)?;
        let params = [("orgs", "orgsDef"), ("set", set)];
        let html = self
            .client
            .get("gapView.cgi", &params)
            .await
            .map_err(|e| e.user_message())?;

        let organisms = gapmind::parse_organism_index(&html);
        let mut index = OrganismIndex {
            analysis_type: set.to_string(),
            total_organisms: organisms.len(),
            organisms,
            index_url: self.client.cgi_url("gapView.cgi", &params),
            warnings: Vec::new(),
        };
        if index.organisms.is_empty() {
            index.warnings.push(format!(
                "No organisms parsed from the '{}' index. GapMind may have changed its page \
                 layout; browse {} directly.",
                set, index.index_url
            ));
        }
        to_value(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fasta_header() {
        let fasta = ">sp|P0AEZ3|MIND_ECOLI\nMARIIVVTSGKGG\nVGKTTSSAAIAT";
        assert_eq!(strip_fasta_header(fasta), "MARIIVVTSGKGGVGKTTSSAAIAT");
        assert_eq!(strip_fasta_header("  P0AEZ3  "), "P0AEZ3");
        assert_eq!(strip_fasta_header("acrB E. coli"), "acrB E. coli");
    }

    #[test]
    fn test_hit_cap_preserves_total_found() {
        let mut results = SearchResults {
            total_found: 40,
            hits: vec![crate::models::PaperBlastHit::default(); 40],
            ..SearchResults::default()
        };
        apply_hit_cap(&mut results, 10);
        assert_eq!(results.hits.len(), 10);
        assert_eq!(results.total_found, 40);
        assert!(results.warnings.iter().any(|w| w.contains("top 10 of 40")));
    }

    #[test]
    fn test_hit_cap_minus_one_returns_all_without_warning() {
        let mut results = SearchResults {
            total_found: 40,
            hits: vec![crate::models::PaperBlastHit::default(); 40],
            ..SearchResults::default()
        };
        apply_hit_cap(&mut results, -1);
        assert_eq!(results.hits.len(), 40);
        assert!(results.warnings.is_empty());
    }

    #[test]
    fn test_analysis_type_validation() {
        assert_eq!(analysis_type(&serde_json::json!({})).unwrap(), "aa");
        assert_eq!(
            analysis_type(&serde_json::json!({"analysis_type": "carbon"})).unwrap(),
            "carbon"
        );
        assert!(analysis_type(&serde_json::json!({"analysis_type": "lipid"})).is_err());
    }
}
