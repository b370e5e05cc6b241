//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::mcp::handlers::{
    CuratedBlastHandler, GapMindCheckHandler, GapMindListOrganismsHandler, GenePapersHandler,
    PaperBlastSearchHandler,
};
use crate::utils::PaperBlastClient;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "paperblast_search")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create the registry with the five PaperBLAST tools, sharing one client.
    ///
    /// Every tool is read-only, idempotent, and open-world: each call is one
    /// fresh GET against the upstream service.
    pub fn new(client: Arc<PaperBlastClient>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        // 1. paperblast_search - literature search by sequence or identifier
        registry.register(Tool {
            name: "paperblast_search".to_string(),
            description: "Search PaperBLAST for scientific literature about a protein or its \
                homologs. Runs BLAST against ~800K proteins linked to ~1.3M papers (EuropePMC \
                text mining, Swiss-Prot, BRENDA, MetaCyc, EcoCyc, TCDB, CharProtDB, and more). \
                Read-only and idempotent."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Protein identifier or amino acid sequence. Accepts UniProt accessions (e.g. 'P0AEZ3'), RefSeq protein IDs, VIMSS locus tags, gene names with organism (e.g. 'acrB E. coli'), or raw sequences (FASTA header allowed, it is stripped)."
                    },
                    "max_hits": {
                        "type": "integer",
                        "description": "Maximum hits to return (default 25, ceiling 1000). -1 returns all hits; total_found always reflects the true count.",
                        "default": 25,
                        "minimum": -1,
                        "maximum": 1000
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(PaperBlastSearchHandler {
                client: client.clone(),
            }),
        });

        // 2. paperblast_gene_papers - full paper list for one gene
        registry.register(Tool {
            name: "paperblast_gene_papers".to_string(),
            description: "Get the complete list of papers for a specific PaperBLAST gene. Pass \
                the detail_id from a prior paperblast_search hit (a bare accession like \
                'P0AEZ3'), not a curated gene_id or locus tag. Known wrong formats such as \
                'MIND_ECOLI / P0AEZ3' or 'SwissProt::P0AEZ3' are normalized automatically."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "gene_id": {
                        "type": "string",
                        "description": "Bare accession for the drill-down endpoint (e.g. 'P0AEZ3', 'Q01464', 'VIMSS115881')."
                    }
                },
                "required": ["gene_id"]
            }),
            handler: Arc::new(GenePapersHandler {
                client: client.clone(),
            }),
        });

        // 3. curated_blast_search - characterized proteins by function
        registry.register(Tool {
            name: "curated_blast_search".to_string(),
            description: "Search curated databases for experimentally characterized proteins \
                matching a functional description, then find their homologs in a genome \
                (Curated BLAST). Requires a genome_id for actual results."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Functional description, e.g. 'alcohol dehydrogenase' or 'two-component sensor kinase'."
                    },
                    "genome_db": {
                        "type": "string",
                        "description": "Genome database: 'NCBI' (default), 'IMG', 'UniProt', 'FitnessBrowser', or 'MicrobesOnline'.",
                        "default": "NCBI"
                    },
                    "genome_id": {
                        "type": "string",
                        "description": "Genome/assembly ID within the database, e.g. 'GCF_000005845.2' for E. coli K-12."
                    },
                    "word_match": {
                        "type": "boolean",
                        "description": "Restrict to whole-word matches only.",
                        "default": false
                    },
                    "max_genome_hits": {
                        "type": "integer",
                        "description": "Maximum genome proteins to return, each with its best curated match (default 20).",
                        "default": 20,
                        "minimum": 1,
                        "maximum": 100
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(CuratedBlastHandler {
                client: client.clone(),
            }),
        });

        // 4. gapmind_check - metabolic pathway gap analysis
        registry.register(Tool {
            name: "gapmind_check".to_string(),
            description: "Check metabolic pathway completeness for an organism with GapMind. \
                analysis_type 'aa' covers amino acid biosynthesis, 'carbon' covers carbon \
                source utilization. Provide org_id for a direct lookup, an organism name for \
                fuzzy resolution against the index, or neither to browse the index."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "analysis_type": {
                        "type": "string",
                        "enum": ["aa", "carbon"],
                        "description": "Type of metabolic analysis.",
                        "default": "aa"
                    },
                    "organism": {
                        "type": "string",
                        "description": "Organism name, fuzzy-matched against the GapMind index (e.g. 'Pseudomonas fluorescens')."
                    },
                    "org_id": {
                        "type": "string",
                        "description": "Direct GapMind organism identifier (e.g. 'FitnessBrowser__pseudo1_N1B4'); skips index lookup."
                    }
                }
            }),
            handler: Arc::new(GapMindCheckHandler {
                client: client.clone(),
            }),
        });

        // 5. gapmind_list_organisms - browse the pre-computed organism index
        registry.register(Tool {
            name: "gapmind_list_organisms".to_string(),
            description: "List organisms with pre-computed GapMind results for an analysis \
                type. Use the returned org_id values with gapmind_check."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "analysis_type": {
                        "type": "string",
                        "enum": ["aa", "carbon"],
                        "description": "Type of metabolic analysis.",
                        "default": "aa"
                    }
                }
            }),
            handler: Arc::new(GapMindListOrganismsHandler { client }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn registry() -> ToolRegistry {
        let client = Arc::new(PaperBlastClient::new(&Config::default()).unwrap());
        ToolRegistry::new(client)
    }

    #[test]
    fn test_all_tools_registered() {
        let registry = registry();
        for name in [
            "paperblast_search",
            "paperblast_gene_papers",
            "curated_blast_search",
            "gapmind_check",
            "gapmind_list_organisms",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {}", name);
        }
        assert_eq!(registry.all().len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = registry();
        let err = registry
            .execute("nonexistent", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.contains("not found"));
    }
}
