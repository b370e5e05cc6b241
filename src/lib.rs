//! # PaperBLAST MCP
//!
//! A Model Context Protocol (MCP) server exposing the PaperBLAST family of
//! bioinformatics services (papers.genomics.lbl.gov) as structured tools:
//! protein literature search, Curated BLAST genome search, and GapMind
//! metabolic pathway analysis.
//!
//! The upstream service renders HTML for humans; this crate turns those
//! pages into stable JSON envelopes, degrading gracefully when the markup
//! does not match expectations.
//!
//! ## Architecture
//!
//! - [`models`]: result envelopes (hits, genome matches, pathways)
//! - [`extract`]: HTML extraction heuristics per endpoint
//! - [`mcp`]: MCP protocol implementation and server
//! - [`utils`]: HTTP client for the CGI endpoints
//! - [`config`]: configuration management

pub mod config;
pub mod extract;
pub mod mcp;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use mcp::McpServer;
pub use models::{PaperBlastHit, SearchResults};
pub use utils::PaperBlastClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
