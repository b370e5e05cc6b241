//! Utility modules supporting tool operations.
//!
//! - [`PaperBlastClient`]: HTTP client for the CGI endpoints, with a
//!   distinguishable timeout condition and status-code mapping
//! - [`FetchError`]: retrieval-boundary error taxonomy

mod http;

pub use http::{FetchError, PaperBlastClient};
