//! MCP protocol layer: tool definitions, handlers, and server transports.

pub mod handlers;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{Tool, ToolHandler, ToolRegistry};
