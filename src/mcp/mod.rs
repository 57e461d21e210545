//! MCP server
//!
//! Exposes the planner and metrics tools over the Model Context Protocol.

mod server;

pub use server::MedinovaService;
