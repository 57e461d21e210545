//! MediNova Tools module
//!
//! Tool implementations behind the MCP server. Each returns a serializable
//! response or a user-facing error string.

pub mod plans;
pub mod profile;
pub mod status;
pub mod store;
