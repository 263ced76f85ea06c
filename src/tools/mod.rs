//! Tools module
//!
//! Operations exposed through the MCP server.

pub mod conversions;
pub mod goals;
pub mod intake;
pub mod status;
