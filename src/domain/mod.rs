//! Domain objects and tool integrations
//!
//! Provides the note payloads and the `write_note` tool exposed over the MCP protocol

pub mod notes;
pub mod tools;
