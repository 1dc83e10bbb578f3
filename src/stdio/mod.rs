//! Stdio transport for the Model Context Protocol
//!
//! Carries newline-delimited JSON-RPC messages between the server and its single peer.

pub mod transport;

pub use transport::serve;
