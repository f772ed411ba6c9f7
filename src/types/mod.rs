//! Type definitions module.
//!
//! Request and response types the facade adds on top of the client
//! library's JSON-RPC types.

pub mod deploy;

pub use deploy::*;
