//! # Registry Token Library
//!
//! Acquires bearer tokens from registry-style APIs that protect resources
//! with a `WWW-Authenticate: Bearer realm=...,service=...` challenge.
//!
//! Modules:
//! - `parser` — challenge grammar and bearer-scheme selection
//! - `sources` — token endpoint request, transport, response classification
//! - `client` — the public entry points
//! - `config` — YAML settings for the transport and logging
//! - `error` — failure taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::client::{request_token, TokenClient, TokenOptions};
pub use crate::error::TokenError;
pub use crate::parser::{parse, select_bearer, AuthScheme, TokenRequestParams};
pub use crate::sources::TokenResponse;
