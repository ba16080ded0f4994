//! Shared constants and invariants

pub const DEFAULT_USER_AGENT: &str = concat!("registry-token/", env!("CARGO_PKG_VERSION"));

pub const MEDIA_TYPE_JSON: &str = "application/json";

// Supported realm protocols
pub const PROTOCOL_HTTP: &str = "http";
pub const PROTOCOL_HTTPS: &str = "https";

// Registry API v2 base path, probed for a challenge
pub const REGISTRY_V2_PATH: &str = "/v2/";
