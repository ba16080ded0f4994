//! Challenge parsing and bearer-scheme selection.

pub mod challenge;
pub mod select;

pub use challenge::{parse, AuthScheme};
pub use select::{params_from_challenge, select_bearer, TokenRequestParams};
