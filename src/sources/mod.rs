//! Token endpoint and registry requests.

pub mod fetch;
pub mod probe;
pub mod request_builder;
pub mod token_response;
pub mod transport;

pub use request_builder::{PreparedRequest, Protocol, RequestBuilder};
pub use token_response::TokenResponse;
pub use transport::{RawResponse, ReqwestTransport, Transport};
