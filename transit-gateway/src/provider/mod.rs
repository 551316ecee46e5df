//! Shared plumbing for the upstream transit providers.
//!
//! Both providers are plain HTTP GET + JSON APIs keyed by a query-string
//! credential. They differ in envelope shape and error reporting, which the
//! `bus` and `train` modules handle; everything else lives here.

mod error;
mod http;
mod key;
pub mod lenient;
mod params;

pub use error::{ProviderError, ProviderKind, TransportError};
pub use http::{build_http, get_json};
pub use key::ApiKey;
pub use params::QueryParams;
