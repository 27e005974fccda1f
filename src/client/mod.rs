//! bconomy API client
//!
//! Every remote operation is a single POST of a JSON request descriptor to one
//! endpoint, authenticated with an `x-api-key` header. The HTTP layer sits
//! behind the [`Transport`] trait so the fetcher can be driven by a simulated
//! transport in tests.

mod fetcher;
#[cfg(test)]
pub(crate) mod mock;

pub use fetcher::{
    DataFetcher, FetchError, HttpTransport, RequestDescriptor, Transport, TransportResponse,
    API_KEY_HEADER, API_URL,
};
