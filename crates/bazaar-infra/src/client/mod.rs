//! HTTP client side of the Bazaar, used by bot actors.

pub mod http;

pub use http::HttpBazaarClient;
