//! Custom extractors.

pub mod query;
