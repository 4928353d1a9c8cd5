//! Observability setup shared by the `bazaar` server and bot runner.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};
