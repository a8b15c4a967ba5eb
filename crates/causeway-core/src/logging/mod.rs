//! Observability for Causeway.
//! `tracing` with an `EnvFilter` driven by `CAUSEWAY_LOG`.

pub mod setup;

pub use setup::{init_json_tracing, init_tracing};
