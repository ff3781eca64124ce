//! Log output
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus a text or
//! JSON formatting layer.

mod subscriber;

pub use subscriber::{TelemetryError, init_telemetry};
