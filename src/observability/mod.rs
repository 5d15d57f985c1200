//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! process start
//!     → logging.rs (install tracing subscriber)
//!     → subsystems emit structured events
//!     → stdout (format chosen by RUST_LOG / env filter)
//! ```

pub mod logging;
