//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! APP_ENV (environment variable)
//!     → loader.rs (parsed after the file)
//!     → overrides AppConfig.environment
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The environment flag is the only knob that changes security behavior
//!   (the Secure cookie attribute); everything else is naming and limits

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AppConfig;
pub use schema::CsrfConfig;
pub use schema::Environment;
pub use schema::ListenerConfig;
