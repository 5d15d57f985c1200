//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (wraps everything; hardens the eventual response)
//!     → origin.rs (classify Sec-Fetch-Site, reject cross-site mutation)
//!     → cookie.rs (secret cookie read/rotate, via tower-cookies)
//!     → guard.rs (synchronizer-token check on mutating methods)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Defense in depth: the origin gate rejects cross-site mutation even
//!   when a valid token is presented
//! - Fail closed: reject on any security check failure
//! - Fixed rejection bodies; internals never reach the client
//! - No cross-request state: the secret lives in the client's cookie

pub mod cookie;
pub mod error;
pub mod guard;
pub mod headers;
pub mod origin;
pub mod token;

pub use cookie::CsrfCookieStore;
pub use error::SecurityError;
pub use guard::CsrfProtection;
pub use headers::HeaderHardenerLayer;
pub use origin::FetchSite;
pub use token::{Secret, TokenCodec};
