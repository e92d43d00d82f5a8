//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / domain / transport / client
//!     → tracing events (route resolution, dispatch, responses)
//!     → logging.rs subscriber (installed by binaries)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Every request carries an `x-request-id` that also appears in its log events

pub mod logging;

pub use logging::init_logging;
