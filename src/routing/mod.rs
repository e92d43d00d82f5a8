//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Domain function call (domain, function, payload)
//!     → table.rs (key lookup: explicit route or "<domain>.<function>")
//!     → template.rs (substitute the first :placeholder from the payload)
//!     → Return: path or RouteNotFound
//! ```
//!
//! # Design Decisions
//! - Missing placeholder values leave the template as-is
//! - Table is mutated only during setup, read on every call

pub mod table;
pub mod template;

pub use table::RouteTable;
