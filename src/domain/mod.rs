//! Domain subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (setup phase):
//!     name + DomainSpec | serde_json::Value
//!     → spec.rs (parse, reject reserved names)
//!     → registry.rs (store, replacing any previous domain)
//!
//! Call:
//!     client.domain(name)?.call(function, payload)
//!     → explicit route key or "<domain>.<function>"
//!     → RouteTable::resolve
//!     → Client::fetch with the function's method and options
//! ```

pub mod registry;
pub mod spec;

pub use registry::{Domain, DomainRef, DomainRegistry};
pub use spec::{DomainSpec, FunctionSpec, RESERVED_NAMES};
