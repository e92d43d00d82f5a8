//! Named-route HTTP API client.
//!
//! Routes are URL templates keyed by name (conventionally
//! `<domain>.<function>`). Domains group functions; calling a function
//! resolves its route against the payload and issues one request through
//! the injected transport.
//!
//! ```no_run
//! use easy_api::{Client, ClientOptions, RouteTable};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), easy_api::ApiError> {
//! let mut client = Client::new(
//!     "https://api.example.com",
//!     ClientOptions {
//!         routes: RouteTable::from_iter([("users.show", "/users/:id")]),
//!         ..Default::default()
//!     },
//! )?;
//! client.add_domain_value("users", &json!({ "show": { "method": "GET" } }))?;
//!
//! if let Some(users) = client.domain("users") {
//!     let reply = users.call("show", json!({ "id": 7 })).await?;
//!     println!("{:?}", reply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod observability;
pub mod routing;
pub mod transport;

pub use client::{Client, ClientOptions};
pub use domain::{Domain, DomainRef, DomainSpec, FunctionSpec};
pub use error::{ApiError, ApiResult};
pub use routing::RouteTable;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, RecordingTransport, Reply, RequestOptions,
    Transport,
};
