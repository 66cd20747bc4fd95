//! Staymap Server
//!
//! HTTP JSON API over a [`staymap::Catalog`] of lodging listings.
//!
//! # Example
//!
//! ```ignore
//! use staymap_server::run_server;
//!
//! run_server(listener, catalog, shutdown).await?;
//! ```

pub mod handler;
pub mod protocol;
pub mod reader;
pub mod transport;

pub use handler::ApiError;
pub use protocol::{ErrorBody, NearestHigherResponse, SearchRow, StatsResponse};

pub use transport::http::{router, run_server};
