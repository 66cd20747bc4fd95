//! Transport layer for the staymap server
//!
//! - `http` - axum JSON API under `/api`

pub mod http;
