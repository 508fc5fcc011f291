//! REST client module for the club's managed backend.
//!
//! The backend exposes its tables through a PostgREST-style interface
//! under `/rest/v1/`. Requests carry the public anon key both as the
//! `apikey` header and as a bearer token.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::RepositoryError;
