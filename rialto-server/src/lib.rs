//! HTTP surface for [`rialto`].
//!
//! [`app`] builds the axum router; the `rialto-server` binary wires it to a
//! listener, a store and command-line configuration.
#![warn(missing_docs)]

pub mod cli;
mod error;
mod routes;

pub use error::ApiError;
pub use routes::app;
