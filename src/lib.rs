//! # kakeibo
//!
//! Client-side core of the bookkeeping application: page data loaders,
//! shared observable state (session and toast notifications), and the API
//! types the views consume.
//!
//! The HTTP API server, routing framework, and rendering live elsewhere;
//! this crate only talks to the server through its JSON response shapes.

pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ClientConfig;
pub use error::{ClientError, PageError};
pub use state::AppState;
