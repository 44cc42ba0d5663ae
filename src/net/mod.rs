//! Networking modules for the bookkeeping REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls and `types` defines the wire schema the page
//! layer consumes.

pub mod api;
pub mod types;
