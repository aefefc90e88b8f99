//! leadhub - client library and CLI for a multi-tenant lead service
//!
//! Session lifecycle and route authorization live in [`auth`]; the backend
//! REST API is reached through [`client`].

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod leads;
pub mod observability;
pub mod validation;
