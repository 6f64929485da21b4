//! Client for the job board REST API.
//!
//! [`accessors::JobBoardClient`] is the entry point: it wires a [`client::SessionStore`]
//! and a [`client::LoginRedirect`] into one [`client::Transport`] and hands out typed
//! accessors plus the [`query::ResilientQuery`] used for search and filtering.

pub mod accessors;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod query;
pub mod telemetry;

pub use accessors::JobBoardClient;
