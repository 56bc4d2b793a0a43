//! # OrderLens Dashboard
//!
//! HTTP dashboard and command line front end over the OrderLens pipeline.
//! The server renders the page and its charts on each request from an
//! in-memory dataset loaded once at startup.

pub mod cli;
pub mod error;
pub mod page;
pub mod server;
pub mod state;

pub use cli::{Cli, Command};
pub use error::ApiError;
pub use server::{router, serve};
pub use state::{AppState, RangeQuery, Summary};
