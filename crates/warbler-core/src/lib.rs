//! Account, authentication and follow-graph model for Warbler.
//!
//! Signup validates and stages users, [`session::Session`] commits them,
//! [`account::authenticate`] checks credentials, and [`follows`] maintains the
//! directed follow graph.

pub mod account;
pub mod config;
pub mod error;
pub mod follows;
pub mod messages;
pub mod models;
pub mod password;
pub mod session;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
