//! School Manager - REST API for students, teachers and exec accounts
//!
//! This is the library interface, allowing the router, persistence layer
//! and authentication helpers to be driven programmatically.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::Error;
