//! The `charitask` library crate.
//!
//! This crate contains the domain models, authentication mechanisms, routing
//! configuration, and error handling for the charitask application: a backend
//! matching benefactors to tasks posted by charities. It is used by the main
//! binary (`main.rs`) to construct and run the application.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
