//! vidhost function server library.
//!
//! Exposes the function contract, the individual functions, and the HTTP
//! gateway so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod cors;
pub mod drive;
pub mod error;
pub mod event;
pub mod handlers;
pub mod routes;
pub mod state;
