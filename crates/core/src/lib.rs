//! Domain logic shared by the vidhost cloud functions.
//!
//! Everything here is pure: no database, no network. The `db` and `api`
//! crates build on these helpers.

pub mod data_url;
pub mod drive;
pub mod error;
pub mod naming;
pub mod types;
