//! Functional core for the usersvc project.
//!
//! Holds the `User` model, the email validator, the store-agnostic user
//! operations and the request dispatcher. Nothing in here performs I/O
//! directly: storage is reached through the [`storage::ItemStore`] trait,
//! which the binary crate implements for each backend.

pub mod api;
pub mod storage;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
