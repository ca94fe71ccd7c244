//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the `ItemStore`
//! trait using `aws-sdk-dynamodb`. The table is expected to have a single
//! string partition key named `email` (see `cargo xtask dynamodb deploy`).

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
