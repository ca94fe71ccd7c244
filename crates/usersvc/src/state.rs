//! Application state shared by every request handler.
//!
//! The storage backend is chosen at compile time; each backend module adds
//! an `AppState::new` constructor for it.

use std::sync::Arc;

use usersvc_core::storage::ItemStore;
use usersvc_core::user::{EmailMatch, UserTable};

use crate::config::Config;

/// Shared application state.
///
/// Cheap to clone: the store handle is shared, so every request reuses the
/// connection opened at startup.
#[derive(Clone)]
pub struct AppState {
    /// Item store backing the users table.
    pub store: Arc<dyn ItemStore>,
    /// Name of the users table.
    pub table_name: Arc<str>,
    /// How emails are compared when used as keys.
    pub email_match: EmailMatch,
}

impl AppState {
    fn build(store: Arc<dyn ItemStore>, config: &Config) -> Self {
        Self {
            store,
            table_name: Arc::from(config.table_name.as_str()),
            email_match: config.email_match,
        }
    }

    /// Returns a user operations view over the configured table.
    pub fn users(&self) -> UserTable<'_, dyn ItemStore> {
        UserTable::new(self.store.as_ref(), &self.table_name).with_email_match(self.email_match)
    }
}

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryStore;

    impl AppState {
        /// Creates AppState with process-local storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            Ok(Self::build(Arc::new(InMemoryStore::new()), config))
        }
    }

    impl Default for AppState {
        /// Creates an empty in-memory AppState with default settings.
        fn default() -> Self {
            Self::build(
                Arc::new(InMemoryStore::new()),
                &Config {
                    table_name: crate::config::DEFAULT_TABLE_NAME.to_string(),
                    aws_region: "us-east-1".to_string(),
                    aws_endpoint_url: None,
                    email_match: EmailMatch::Exact,
                },
            )
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::DynamoDbStore;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let store = DynamoDbStore::from_config(config).await;

            tracing::info!(
                table = %config.table_name,
                region = %config.aws_region,
                endpoint = ?config.aws_endpoint_url,
                "Using DynamoDB storage"
            );

            Ok(Self::build(Arc::new(store), config))
        }
    }
}
