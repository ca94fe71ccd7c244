//! In-memory item store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use usersvc_core::storage::{item_key, Item, ItemStore, Result};

type Table = HashMap<String, Item>;

/// In-memory storage backend.
///
/// Tables are created on first write. Data is not persisted and will be lost
/// when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        let key = item_key(&item)?.to_string();
        let mut tables = self.tables.write().await;
        tables
            .entry(table_name.to_string())
            .or_default()
            .insert(key, item);
        Ok(())
    }

    async fn get_item(&self, table_name: &str, email: &str) -> Result<Option<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table_name)
            .and_then(|table| table.get(email))
            .cloned())
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table_name)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_item(&self, table_name: &str, email: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(table) = tables.get_mut(table_name) {
            table.remove(email);
        }
        Ok(())
    }
}
