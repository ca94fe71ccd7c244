//! In-crate store doubles for operation and dispatcher tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::storage::{item_key, Item, ItemStore, Result, StoreError};

/// In-memory [`ItemStore`] with switchable per-operation failures.
#[derive(Debug, Default)]
pub struct FakeStore {
    tables: RwLock<HashMap<String, HashMap<String, Item>>>,
    fail_put: bool,
    fail_get: bool,
    fail_scan: bool,
    fail_delete: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_put(mut self) -> Self {
        self.fail_put = true;
        self
    }

    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub fn failing_scan(mut self) -> Self {
        self.fail_scan = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Stores `item` under `key` without any shape checks.
    pub async fn insert_raw(&self, table_name: &str, key: &str, item: serde_json::Value) {
        let serde_json::Value::Object(item) = item else {
            panic!("raw items must be JSON objects");
        };
        self.tables
            .write()
            .await
            .entry(table_name.to_string())
            .or_default()
            .insert(key.to_string(), item);
    }

    /// Returns the stored item for `key`, bypassing failure switches.
    pub async fn raw(&self, table_name: &str, key: &str) -> Option<Item> {
        self.tables
            .read()
            .await
            .get(table_name)
            .and_then(|table| table.get(key))
            .cloned()
    }

    pub async fn len(&self, table_name: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table_name)
            .map_or(0, HashMap::len)
    }
}

fn injected(op: &str) -> StoreError {
    StoreError::QueryFailed(format!("injected {op} failure"))
}

#[async_trait]
impl ItemStore for FakeStore {
    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        if self.fail_put {
            return Err(injected("put"));
        }
        let key = item_key(&item)?.to_string();
        self.tables
            .write()
            .await
            .entry(table_name.to_string())
            .or_default()
            .insert(key, item);
        Ok(())
    }

    async fn get_item(&self, table_name: &str, email: &str) -> Result<Option<Item>> {
        if self.fail_get {
            return Err(injected("get"));
        }
        Ok(self.raw(table_name, email).await)
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>> {
        if self.fail_scan {
            return Err(injected("scan"));
        }
        Ok(self
            .tables
            .read()
            .await
            .get(table_name)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_item(&self, table_name: &str, email: &str) -> Result<()> {
        if self.fail_delete {
            return Err(injected("delete"));
        }
        if let Some(table) = self.tables.write().await.get_mut(table_name) {
            table.remove(email);
        }
        Ok(())
    }
}
