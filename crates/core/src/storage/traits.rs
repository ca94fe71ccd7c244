use async_trait::async_trait;

use super::{Item, Result};

/// A key-value table store addressed by table name and the `email` key.
///
/// Implementations hold their own connection; callers pass the table name on
/// every call and never manage connections or transactions.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes `item`, replacing any item with the same `email`.
    async fn put_item(&self, table_name: &str, item: Item) -> Result<()>;

    /// Reads the item keyed by `email`, or `None` when absent.
    async fn get_item(&self, table_name: &str, email: &str) -> Result<Option<Item>>;

    /// Reads every item in the table, in store order.
    async fn scan(&self, table_name: &str) -> Result<Vec<Item>>;

    /// Removes the item keyed by `email`. Removing an absent item succeeds.
    async fn delete_item(&self, table_name: &str, email: &str) -> Result<()>;
}
