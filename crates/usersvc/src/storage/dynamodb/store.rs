//! DynamoDB store implementation.
//!
//! Implements `ItemStore` from `usersvc_core::storage` using DynamoDB. Every
//! table is expected to have a string partition key named `email`.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use usersvc_core::storage::{item_key, Item, ItemStore, Result, KEY_ATTRIBUTE};

use super::conversions::{attributes_to_item, item_to_attributes};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
};
use crate::config::Config;

/// DynamoDB-based item store.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new store from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region,
    /// and the custom endpoint when one is set.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        Self::new(Client::new(&loader.load().await))
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        item_key(&item)?;

        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_item(&self, table_name: &str, email: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(email.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(attributes_to_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>> {
        // Single request: only the first page (up to 1 MB) is returned.
        let result = self
            .client
            .scan()
            .table_name(table_name)
            .send()
            .await
            .map_err(map_scan_error)?;

        result
            .items
            .unwrap_or_default()
            .iter()
            .map(attributes_to_item)
            .collect()
    }

    async fn delete_item(&self, table_name: &str, email: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(email.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
