use serde_json::Value;

use crate::storage::{Item, ItemStore};

use super::error::{Result, UserError};
use super::types::User;
use super::validation::{is_email_valid, EmailMatch};

/// User operations against one table of an [`ItemStore`].
///
/// The store handle is borrowed for the lifetime of the table view, so the
/// caller owns the connection and decides when it is created and dropped.
pub struct UserTable<'a, S: ItemStore + ?Sized> {
    store: &'a S,
    table_name: &'a str,
    email_match: EmailMatch,
}

impl<'a, S: ItemStore + ?Sized> UserTable<'a, S> {
    /// Creates a view over `table_name` with exact email matching.
    pub fn new(store: &'a S, table_name: &'a str) -> Self {
        Self {
            store,
            table_name,
            email_match: EmailMatch::Exact,
        }
    }

    /// Sets how emails are compared when used as keys.
    pub fn with_email_match(mut self, email_match: EmailMatch) -> Self {
        self.email_match = email_match;
        self
    }

    pub fn table_name(&self) -> &str {
        self.table_name
    }

    /// Decodes, validates and stores a new user from a JSON request body.
    pub async fn create(&self, body: &str) -> Result<User> {
        let mut user = decode_user(body)?;
        user.email = self.email_match.normalize(&user.email);

        if !is_email_valid(&user.email) {
            return Err(UserError::InvalidEmailAddress);
        }
        if self.fetch(&user.email).await?.is_some() {
            return Err(UserError::UserAlreadyExists);
        }

        let item = user_to_item(&user)?;
        self.store
            .put_item(self.table_name, item)
            .await
            .map_err(|e| UserError::CouldNotCreateItem {
                detail: e.to_string(),
            })?;

        Ok(user)
    }

    /// Reads the user keyed by `email`.
    ///
    /// Returns `Ok(None)` when no such user is stored.
    pub async fn fetch(&self, email: &str) -> Result<Option<User>> {
        let key = self.email_match.normalize(email);
        let item = self
            .store
            .get_item(self.table_name, &key)
            .await
            .map_err(UserError::failed_to_fetch)?;

        item.map(item_to_user).transpose()
    }

    /// Reads every user in the table, in store order.
    pub async fn fetch_all(&self) -> Result<Vec<User>> {
        let items = self
            .store
            .scan(self.table_name)
            .await
            .map_err(UserError::failed_to_fetch)?;

        items.into_iter().map(item_to_user).collect()
    }

    /// Replaces an existing user with the decoded request body.
    ///
    /// The email is only checked for presence, not re-validated. Returns the
    /// record exactly as written.
    pub async fn update(&self, body: &str) -> Result<User> {
        let mut user = decode_user(body)?;
        if user.email.is_empty() {
            return Err(UserError::InvalidEmailAddress);
        }
        user.email = self.email_match.normalize(&user.email);

        if self.fetch(&user.email).await?.is_none() {
            return Err(UserError::UserDoesNotExist);
        }

        let item = user_to_item(&user)?;
        self.store
            .put_item(self.table_name, item)
            .await
            .map_err(|e| UserError::CouldNotUpdateItem {
                detail: e.to_string(),
            })?;

        Ok(user)
    }

    /// Removes the user keyed by `email`.
    ///
    /// Any failure to confirm the user exists is reported as
    /// [`UserError::UserDoesNotExist`].
    pub async fn delete(&self, email: &str) -> Result<()> {
        let key = self.email_match.normalize(email);

        match self.fetch(&key).await {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => return Err(UserError::UserDoesNotExist),
        }

        self.store
            .delete_item(self.table_name, &key)
            .await
            .map_err(|e| UserError::CouldNotDeleteItem {
                detail: e.to_string(),
            })
    }
}

fn decode_user(body: &str) -> Result<User> {
    serde_json::from_str(body).map_err(UserError::invalid_data)
}

fn user_to_item(user: &User) -> Result<Item> {
    match serde_json::to_value(user).map_err(UserError::could_not_marshal)? {
        Value::Object(item) => Ok(item),
        other => Err(UserError::could_not_marshal(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn item_to_user(item: Item) -> Result<User> {
    serde_json::from_value(Value::Object(item)).map_err(UserError::failed_to_fetch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;
    use serde_json::json;

    const TABLE: &str = "users";
    const ALICE: &str = r#"{"email":"a@b.com","firstname":"A","lastname":"B","phone":"123"}"#;

    fn alice() -> User {
        User::new("a@b.com").with_name("A", "B").with_phone("123")
    }

    #[tokio::test]
    async fn test_create_then_fetch_returns_same_user() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let created = table.create(ALICE).await.unwrap();
        let fetched = table.fetch("a@b.com").await.unwrap();

        assert_eq!(created, alice());
        assert_eq!(fetched, Some(alice()));
    }

    #[tokio::test]
    async fn test_create_rejects_undecodable_body() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table.create("{not json").await.unwrap_err();

        assert!(matches!(err, UserError::InvalidData { .. }));
        assert_eq!(store.len(TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table
            .create(r#"{"email":"not-an-email","firstname":"A"}"#)
            .await
            .unwrap_err();

        assert_eq!(err, UserError::InvalidEmailAddress);
        assert_eq!(store.len(TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_email() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table.create(r#"{"firstname":"A"}"#).await.unwrap_err();

        assert_eq!(err, UserError::InvalidEmailAddress);
    }

    // A found record means "already exists"; an absent one lets the create
    // through. This is the direct reading of the lookup result, not a check
    // on whether the returned email field happens to be empty.
    #[tokio::test]
    async fn test_create_twice_fails_with_already_exists() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        table.create(ALICE).await.unwrap();
        let err = table.create(ALICE).await.unwrap_err();

        assert_eq!(err, UserError::UserAlreadyExists);
        assert_eq!(store.len(TABLE).await, 1);
    }

    #[tokio::test]
    async fn test_create_propagates_lookup_failure() {
        let store = FakeStore::new().failing_get();
        let table = UserTable::new(&store, TABLE);

        let err = table.create(ALICE).await.unwrap_err();

        assert!(matches!(err, UserError::FailedToFetch { .. }));
    }

    #[tokio::test]
    async fn test_create_maps_put_failure() {
        let store = FakeStore::new().failing_put();
        let table = UserTable::new(&store, TABLE);

        let err = table.create(ALICE).await.unwrap_err();

        assert!(matches!(err, UserError::CouldNotCreateItem { .. }));
        assert_eq!(err.detail(), Some("Query failed: injected put failure"));
    }

    #[tokio::test]
    async fn test_fetch_absent_user_is_none() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        assert_eq!(table.fetch("nobody@b.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_maps_store_failure() {
        let store = FakeStore::new().failing_get();
        let table = UserTable::new(&store, TABLE);

        let err = table.fetch("a@b.com").await.unwrap_err();

        assert!(matches!(err, UserError::FailedToFetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_maps_undecodable_item() {
        let store = FakeStore::new();
        store
            .insert_raw(TABLE, "a@b.com", json!({"email": "a@b.com", "phone": 123}))
            .await;
        let table = UserTable::new(&store, TABLE);

        let err = table.fetch("a@b.com").await.unwrap_err();

        assert!(matches!(err, UserError::FailedToFetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_all_returns_every_user() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);
        table.create(ALICE).await.unwrap();
        table
            .create(r#"{"email":"c@d.com","firstname":"C","lastname":"D","phone":"456"}"#)
            .await
            .unwrap();

        let mut users = table.fetch_all().await.unwrap();
        users.sort_by(|a, b| a.email.cmp(&b.email));

        assert_eq!(users.len(), 2);
        assert_eq!(users[0], alice());
        assert_eq!(users[1].email, "c@d.com");
    }

    #[tokio::test]
    async fn test_fetch_all_empty_table() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        assert!(table.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_maps_scan_failure() {
        let store = FakeStore::new().failing_scan();
        let table = UserTable::new(&store, TABLE);

        let err = table.fetch_all().await.unwrap_err();

        assert!(matches!(err, UserError::FailedToFetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_all_maps_undecodable_item() {
        let store = FakeStore::new();
        store
            .insert_raw(TABLE, "x@y.com", json!({"email": ["x@y.com"]}))
            .await;
        let table = UserTable::new(&store, TABLE);

        let err = table.fetch_all().await.unwrap_err();

        assert!(matches!(err, UserError::FailedToFetch { .. }));
    }

    // The incoming payload is what gets persisted and returned, replacing the
    // stored record wholesale.
    #[tokio::test]
    async fn test_update_persists_incoming_payload() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);
        table.create(ALICE).await.unwrap();

        let updated = table
            .update(r#"{"email":"a@b.com","firstname":"Alice","phone":"999"}"#)
            .await
            .unwrap();
        let stored = table.fetch("a@b.com").await.unwrap();

        let expected = User::new("a@b.com").with_name("Alice", "").with_phone("999");
        assert_eq!(updated, expected);
        assert_eq!(stored, Some(expected));
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table.update(ALICE).await.unwrap_err();

        assert_eq!(err, UserError::UserDoesNotExist);
        assert_eq!(store.len(TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_update_requires_email() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table.update(r#"{"firstname":"A"}"#).await.unwrap_err();

        assert_eq!(err, UserError::InvalidEmailAddress);
    }

    #[tokio::test]
    async fn test_update_does_not_revalidate_email_format() {
        let store = FakeStore::new();
        store
            .insert_raw(TABLE, "legacy", json!({"email": "legacy"}))
            .await;
        let table = UserTable::new(&store, TABLE);

        let updated = table
            .update(r#"{"email":"legacy","firstname":"Old"}"#)
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Old");
    }

    #[tokio::test]
    async fn test_update_rejects_undecodable_body() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table.update("").await.unwrap_err();

        assert!(matches!(err, UserError::InvalidData { .. }));
    }

    #[tokio::test]
    async fn test_update_maps_put_failure() {
        let store = FakeStore::new().failing_put();
        store
            .insert_raw(TABLE, "a@b.com", json!({"email": "a@b.com"}))
            .await;
        let table = UserTable::new(&store, TABLE);

        let err = table.update(ALICE).await.unwrap_err();

        assert!(matches!(err, UserError::CouldNotUpdateItem { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_fetch_is_none() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);
        table.create(ALICE).await.unwrap();

        table.delete("a@b.com").await.unwrap();

        assert_eq!(table.fetch("a@b.com").await.unwrap(), None);
        assert_eq!(store.len(TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_user_fails() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        let err = table.delete("a@b.com").await.unwrap_err();

        assert_eq!(err, UserError::UserDoesNotExist);
    }

    #[tokio::test]
    async fn test_delete_lookup_failure_reports_missing_user() {
        let store = FakeStore::new().failing_get();
        let table = UserTable::new(&store, TABLE);

        let err = table.delete("a@b.com").await.unwrap_err();

        assert_eq!(err, UserError::UserDoesNotExist);
    }

    #[tokio::test]
    async fn test_delete_maps_store_failure() {
        let store = FakeStore::new().failing_delete();
        let table = UserTable::new(&store, TABLE);
        table.create(ALICE).await.unwrap();

        let err = table.delete("a@b.com").await.unwrap_err();

        assert!(matches!(err, UserError::CouldNotDeleteItem { .. }));
        assert!(store.raw(TABLE, "a@b.com").await.is_some());
    }

    #[tokio::test]
    async fn test_case_insensitive_duplicate_check() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE).with_email_match(EmailMatch::CaseInsensitive);

        let created = table
            .create(r#"{"email":"John@Example.com","firstname":"John"}"#)
            .await
            .unwrap();
        let err = table
            .create(r#"{"email":"john@EXAMPLE.com"}"#)
            .await
            .unwrap_err();

        assert_eq!(created.email, "john@example.com");
        assert_eq!(err, UserError::UserAlreadyExists);
        assert!(table.fetch("JOHN@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_exact_match_treats_case_variants_as_distinct() {
        let store = FakeStore::new();
        let table = UserTable::new(&store, TABLE);

        table.create(r#"{"email":"John@Example.com"}"#).await.unwrap();
        table.create(r#"{"email":"john@example.com"}"#).await.unwrap();

        assert_eq!(store.len(TABLE).await, 2);
    }

    #[tokio::test]
    async fn test_tables_are_isolated() {
        let store = FakeStore::new();
        UserTable::new(&store, "one").create(ALICE).await.unwrap();

        let other = UserTable::new(&store, "two");

        assert_eq!(other.fetch("a@b.com").await.unwrap(), None);
        assert_eq!(other.table_name(), "two");
    }
}
