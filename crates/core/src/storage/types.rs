use serde_json::{Map, Value};

use super::StoreError;

/// Name of the primary key attribute.
pub const KEY_ATTRIBUTE: &str = "email";

/// Store-neutral attribute map for a single record.
pub type Item = Map<String, Value>;

/// Reads the primary key of `item`.
///
/// Fails when the key attribute is missing or not a string.
pub fn item_key(item: &Item) -> Result<&str, StoreError> {
    item.get(KEY_ATTRIBUTE)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            StoreError::InvalidItem(format!("missing string attribute '{KEY_ATTRIBUTE}'"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_item_key_reads_email() {
        let item = item(json!({"email": "a@b.com", "phone": "123"}));
        assert_eq!(item_key(&item), Ok("a@b.com"));
    }

    #[test]
    fn test_item_key_missing() {
        let item = item(json!({"phone": "123"}));
        assert!(matches!(item_key(&item), Err(StoreError::InvalidItem(_))));
    }

    #[test]
    fn test_item_key_not_a_string() {
        let item = item(json!({"email": 42}));
        assert!(matches!(item_key(&item), Err(StoreError::InvalidItem(_))));
    }
}
