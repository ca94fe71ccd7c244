//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB `AttributeValue` maps and
//! store-neutral items. These are testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};
use usersvc_core::storage::{Item, StoreError};

/// Convert an item to a DynamoDB attribute map.
pub fn item_to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, value_to_attribute(value)))
        .collect()
}

/// Convert a DynamoDB attribute map to an item.
pub fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, StoreError> {
    attributes
        .iter()
        .map(|(name, attribute)| Ok((name.clone(), attribute_to_value(attribute)?)))
        .collect()
}

fn value_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(value_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(item_to_attributes(map)),
    }
}

fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n).map(Value::Number),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => attributes_to_item(map).map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(StoreError::Serialization(
            "binary attributes are not supported".to_string(),
        )),
        other => Err(StoreError::Serialization(format!(
            "unsupported attribute: {:?}",
            other
        ))),
    }
}

fn parse_number(n: &str) -> Result<Number, StoreError> {
    n.parse::<Number>()
        .map_err(|e| StoreError::Serialization(format!("invalid number '{n}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_user_item_to_attributes() {
        let attributes = item_to_attributes(item(json!({
            "email": "a@b.com",
            "firstname": "A",
            "lastname": "B",
            "phone": "123",
        })));

        assert_eq!(attributes.len(), 4);
        assert_eq!(
            attributes.get("email"),
            Some(&AttributeValue::S("a@b.com".to_string()))
        );
        assert_eq!(
            attributes.get("phone"),
            Some(&AttributeValue::S("123".to_string()))
        );
    }

    #[test]
    fn test_scalar_attributes() {
        let attributes = item_to_attributes(item(json!({
            "count": 42,
            "ratio": 0.5,
            "active": true,
            "note": null,
        })));

        assert_eq!(
            attributes.get("count"),
            Some(&AttributeValue::N("42".to_string()))
        );
        assert_eq!(
            attributes.get("ratio"),
            Some(&AttributeValue::N("0.5".to_string()))
        );
        assert_eq!(attributes.get("active"), Some(&AttributeValue::Bool(true)));
        assert_eq!(attributes.get("note"), Some(&AttributeValue::Null(true)));
    }

    #[test]
    fn test_nested_attributes_come_back_unchanged() {
        let original = item(json!({
            "email": "a@b.com",
            "tags": ["x", 1, false],
            "address": {"city": "Montevideo", "zip": 11000},
        }));

        let restored = attributes_to_item(&item_to_attributes(original.clone())).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_string_and_number_sets_become_arrays() {
        let attributes = HashMap::from([
            (
                "names".to_string(),
                AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
            ),
            (
                "scores".to_string(),
                AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]),
            ),
        ]);

        let item = attributes_to_item(&attributes).unwrap();

        assert_eq!(item["names"], json!(["a", "b"]));
        assert_eq!(item["scores"], json!([1, 2.5]));
    }

    #[test]
    fn test_binary_attribute_is_rejected() {
        let attributes = HashMap::from([(
            "avatar".to_string(),
            AttributeValue::B(Blob::new(vec![0u8, 1, 2])),
        )]);

        let result = attributes_to_item(&attributes);

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let attributes = HashMap::from([(
            "count".to_string(),
            AttributeValue::N("not-a-number".to_string()),
        )]);

        let result = attributes_to_item(&attributes);

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
