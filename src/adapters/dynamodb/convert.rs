//! JSON record to DynamoDB item conversion
//!
//! Records cross the provider contract as JSON objects; DynamoDB speaks
//! attribute-value maps. The mapping covers the JSON data model only; binary
//! and set attribute types written by other clients are rejected rather than
//! guessed at.

use crate::domain::{PolystoreError, Result};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Convert a JSON value into a DynamoDB attribute value.
pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => {
            AttributeValue::L(items.iter().map(to_attribute_value).collect())
        }
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute value back into JSON.
pub fn from_attribute_value(value: &AttributeValue) -> Result<Value> {
    match value {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::N(number) => {
            let parsed: serde_json::Number = serde_json::from_str(number).map_err(|_| {
                PolystoreError::Serialization(format!("invalid numeric attribute: {number}"))
            })?;
            Ok(Value::Number(parsed))
        }
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::L(items) => Ok(Value::Array(
            items
                .iter()
                .map(from_attribute_value)
                .collect::<Result<Vec<_>>>()?,
        )),
        AttributeValue::M(fields) => {
            let mut object = Map::new();
            for (key, value) in fields {
                object.insert(key.clone(), from_attribute_value(value)?);
            }
            Ok(Value::Object(object))
        }
        other => Err(PolystoreError::Serialization(format!(
            "unsupported attribute type: {other:?}"
        ))),
    }
}

/// Convert a JSON record (object) into a DynamoDB item map.
pub fn record_to_item(record: &Value) -> Result<HashMap<String, AttributeValue>> {
    match record {
        Value::Object(fields) => Ok(fields
            .iter()
            .map(|(key, value)| (key.clone(), to_attribute_value(value)))
            .collect()),
        _ => Err(PolystoreError::Validation(
            "record must be a JSON object".to_string(),
        )),
    }
}

/// Convert a DynamoDB item map back into a JSON record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Value> {
    let mut object = Map::new();
    for (key, value) in item {
        object.insert(key.clone(), from_attribute_value(value)?);
    }
    Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_round_trip() {
        let record = json!({
            "id": "1",
            "name": "ada",
            "age": 36,
            "active": true,
            "tags": ["a", "b"],
            "address": {"city": "london"},
            "nickname": null
        });

        let item = record_to_item(&record).unwrap();
        let back = item_to_record(&item).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_numbers_keep_precision() {
        let record = json!({"id": "1", "ratio": 0.25, "count": 9007199254740993i64});
        let item = record_to_item(&record).unwrap();
        let back = item_to_record(&item).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_non_object_record_rejected() {
        assert!(record_to_item(&json!("scalar")).is_err());
    }

    #[test]
    fn test_binary_attribute_rejected() {
        let item: HashMap<String, AttributeValue> = HashMap::from([(
            "blob".to_string(),
            AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1, 2, 3])),
        )]);
        assert!(item_to_record(&item).is_err());
    }
}
