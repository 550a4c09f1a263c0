//! JSON schema generation for tool parameters.
//!
//! Uses the `schemars` crate to derive schemas from Rust argument types.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types whose schema can be sent to OpenAI.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI-compatible JSON schema for this type.
    ///
    /// OpenAI requires `additionalProperties: false` on object schemas and
    /// every property listed in `required`. The `$schema` and `title` keys
    /// are dropped from the root.
    fn openai_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        fix_object_schemas(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("$schema");
            map.remove("title");
        }

        value
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

fn fix_object_schemas(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );

                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(all_keys));
                }
            }

            for (_, v) in map.iter_mut() {
                fix_object_schemas(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                fix_object_schemas(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_all_properties_required() {
        #[derive(Deserialize, JsonSchema)]
        #[allow(dead_code)]
        struct Contact {
            phone: Option<String>,
            name: String,
        }

        let schema = Contact::openai_schema();
        let schema_obj = schema.as_object().unwrap();

        assert!(!schema_obj.contains_key("$schema"));
        assert_eq!(
            schema_obj.get("additionalProperties"),
            Some(&serde_json::Value::Bool(false))
        );

        let required: Vec<&str> = schema_obj["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"phone"), "optional fields must still be required");
        assert!(required.contains(&"name"));
    }
}
