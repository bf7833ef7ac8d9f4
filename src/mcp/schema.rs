//! Declarative input schemas for the tools.
//!
//! Each tool declares its arguments once as a [`ToolSchema`]. The same table
//! drives [`ToolSchema::describe`] (the JSON Schema advertised in
//! `tools/list`) and [`ToolSchema::validate`] (the check every call goes
//! through before a handler sees its arguments).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Shape of a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    /// Non-negative integer.
    Integer,
    StringArray,
    /// Array whose entries are strings or `null`.
    NullableStringArray,
    /// Array of `{type, value}` objects.
    TypedValueArray,
    /// Array of `{type}` objects.
    TypedOutputArray,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolSchema {
    pub fields: &'static [Field],
}

/// One reason an argument object was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ToolSchema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// JSON Schema rendering of the argument table.
    pub fn describe(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.fields {
            let mut property = kind_schema(field.kind);
            if let Value::Object(map) = &mut property {
                map.insert("description".into(), json!(field.description));
            }
            properties.insert(field.name.to_string(), property);
            if field.required {
                required.push(json!(field.name));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check `raw` against the table and deserialize it into `T`.
    ///
    /// Undeclared keys are dropped. All violations are reported together.
    pub fn validate<T: DeserializeOwned>(&self, raw: &Value) -> Result<T, Vec<Violation>> {
        let object = match raw.as_object() {
            Some(object) => object,
            None => return Err(vec![Violation::new("$", "arguments must be an object")]),
        };

        let mut violations = Vec::new();
        let mut accepted = Map::new();
        for field in self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        violations.push(Violation::new(
                            field.name,
                            format!("{} is required", field.name),
                        ));
                    }
                }
                Some(value) => {
                    check_kind(field.name, field.kind, value, &mut violations);
                    accepted.insert(field.name.to_string(), value.clone());
                }
            }
        }
        if !violations.is_empty() {
            return Err(violations);
        }

        serde_json::from_value(Value::Object(accepted))
            .map_err(|e| vec![Violation::new("$", e.to_string())])
    }
}

fn kind_schema(kind: FieldKind) -> Value {
    match kind {
        FieldKind::String => json!({"type": "string"}),
        FieldKind::Boolean => json!({"type": "boolean"}),
        FieldKind::Integer => json!({"type": "integer", "minimum": 0}),
        FieldKind::StringArray => json!({"type": "array", "items": {"type": "string"}}),
        FieldKind::NullableStringArray => {
            json!({"type": "array", "items": {"type": ["string", "null"]}})
        }
        FieldKind::TypedValueArray => json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "type": {"type": "string"},
                    "value": {}
                },
                "required": ["type", "value"]
            }
        }),
        FieldKind::TypedOutputArray => json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {"type": {"type": "string"}},
                "required": ["type"]
            }
        }),
    }
}

fn check_kind(path: &str, kind: FieldKind, value: &Value, violations: &mut Vec<Violation>) {
    match kind {
        FieldKind::String => {
            if !value.is_string() {
                violations.push(Violation::new(path, "expected a string"));
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                violations.push(Violation::new(path, "expected a boolean"));
            }
        }
        FieldKind::Integer => {
            if value.as_u64().is_none() {
                violations.push(Violation::new(path, "expected a non-negative integer"));
            }
        }
        FieldKind::StringArray
        | FieldKind::NullableStringArray
        | FieldKind::TypedValueArray
        | FieldKind::TypedOutputArray => {
            let items = match value.as_array() {
                Some(items) => items,
                None => {
                    violations.push(Violation::new(path, "expected an array"));
                    return;
                }
            };
            for (index, item) in items.iter().enumerate() {
                check_item(&format!("{}[{}]", path, index), kind, item, violations);
            }
        }
    }
}

fn check_item(path: &str, kind: FieldKind, item: &Value, violations: &mut Vec<Violation>) {
    match kind {
        FieldKind::StringArray => {
            if !item.is_string() {
                violations.push(Violation::new(path, "expected a string"));
            }
        }
        FieldKind::NullableStringArray => {
            if !item.is_string() && !item.is_null() {
                violations.push(Violation::new(path, "expected a string or null"));
            }
        }
        FieldKind::TypedValueArray | FieldKind::TypedOutputArray => {
            let Some(object) = item.as_object() else {
                violations.push(Violation::new(path, "expected an object"));
                return;
            };
            match object.get("type") {
                Some(Value::String(_)) => {}
                Some(Value::Null) | None => violations.push(Violation::new(
                    format!("{}.type", path),
                    "type is required",
                )),
                Some(_) => violations.push(Violation::new(
                    format!("{}.type", path),
                    "expected a string",
                )),
            }
            if kind == FieldKind::TypedValueArray && !object.contains_key("value") {
                violations.push(Violation::new(
                    format!("{}.value", path),
                    "value is required",
                ));
            }
        }
        FieldKind::String | FieldKind::Boolean | FieldKind::Integer => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const FIELDS: &[Field] = &[
        Field::required("network", FieldKind::String, "Network"),
        Field::required("inputs", FieldKind::TypedValueArray, "Inputs"),
        Field::optional("startBlock", FieldKind::Integer, "Start block"),
        Field::optional("topics", FieldKind::NullableStringArray, "Topics"),
    ];
    const SCHEMA: ToolSchema = ToolSchema::new(FIELDS);

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Args {
        network: String,
        inputs: Vec<Value>,
        start_block: Option<u64>,
        topics: Option<Vec<Option<String>>>,
    }

    #[test]
    fn describe_lists_properties_and_required() {
        let schema = SCHEMA.describe();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["network", "inputs"]));
        assert_eq!(schema["properties"]["startBlock"]["type"], "integer");
        assert_eq!(schema["properties"]["network"]["description"], "Network");
    }

    #[test]
    fn accepts_valid_arguments_and_drops_unknown_keys() {
        let args: Args = SCHEMA
            .validate(&json!({
                "network": "ethereum",
                "inputs": [{"type": "address", "value": "0x1"}],
                "topics": ["0xa", null],
                "extra": true
            }))
            .unwrap();
        assert_eq!(args.network, "ethereum");
        assert_eq!(args.inputs.len(), 1);
        assert_eq!(args.start_block, None);
        assert_eq!(args.topics, Some(vec![Some("0xa".to_string()), None]));
    }

    #[test]
    fn collects_every_violation() {
        let violations = SCHEMA
            .validate::<Args>(&json!({
                "inputs": [{"value": 1}, {"type": 5, "value": 1}, "nope"],
                "startBlock": -3
            }))
            .unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["network", "inputs[0].type", "inputs[1].type", "inputs[2]", "startBlock"]
        );
    }

    #[test]
    fn null_required_field_is_missing() {
        let violations = SCHEMA
            .validate::<Args>(&json!({"network": null, "inputs": []}))
            .unwrap_err();
        assert_eq!(violations, vec![Violation::new("network", "network is required")]);
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let violations = SCHEMA.validate::<Args>(&json!(["ethereum"])).unwrap_err();
        assert_eq!(violations[0].path, "$");
    }
}
