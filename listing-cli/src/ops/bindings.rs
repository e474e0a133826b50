//! Template values from the command line and JSON files.

use std::path::Path;

use eyre::{Context, Result, bail};
use listing::{Accessor, Bindings, RuntimeType, Value};
use serde_json::{Map, Value as Json};

/// Build bindings from positional strings, `key=value` pairs and an optional
/// JSON file (an array binds positions, an object binds keys).
///
/// Positional strings come after the JSON array's elements; `key=value`
/// pairs override JSON keys.
pub fn bindings(
    values: &[String],
    named: &[(String, String)],
    json: Option<&Path>,
) -> Result<Bindings> {
    let mut bindings = match json {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read values from {}", path.display()))?;
            let json: Json = serde_json::from_str(&text)
                .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
            from_json(json)?
        }
        None => Bindings::new(),
    };
    for value in values {
        bindings = bindings.arg(value.as_str());
    }
    for (key, value) in named {
        bindings = bindings.set(key.as_str(), value.as_str());
    }
    Ok(bindings)
}

/// Parse `key=value`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

fn from_json(json: Json) -> Result<Bindings> {
    match json {
        Json::Array(items) => Ok(items.into_iter().map(to_value).collect()),
        Json::Object(fields) => Ok(Bindings::named(
            fields.into_iter().map(|(key, value)| (key, to_value(value))),
        )),
        other => bail!("expected a JSON array or object of values, got {}", other),
    }
}

fn to_value(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).map_or(Value::Long(i), Value::Int),
            None => n.as_f64().map_or(Value::Null, Value::Double),
        },
        Json::String(s) => Value::Str(s),
        Json::Array(items) => Value::object(JsonArray(items)),
        Json::Object(fields) => Value::object(JsonObject(fields)),
    }
}

/// A JSON object, whose keys are its accessors.
struct JsonObject(Map<String, Json>);

impl Accessor for JsonObject {
    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::new("java.util", "Map")
    }

    fn access(&self, member: &str) -> Option<Value> {
        if let Some(value) = self.0.get(member) {
            return Some(to_value(value.clone()));
        }
        match member {
            "size" => i32::try_from(self.0.len()).ok().map(Value::Int),
            "toString" => Some(Value::Str(Json::Object(self.0.clone()).to_string())),
            _ => None,
        }
    }
}

/// A JSON array, whose indices are its accessors.
struct JsonArray(Vec<Json>);

impl Accessor for JsonArray {
    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::new("java.util", "List")
    }

    fn access(&self, member: &str) -> Option<Value> {
        match member {
            "size" | "length" => i32::try_from(self.0.len()).ok().map(Value::Int),
            "toString" => Some(Value::Str(Json::Array(self.0.clone()).to_string())),
            index => {
                let index: usize = index.parse().ok()?;
                self.0.get(index).cloned().map(to_value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use listing::Script;
    use tempfile::NamedTempFile;

    use super::*;

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("name=a=b").unwrap(),
            ("name".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_command_line_values() {
        let bindings = bindings(
            &["A".to_string(), "B".to_string()],
            &[("k".to_string(), "v".to_string())],
            None,
        )
        .unwrap();
        let script = Script::parse("{{$:1}}{{$:0}}{{$:k}}").unwrap();
        assert_eq!(script.render(&bindings).unwrap(), "BAv");
    }

    #[test]
    fn test_json_object_values() {
        let file = json_file(
            r#"{"count": 3, "big": 9000000000, "owner": {"name": "Ada", "tags": ["x", "y"]}}"#,
        );
        let bindings = bindings(&[], &[], Some(file.path())).unwrap();
        let script = Script::parse(
            "{{$:count}} {{$:big}} {{#name:owner}} {{#tags.1:owner}} {{#class.simpleName:big}}",
        )
        .unwrap();
        assert_eq!(script.render(&bindings).unwrap(), "3 9000000000 Ada y Long");
    }

    #[test]
    fn test_json_array_then_positional() {
        let file = json_file(r#"[1.5, true, null]"#);
        let bindings = bindings(&["last".to_string()], &[], Some(file.path())).unwrap();
        let script = Script::parse("{{$}} {{$}} {{S}} {{$}}").unwrap();
        assert_eq!(script.render(&bindings).unwrap(), "1.5 true null last");
    }

    #[test]
    fn test_json_scalar_is_rejected() {
        let file = json_file("42");
        assert!(bindings(&[], &[], Some(file.path())).is_err());
    }
}
