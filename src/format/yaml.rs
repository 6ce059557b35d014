//! YAML adapter.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use std::path::Path;

use super::Loader;
use crate::error::MergeError;

/// Loads `*.yaml` / `*.yml` files.
///
/// Merge keys (`<<: *anchor`) are expanded and scalar mapping keys
/// (`1:`, `yes:`) are stringified. An empty document yields `null`, which
/// the validator reads as an empty mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl Loader for YamlLoader {
    fn parse(&self, text: &str, path: &Path) -> Result<Value, MergeError> {
        if is_blank_document(text) {
            return Ok(Value::Null);
        }
        let mut yaml: YamlValue =
            serde_yaml::from_str(text).map_err(|e| MergeError::parse(path, e))?;
        yaml.apply_merge().map_err(|e| MergeError::parse(path, e))?;
        yaml_to_json(yaml).map_err(|message| MergeError::parse(path, message))
    }
}

/// Only whitespace, comments and document markers.
fn is_blank_document(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn yaml_to_json(yaml: YamlValue) -> Result<Value, String> {
    Ok(match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        // Non-finite floats have no JSON form; they still fail validation as null.
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn mapping_key(key: YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Result<Value, MergeError> {
        YamlLoader.parse(text, Path::new("en.yaml"))
    }

    #[test]
    fn test_nested_document() {
        let value = parse(
            "title: Hello\nmenu:\n  open: Open\n  items:\n    - One\n    - label: Two\n",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"title": "Hello", "menu": {"open": "Open", "items": ["One", {"label": "Two"}]}})
        );
    }

    #[test]
    fn test_key_order_follows_document() {
        let value = parse("z: last\na: first\nm: middle\n").unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_and_comment_only_documents() {
        assert_eq!(parse("").unwrap(), Value::Null);
        assert_eq!(parse("   \n").unwrap(), Value::Null);
        assert_eq!(parse("# nothing here\n").unwrap(), Value::Null);
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let value = parse("1: one\ntrue: yes-key\n").unwrap();
        assert_eq!(value, json!({"1": "one", "true": "yes-key"}));
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let value = parse(
            "buttons: &buttons\n  ok: OK\n  cancel: Cancel\nform:\n  <<: *buttons\n  title: Form\n  ok: Save\n",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "buttons": {"ok": "OK", "cancel": "Cancel"},
                "form": {"title": "Form", "ok": "Save", "cancel": "Cancel"}
            })
        );
        assert!(value["form"].get("<<").is_none());
    }

    #[test]
    fn test_merge_key_sequence_and_plain_alias() {
        let value = parse(
            "a: &a\n  x: A\nb: &b\n  y: B\nc:\n  <<: [*a, *b]\nd: *a\n",
        )
        .unwrap();
        assert_eq!(value["c"], json!({"x": "A", "y": "B"}));
        assert_eq!(value["d"], json!({"x": "A"}));
    }

    #[test]
    fn test_merge_key_onto_scalar_is_parse_error() {
        let err = parse("a: &a text\nb:\n  <<: *a\n").unwrap_err();
        assert!(matches!(err, MergeError::Parse { .. }));
    }

    #[test]
    fn test_non_string_leaves_pass_through_for_validation() {
        let value = parse("count: 5\nenabled: false\nratio: 0.5\n").unwrap();
        assert_eq!(value["count"], json!(5));
        assert_eq!(value["enabled"], json!(false));
        assert!(value["ratio"].is_f64());
    }

    #[test]
    fn test_unicode_preserved() {
        let value = parse("greet: Привет\nemoji: \"🎉\"\n").unwrap();
        assert_eq!(value, json!({"greet": "Привет", "emoji": "🎉"}));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse("a: [unclosed\n").unwrap_err();
        assert!(matches!(err, MergeError::Parse { .. }));
        assert!(err.to_string().starts_with("en.yaml: "));
    }
}
