//! Tree walks over a parsed JSON document.
//!
//! Paths only grow at object keys. Array elements are visited with the path of
//! the array itself, so `a.b` reaches `{"a": [{"b": 1}]}` and so does `b`.

use serde_json::{Map, Value};

use crate::config_precedence_rules::{number_value, Action, Rule};
use crate::config_value::{Param, ParamValue};
use crate::error::ReplaceError;

/// Returns a rewritten copy of `record`. For each object key the first rule
/// whose pattern is a suffix of the key's path decides its fate; keys no rule
/// matches are walked recursively.
pub fn replace_tree(record: &Value, rules: &[Rule]) -> Value {
    let mut path = Vec::new();
    replace_any(&mut path, record, rules)
}

fn replace_any(path: &mut Vec<String>, record: &Value, rules: &[Rule]) -> Value {
    match record {
        Value::Object(map) => Value::Object(replace_map(path, map, rules)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| replace_any(path, item, rules))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn replace_map(path: &mut Vec<String>, record: &Map<String, Value>, rules: &[Rule]) -> Map<String, Value> {
    let mut out = Map::new();

    for (k, v) in record {
        path.push(k.clone());

        let current: &[String] = path;
        match rules.iter().find_map(|rule| rule.evaluate(current)) {
            Some(Action::Remove) => {}
            Some(Action::Replace(value)) => {
                out.insert(k.clone(), value);
            }
            None => {
                out.insert(k.clone(), replace_any(path, v, rules));
            }
        }

        path.pop();
    }

    out
}

/// Assigns `value` at the exact `path` from the root, creating (or replacing
/// non-object) intermediate nodes with empty objects. Never creates arrays.
pub fn set_path(root: &mut Value, path: &[String], value: Value) -> Result<(), ReplaceError> {
    let map = match root {
        Value::Object(map) => map,
        other => {
            return Err(ReplaceError::NonMappingRoot {
                found: kind_name(other),
            });
        }
    };
    let Some((head, rest)) = path.split_first() else {
        return Err(ReplaceError::EmptySetPath);
    };

    insert_at(map, head, rest, value);
    Ok(())
}

fn insert_at(map: &mut Map<String, Value>, key: &str, rest: &[String], value: Value) {
    let Some((next, tail)) = rest.split_first() else {
        map.insert(key.to_owned(), value);
        return;
    };

    let child = map
        .entry(key.to_owned())
        .or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        *child = Value::Object(Map::new());
    }
    if let Value::Object(child) = child {
        insert_at(child, next, tail, value);
    }
}

/// Applies every set param in order. `Param::parse` never yields a valueless
/// set param; one assembled by hand is skipped.
pub fn set_all(mut root: Value, params: &[Param]) -> Result<Value, ReplaceError> {
    if !root.is_object() {
        return Err(ReplaceError::NonMappingRoot {
            found: kind_name(&root),
        });
    }

    for p in params {
        let value = match &p.value {
            Some(ParamValue::Number(n)) => number_value(*n),
            Some(ParamValue::String(s)) => Value::String(s.clone()),
            None => continue,
        };
        set_path(&mut root, &p.path, value)?;
    }

    Ok(root)
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_value::ParamKind;
    use serde_json::json;

    fn path(ss: &[&str]) -> Vec<String> {
        ss.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suffix_rule_replaces_nested_key() {
        let doc = json!({"a": {"b": {"c": 1}}, "c": 2});
        let rules = vec![Rule::SetNumber(path(&["b", "c"]), 5.0)];
        assert_eq!(
            replace_tree(&doc, &rules),
            json!({"a": {"b": {"c": 5}}, "c": 2})
        );
    }

    #[test]
    fn delete_outranks_later_rules() {
        let doc = json!({"x": {"k": "old"}, "k": "top"});
        let rules = vec![
            Rule::Delete(path(&["k"])),
            Rule::SetString(path(&["k"]), "new".into()),
        ];
        assert_eq!(replace_tree(&doc, &rules), json!({"x": {}}));
    }

    #[test]
    fn arrays_are_path_transparent() {
        let doc = json!({"a": [{"b": 1}, {"b": 2}]});
        let rules = vec![Rule::SetNumber(path(&["a", "b"]), 9.0)];
        assert_eq!(
            replace_tree(&doc, &rules),
            json!({"a": [{"b": 9}, {"b": 9}]})
        );
    }

    #[test]
    fn nested_arrays_are_path_transparent() {
        let doc = json!({"a": [[{"b": 1}], [[{"b": 2, "c": 3}]]]});
        let rules = vec![Rule::Delete(path(&["a", "b"]))];
        assert_eq!(replace_tree(&doc, &rules), json!({"a": [[{}], [[{"c": 3}]]]}));
    }

    #[test]
    fn matched_subtree_is_replaced_wholesale() {
        let doc = json!({"genDelegs": {"k1": {"delegate": "d"}}});
        let rules = vec![Rule::SetString(path(&["genDelegs"]), "none".into())];
        assert_eq!(replace_tree(&doc, &rules), json!({"genDelegs": "none"}));
    }

    #[test]
    fn empty_pattern_matches_every_top_level_key() {
        let doc = json!({"a": 1, "b": {"c": 2}});
        let rules = vec![Rule::Delete(Vec::new())];
        assert_eq!(replace_tree(&doc, &rules), json!({}));
    }

    #[test]
    fn no_rules_returns_equal_document() {
        let doc = json!({"a": [1, "two", null, true, {"b": 2.5}]});
        assert_eq!(replace_tree(&doc, &[]), doc);
    }

    #[test]
    fn input_is_left_untouched() {
        let doc = json!({"a": 1});
        let before = doc.clone();
        let _ = replace_tree(&doc, &[Rule::Delete(path(&["a"]))]);
        assert_eq!(doc, before);
    }

    #[test]
    fn scalar_root_is_returned_as_is() {
        let doc = json!(42);
        assert_eq!(replace_tree(&doc, &[Rule::Delete(Vec::new())]), json!(42));
    }

    #[test]
    fn set_path_creates_intermediate_objects() {
        let mut doc = json!({});
        set_path(&mut doc, &path(&["x", "y", "z"]), json!("v")).unwrap();
        assert_eq!(doc, json!({"x": {"y": {"z": "v"}}}));

        set_path(&mut doc, &path(&["x", "y", "z"]), json!("w")).unwrap();
        assert_eq!(doc, json!({"x": {"y": {"z": "w"}}}));
    }

    #[test]
    fn set_path_overwrites_non_object_intermediates() {
        let mut doc = json!({"x": [1, 2], "keep": true});
        set_path(&mut doc, &path(&["x", "y"]), json!(1)).unwrap();
        assert_eq!(doc, json!({"x": {"y": 1}, "keep": true}));
    }

    #[test]
    fn set_path_rejects_non_object_root() {
        let mut doc = json!([1, 2]);
        let err = set_path(&mut doc, &path(&["a"]), json!(1)).unwrap_err();
        assert!(matches!(err, ReplaceError::NonMappingRoot { found: "array" }));
    }

    #[test]
    fn set_path_rejects_empty_path() {
        let mut doc = json!({});
        let err = set_path(&mut doc, &[], json!(1)).unwrap_err();
        assert!(matches!(err, ReplaceError::EmptySetPath));
    }

    #[test]
    fn set_all_applies_params_in_order() {
        let params = vec![
            Param::parse("a.b=1", ParamKind::Set).unwrap(),
            Param::parse("a=flat", ParamKind::Set).unwrap(),
            Param::parse("c.d=2.5", ParamKind::Set).unwrap(),
        ];
        let doc = set_all(json!({}), &params).unwrap();
        assert_eq!(doc, json!({"a": "flat", "c": {"d": 2.5}}));
    }

    #[test]
    fn set_all_rejects_non_object_root_even_without_params() {
        let err = set_all(json!("text"), &[]).unwrap_err();
        assert!(matches!(err, ReplaceError::NonMappingRoot { found: "string" }));
    }

    #[test]
    fn set_all_skips_hand_built_param_without_value() {
        let params = vec![Param {
            path: path(&["a"]),
            raw: "a".into(),
            value: None,
            kind: ParamKind::Set,
        }];
        assert_eq!(set_all(json!({"b": 1}), &params).unwrap(), json!({"b": 1}));
    }
}
