//! Emit bound values back into document trees and YAML text.
//!
//! The encode direction is narrower than decode on purpose: no scalar
//! broadcast, no 3-number quaternions, lists always become sequences.

use serde_yaml::Value as YamlValue;

use crate::ast::{ResolvedSchema, StructDef, TypeSpec};
use crate::codec;
use crate::node::Node;
use crate::value::Value;

/// Encode a struct value as a map node, fields in declaration order.
pub fn encode_struct(schema: &ResolvedSchema, def: &StructDef, value: &Value) -> Node {
    let mut entries = Vec::new();
    for field in &def.fields {
        if let Some(v) = value.field(&field.name) {
            entries.push((
                Node::Scalar(field.name.clone()),
                encode_field(schema, &field.type_spec, v),
            ));
        }
    }
    Node::Map(entries)
}

fn encode_field(schema: &ResolvedSchema, spec: &TypeSpec, value: &Value) -> Node {
    match spec {
        TypeSpec::TypeRef(name) => {
            if let Some(def) = schema.get_struct(name) {
                encode_struct(schema, def, value)
            } else {
                codec::encode_value(value)
            }
        }
        TypeSpec::List(elem) => match value.as_list() {
            Some(items) => Node::Sequence(
                items
                    .iter()
                    .map(|v| encode_field(schema, elem, v))
                    .collect(),
            ),
            None => codec::encode_value(value),
        },
        TypeSpec::Map(key_spec, value_spec) => match value.as_map() {
            Some(entries) => Node::Map(
                entries
                    .iter()
                    .map(|(k, v)| {
                        (
                            encode_field(schema, key_spec, k),
                            encode_field(schema, value_spec, v),
                        )
                    })
                    .collect(),
            ),
            None => codec::encode_value(value),
        },
        _ => codec::encode_value(value),
    }
}

/// Render a tree as YAML text through the parser collaborator.
pub fn to_yaml_string(node: &Node) -> Result<String, String> {
    serde_yaml::to_string(&node_to_yaml(node)).map_err(|e| format!("yaml emit error: {e}"))
}

/// Scalars re-acquire their typed YAML form where the text is unambiguous;
/// everything else stays a string.
fn node_to_yaml(node: &Node) -> YamlValue {
    match node {
        Node::Undefined | Node::Null => YamlValue::Null,
        Node::Scalar(text) => {
            if let Ok(i) = text.parse::<i64>() {
                return YamlValue::from(i);
            }
            if let Ok(f) = text.parse::<f64>() {
                return YamlValue::from(f);
            }
            match text.as_str() {
                "true" => YamlValue::Bool(true),
                "false" => YamlValue::Bool(false),
                _ => YamlValue::String(text.clone()),
            }
        }
        Node::Sequence(items) => YamlValue::Sequence(items.iter().map(node_to_yaml).collect()),
        Node::Map(entries) => YamlValue::Mapping(
            entries
                .iter()
                .map(|(k, v)| (node_to_yaml(k), node_to_yaml(v)))
                .collect(),
        ),
    }
}
