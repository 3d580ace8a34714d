//! Runtime values for binding (dynamic target storage).

use std::collections::HashMap;

use crate::ast::{BuiltinType, ResolvedSchema, TypeSpec};
use crate::types::{Color, LinearColor, Mat4, Quat, Rotator, Transform, Vec2, Vec3};

/// A single bound value (field or compound).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Matched enum member, stored with the schema's canonical casing.
    Enum(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Quat(Quat),
    Rotator(Rotator),
    Transform(Transform),
    Color(Color),
    LinearColor(LinearColor),
    Mat4(Mat4),
    /// Resolved object reference handle.
    Reference(String),
    List(Vec<Value>),
    /// Ordered key-value pairs, mirroring the document map's tree order.
    Map(Vec<(Value, Value)>),
    Struct(HashMap<String, Value>),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(x) => Some(*x as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Enum(s) | Value::Reference(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Struct(m) => Some(m),
            _ => None,
        }
    }

    /// Struct field access, `None` for non-structs and missing fields.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_struct().and_then(|m| m.get(name))
    }

    /// Default (zeroed) storage for a type spec. A struct default carries a
    /// default for every declared field, recursively; unknown type refs
    /// default to an empty struct and are reported by the schema lint.
    pub fn default_for(spec: &TypeSpec, schema: &ResolvedSchema) -> Value {
        match spec {
            TypeSpec::Int => Value::Int(0),
            TypeSpec::Float => Value::Float(0.0),
            TypeSpec::Bool => Value::Bool(false),
            TypeSpec::Str | TypeSpec::Text => Value::Str(String::new()),
            TypeSpec::Builtin(b) => Value::default_builtin(*b),
            TypeSpec::List(_) => Value::List(Vec::new()),
            TypeSpec::Map(_, _) => Value::Map(Vec::new()),
            TypeSpec::Ref(_) => Value::Reference(String::new()),
            TypeSpec::Custom(_) => Value::Struct(HashMap::new()),
            TypeSpec::TypeRef(name) => {
                if let Some(e) = schema.get_enum(name) {
                    Value::Enum(e.members.first().cloned().unwrap_or_default())
                } else if let Some(s) = schema.get_struct(name) {
                    Value::Struct(
                        s.fields
                            .iter()
                            .map(|f| (f.name.clone(), Value::default_for(&f.type_spec, schema)))
                            .collect(),
                    )
                } else {
                    Value::Struct(HashMap::new())
                }
            }
        }
    }

    fn default_builtin(b: BuiltinType) -> Value {
        match b {
            BuiltinType::Vec2 => Value::Vec2(Vec2::default()),
            BuiltinType::Vec3 => Value::Vec3(Vec3::default()),
            BuiltinType::Quat => Value::Quat(Quat::IDENTITY),
            BuiltinType::Rotator => Value::Rotator(Rotator::default()),
            BuiltinType::Transform => Value::Transform(Transform::default()),
            BuiltinType::Color => Value::Color(Color::BLACK),
            BuiltinType::LinearColor => Value::LinearColor(LinearColor::default()),
            BuiltinType::Mat4 => Value::Mat4(Mat4::IDENTITY),
        }
    }
}
