//! Scalar and structured codec: conversions between document-tree nodes and
//! the fixed catalogue of value shapes.
//!
//! Decode failures carry a tag distinguishing "wrong node kind" from "node
//! kind correct but value unparsable"; the binder words its diagnostics
//! differently per case. `can_*` probes are dry runs used for strict
//! pre-flight checks and never touch output.

use crate::ast::{BuiltinType, TypeSpec};
use crate::node::Node;
use crate::types::{Color, LinearColor, Mat4, Quat, Rotator, Transform, Vec2, Vec3};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The node is the wrong kind for the target shape entirely.
    #[error("value is not a {expected}")]
    WrongKind { expected: &'static str },
    /// Kind was right but the content does not parse as the target type.
    #[error("cannot convert \"{raw}\" to type {target}")]
    Unparsable { raw: String, target: &'static str },
}

fn wrong_kind(expected: &'static str) -> ConvertError {
    ConvertError::WrongKind { expected }
}

fn unparsable(raw: &str, target: &'static str) -> ConvertError {
    ConvertError::Unparsable {
        raw: raw.to_string(),
        target,
    }
}

// Primitives ----------------------------------------------------------------

pub fn decode_int(node: &Node) -> Result<i64, ConvertError> {
    let text = node.scalar().ok_or_else(|| wrong_kind("scalar"))?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| unparsable(text, "integer"))
}

pub fn decode_float(node: &Node) -> Result<f64, ConvertError> {
    let text = node.scalar().ok_or_else(|| wrong_kind("scalar"))?;
    parse_float_text(text).ok_or_else(|| unparsable(text, "float"))
}

/// YAML core-schema float forms, including `.inf` / `-.inf` / `.nan`.
fn parse_float_text(text: &str) -> Option<f64> {
    let t = text.trim();
    match t.to_ascii_lowercase().as_str() {
        ".inf" | "+.inf" => return Some(f64::INFINITY),
        "-.inf" => return Some(f64::NEG_INFINITY),
        ".nan" => return Some(f64::NAN),
        _ => {}
    }
    t.parse::<f64>().ok()
}

/// YAML 1.1 boolean set, case-insensitive.
pub fn decode_bool(node: &Node) -> Result<bool, ConvertError> {
    let text = node.scalar().ok_or_else(|| wrong_kind("scalar"))?;
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "y" => Ok(true),
        "false" | "no" | "off" | "n" => Ok(false),
        _ => Err(unparsable(text, "boolean")),
    }
}

pub fn decode_string(node: &Node) -> Result<String, ConvertError> {
    node.scalar()
        .map(str::to_string)
        .ok_or_else(|| wrong_kind("scalar"))
}

/// Decode a primitive by spec. Only `Int`, `Float`, `Bool`, `Str`, `Text`
/// are primitive; anything else is a caller bug.
pub fn decode_primitive(node: &Node, spec: &TypeSpec) -> Result<Value, ConvertError> {
    match spec {
        TypeSpec::Int => decode_int(node).map(Value::Int),
        TypeSpec::Float => decode_float(node).map(Value::Float),
        TypeSpec::Bool => decode_bool(node).map(Value::Bool),
        TypeSpec::Str | TypeSpec::Text => decode_string(node).map(Value::Str),
        other => unreachable!("decode_primitive on non-primitive spec {:?}", other),
    }
}

pub fn can_decode_primitive(node: &Node, spec: &TypeSpec) -> bool {
    decode_primitive(node, spec).is_ok()
}

// Structured composites ------------------------------------------------------

fn number_at(node: &Node, i: usize, target: &'static str) -> Result<f64, ConvertError> {
    let elem = node.index(i);
    match elem.scalar() {
        Some(text) => parse_float_text(text).ok_or_else(|| unparsable(text, target)),
        None => Err(unparsable(&elem.brief(), target)),
    }
}

/// 2-vector: `[x, y]`, or a bare scalar number broadcast to both components
/// (decode-only shorthand).
pub fn decode_vec2(node: &Node) -> Result<Vec2, ConvertError> {
    if let Some(text) = node.scalar() {
        let v = parse_float_text(text).ok_or_else(|| unparsable(text, "vec2"))?;
        return Ok(Vec2::splat(v));
    }
    if !node.is_sequence() {
        return Err(wrong_kind("sequence"));
    }
    if node.len() != 2 {
        return Err(unparsable(&node.brief(), "vec2"));
    }
    Ok(Vec2::new(
        number_at(node, 0, "vec2")?,
        number_at(node, 1, "vec2")?,
    ))
}

/// 3-vector: `[x, y, z]`, or scalar broadcast (decode only).
pub fn decode_vec3(node: &Node) -> Result<Vec3, ConvertError> {
    if let Some(text) = node.scalar() {
        let v = parse_float_text(text).ok_or_else(|| unparsable(text, "vec3"))?;
        return Ok(Vec3::splat(v));
    }
    if !node.is_sequence() {
        return Err(wrong_kind("sequence"));
    }
    if node.len() != 3 {
        return Err(unparsable(&node.brief(), "vec3"));
    }
    Ok(Vec3::new(
        number_at(node, 0, "vec3")?,
        number_at(node, 1, "vec3")?,
        number_at(node, 2, "vec3")?,
    ))
}

/// Quaternion: `[x, y, z, w]`, or a 3-number sequence interpreted as a
/// pitch/roll/yaw rotation and converted. The two wire shapes are
/// disambiguated purely by sequence length.
pub fn decode_quat(node: &Node) -> Result<Quat, ConvertError> {
    if !node.is_sequence() {
        return Err(wrong_kind("sequence"));
    }
    match node.len() {
        4 => Ok(Quat::new(
            number_at(node, 0, "quat")?,
            number_at(node, 1, "quat")?,
            number_at(node, 2, "quat")?,
            number_at(node, 3, "quat")?,
        )),
        3 => decode_rotator(node).map(|r| r.quaternion()),
        _ => Err(unparsable(&node.brief(), "quat")),
    }
}

/// Rotator: exactly `[pitch, roll, yaw]`, in that field order.
pub fn decode_rotator(node: &Node) -> Result<Rotator, ConvertError> {
    if !node.is_sequence() {
        return Err(wrong_kind("sequence"));
    }
    if node.len() != 3 {
        return Err(unparsable(&node.brief(), "rotator"));
    }
    Ok(Rotator::new(
        number_at(node, 0, "rotator")?,
        number_at(node, 1, "rotator")?,
        number_at(node, 2, "rotator")?,
    ))
}

/// Transform: exactly `[translation, rotation, scale]` with a 3-or-4-number
/// rotation element.
pub fn decode_transform(node: &Node) -> Result<Transform, ConvertError> {
    if !node.is_sequence() {
        return Err(wrong_kind("sequence"));
    }
    if node.len() != 3 {
        return Err(unparsable(&node.brief(), "transform"));
    }
    Ok(Transform {
        translation: decode_vec3(node.index(0))?,
        rotation: decode_quat(node.index(1))?,
        scale: decode_vec3(node.index(2))?,
    })
}

fn byte_at(node: &Node, i: usize, target: &'static str) -> Result<u8, ConvertError> {
    let elem = node.index(i);
    match elem.scalar() {
        Some(text) => text.trim().parse::<u8>().map_err(|_| unparsable(text, target)),
        None => Err(unparsable(&elem.brief(), target)),
    }
}

/// Color: a case-sensitive named color, or `[r, g, b]` / `[r, g, b, a]`
/// byte channels (alpha defaults to opaque).
pub fn decode_color(node: &Node) -> Result<Color, ConvertError> {
    if let Some(text) = node.scalar() {
        return Color::named(text).ok_or_else(|| unparsable(text, "color"));
    }
    if !node.is_sequence() {
        return Err(wrong_kind("scalar or sequence"));
    }
    let n = node.len();
    if n != 3 && n != 4 {
        return Err(unparsable(&node.brief(), "color"));
    }
    let a = if n == 4 { byte_at(node, 3, "color")? } else { 255 };
    Ok(Color::new(
        byte_at(node, 0, "color")?,
        byte_at(node, 1, "color")?,
        byte_at(node, 2, "color")?,
        a,
    ))
}

/// Linear color: same wire shape as [`decode_color`], converted through the
/// gamma-correct channel curve.
pub fn decode_linear_color(node: &Node) -> Result<LinearColor, ConvertError> {
    let c = decode_color(node).map_err(|e| match e {
        ConvertError::Unparsable { raw, .. } => ConvertError::Unparsable {
            raw,
            target: "linearcolor",
        },
        other => other,
    })?;
    Ok(c.to_linear())
}

/// 4x4 matrix: a sequence of 4 rows, each a sequence of 4 numbers.
pub fn decode_mat4(node: &Node) -> Result<Mat4, ConvertError> {
    if !node.is_sequence() {
        return Err(wrong_kind("sequence"));
    }
    if node.len() != 4 {
        return Err(unparsable(&node.brief(), "mat4"));
    }
    let mut rows = [[0.0; 4]; 4];
    for (i, row) in node.items().iter().enumerate() {
        if !row.is_sequence() || row.len() != 4 {
            return Err(unparsable(&row.brief(), "mat4"));
        }
        for j in 0..4 {
            rows[i][j] = number_at(row, j, "mat4")?;
        }
    }
    Ok(Mat4 { rows })
}

/// Decode a structured builtin by tag.
pub fn decode_builtin(node: &Node, builtin: BuiltinType) -> Result<Value, ConvertError> {
    match builtin {
        BuiltinType::Vec2 => decode_vec2(node).map(Value::Vec2),
        BuiltinType::Vec3 => decode_vec3(node).map(Value::Vec3),
        BuiltinType::Quat => decode_quat(node).map(Value::Quat),
        BuiltinType::Rotator => decode_rotator(node).map(Value::Rotator),
        BuiltinType::Transform => decode_transform(node).map(Value::Transform),
        BuiltinType::Color => decode_color(node).map(Value::Color),
        BuiltinType::LinearColor => decode_linear_color(node).map(Value::LinearColor),
        BuiltinType::Mat4 => decode_mat4(node).map(Value::Mat4),
    }
}

pub fn can_decode_builtin(node: &Node, builtin: BuiltinType) -> bool {
    decode_builtin(node, builtin).is_ok()
}

// Encode --------------------------------------------------------------------

fn number_node(v: f64) -> Node {
    Node::Scalar(format_number(v))
}

/// Shortest text form; integral floats keep a trailing `.0` only when needed
/// to round-trip (YAML re-reads `1` as an int scalar, which the float decoder
/// accepts anyway).
fn format_number(v: f64) -> String {
    format!("{}", v)
}

/// Encode a value back into a tree node. Encode never produces the
/// decode-side shorthands: vectors are always full sequences, quaternions
/// always 4 numbers, colors always 4 channels.
pub fn encode_value(value: &Value) -> Node {
    match value {
        Value::Int(x) => Node::Scalar(x.to_string()),
        Value::Float(x) => Node::Scalar(format_number(*x)),
        Value::Bool(b) => Node::Scalar(b.to_string()),
        Value::Str(s) | Value::Enum(s) | Value::Reference(s) => Node::Scalar(s.clone()),
        Value::Vec2(v) => Node::Sequence(vec![number_node(v.x), number_node(v.y)]),
        Value::Vec3(v) => Node::Sequence(vec![
            number_node(v.x),
            number_node(v.y),
            number_node(v.z),
        ]),
        Value::Quat(q) => Node::Sequence(vec![
            number_node(q.x),
            number_node(q.y),
            number_node(q.z),
            number_node(q.w),
        ]),
        Value::Rotator(r) => Node::Sequence(vec![
            number_node(r.pitch),
            number_node(r.roll),
            number_node(r.yaw),
        ]),
        Value::Transform(t) => Node::Sequence(vec![
            encode_value(&Value::Vec3(t.translation)),
            encode_value(&Value::Quat(t.rotation)),
            encode_value(&Value::Vec3(t.scale)),
        ]),
        Value::Color(c) => Node::Sequence(vec![
            Node::Scalar(c.r.to_string()),
            Node::Scalar(c.g.to_string()),
            Node::Scalar(c.b.to_string()),
            Node::Scalar(c.a.to_string()),
        ]),
        Value::LinearColor(c) => encode_value(&Value::Color(linear_to_srgb(c))),
        Value::Mat4(m) => Node::Sequence(
            m.rows
                .iter()
                .map(|row| Node::Sequence(row.iter().map(|v| number_node(*v)).collect()))
                .collect(),
        ),
        Value::List(items) => Node::Sequence(items.iter().map(encode_value).collect()),
        Value::Map(entries) => Node::Map(
            entries
                .iter()
                .map(|(k, v)| (encode_value(k), encode_value(v)))
                .collect(),
        ),
        Value::Struct(fields) => Node::Map(
            fields
                .iter()
                .map(|(k, v)| (Node::Scalar(k.clone()), encode_value(v)))
                .collect(),
        ),
    }
}

fn linear_to_srgb(c: &LinearColor) -> Color {
    fn channel(v: f32) -> u8 {
        let v = v.clamp(0.0, 1.0);
        let s = if v <= 0.0031308 {
            v * 12.92
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        };
        (s * 255.0).round() as u8
    }
    Color::new(
        channel(c.r),
        channel(c.g),
        channel(c.b),
        (c.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}
