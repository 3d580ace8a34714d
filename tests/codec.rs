//! Structured codec tests: wire shapes for vectors, quaternions, rotators,
//! transforms, colors, and matrices, plus the encode-side asymmetries.

use yamlbind::codec::{
    decode_color, decode_linear_color, decode_mat4, decode_quat, decode_rotator,
    decode_transform, decode_vec2, decode_vec3, encode_value,
};
use yamlbind::types::{Color, Quat, Rotator, Vec2, Vec3};
use yamlbind::{parse, BindOptions, Binder, Node, ResolvedSchema, TypeSpec, Value};

fn yaml(s: &str) -> Node {
    Node::from_yaml_str(s).expect("yaml")
}

// ==================== Vectors ====================

#[test]
fn vec2_sequence_and_broadcast() {
    assert_eq!(decode_vec2(&yaml("[1, 2]")).unwrap(), Vec2::new(1.0, 2.0));
    assert_eq!(decode_vec2(&yaml("4")).unwrap(), Vec2::splat(4.0));
    assert!(decode_vec2(&yaml("[1, 2, 3]")).is_err());
}

#[test]
fn vec3_sequence_and_broadcast() {
    assert_eq!(
        decode_vec3(&yaml("[1, 2, 3]")).unwrap(),
        Vec3::new(1.0, 2.0, 3.0)
    );
    assert_eq!(decode_vec3(&yaml("0.5")).unwrap(), Vec3::splat(0.5));
    assert!(decode_vec3(&yaml("[1, 2]")).is_err());
    assert!(decode_vec3(&yaml("{x: 1}")).is_err());
}

// ==================== Quaternions and rotators ====================

#[test]
fn quat_four_numbers_pass_through() {
    let q = decode_quat(&yaml("[0.1, 0.2, 0.3, 0.9]")).unwrap();
    assert_eq!(q, Quat::new(0.1, 0.2, 0.3, 0.9));
}

#[test]
fn quat_three_numbers_are_pitch_roll_yaw() {
    let q = decode_quat(&yaml("[10, 20, 30]")).unwrap();
    assert_eq!(q, Rotator::new(10.0, 20.0, 30.0).quaternion());
}

#[test]
fn rotator_field_order_is_pitch_roll_yaw() {
    let r = decode_rotator(&yaml("[10, 20, 30]")).unwrap();
    assert_eq!(r.pitch, 10.0);
    assert_eq!(r.roll, 20.0);
    assert_eq!(r.yaw, 30.0);
    assert!(decode_rotator(&yaml("[10, 20, 30, 40]")).is_err());
}

// ==================== Transform ====================

#[test]
fn transform_accepts_both_rotation_forms() {
    let t = decode_transform(&yaml("[[1, 2, 3], [0, 0, 0, 1], [1, 1, 1]]")).unwrap();
    assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);

    let t = decode_transform(&yaml("[[0, 0, 0], [0, 90, 0], [2, 2, 2]]")).unwrap();
    assert_eq!(t.rotation, Rotator::new(0.0, 90.0, 0.0).quaternion());
}

#[test]
fn transform_rejects_wrong_arity() {
    assert!(decode_transform(&yaml("[[0, 0, 0], [0, 0, 0, 1]]")).is_err());
}

// ==================== Colors ====================

#[test]
fn named_color_table() {
    assert_eq!(decode_color(&yaml("Emerald")).unwrap(), Color::rgb(46, 204, 113));
    assert_eq!(decode_color(&yaml("Orange")).unwrap(), Color::rgb(243, 156, 18));
    assert_eq!(
        decode_color(&yaml("Transparent")).unwrap(),
        Color::new(0, 0, 0, 0)
    );
}

#[test]
fn channel_colors_with_and_without_alpha() {
    assert_eq!(
        decode_color(&yaml("[10, 20, 30, 40]")).unwrap(),
        Color::new(10, 20, 30, 40)
    );
    assert_eq!(
        decode_color(&yaml("[10, 20, 30]")).unwrap(),
        Color::new(10, 20, 30, 255)
    );
}

#[test]
fn linear_color_goes_through_gamma_conversion() {
    let lc = decode_linear_color(&yaml("[255, 0, 0]")).unwrap();
    assert!((lc.r - 1.0).abs() < 1e-6);
    assert_eq!(lc.g, 0.0);
    assert_eq!(lc.a, 1.0);
    // Mid-gray is darker in linear space than 128/255.
    let gray = decode_linear_color(&yaml("[128, 128, 128]")).unwrap();
    assert!(gray.r < 0.25, "{}", gray.r);
    assert!(gray.r > 0.2, "{}", gray.r);
}

// ==================== Matrices ====================

#[test]
fn mat4_rows_of_four() {
    let m = decode_mat4(&yaml(
        "[[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]",
    ))
    .unwrap();
    assert_eq!(m, yamlbind::types::Mat4::IDENTITY);
    assert!(decode_mat4(&yaml("[[1, 0], [0, 1]]")).is_err());
}

// ==================== Encode asymmetries ====================

#[test]
fn encode_never_emits_decode_shorthands() {
    // Broadcast shorthand decodes...
    let v = decode_vec3(&yaml("3")).unwrap();
    // ...but encodes as a full sequence.
    let node = encode_value(&Value::Vec3(v));
    assert_eq!(node.len(), 3);

    // 3-number quat decodes, encode is always 4 numbers.
    let q = decode_quat(&yaml("[0, 90, 0]")).unwrap();
    let node = encode_value(&Value::Quat(q));
    assert_eq!(node.len(), 4);

    // Colors encode with the explicit alpha channel.
    let node = encode_value(&Value::Color(Color::rgb(1, 2, 3)));
    assert_eq!(node.len(), 4);
}

#[test]
fn list_encode_is_always_a_sequence() {
    let node = encode_value(&Value::List(vec![Value::Int(1), Value::Int(2)]));
    assert!(node.is_sequence());
}

// ==================== Emit through the schema ====================

#[test]
fn bound_struct_round_trips_to_yaml() {
    let src = r#"
struct P {
  name: string;
  pos: vec3;
  tint: color;
}
"#;
    let schema = ResolvedSchema::resolve(parse(src).expect("parse")).expect("resolve");
    let node = yaml("name: thing\npos: [1, 2, 3]\ntint: Red");
    let root = TypeSpec::TypeRef("P".to_string());
    let mut target = Value::default_for(&root, &schema);
    let report = Binder::new(&schema).bind_struct(&node, "P", &mut target, &BindOptions::strict());
    assert!(report.success, "{:?}", report.errors);

    let def = schema.get_struct("P").unwrap();
    let out = yamlbind::encode_struct(&schema, def, &target);
    assert_eq!(out.map_keys(), vec!["name", "pos", "tint"]);
    // Named color came in; channel form goes out.
    assert_eq!(out.get("tint").len(), 4);

    let text = yamlbind::to_yaml_string(&out).expect("emit");
    let reparsed = Node::from_yaml_str(&text).expect("reparse");
    let mut second = Value::default_for(&root, &schema);
    let report = Binder::new(&schema).bind_struct(&reparsed, "P", &mut second, &BindOptions::strict());
    assert!(report.success, "{:?}", report.errors);
    assert_eq!(target, second);
}
