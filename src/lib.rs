//! # yamlbind — Schema DSL and YAML Struct Binder
//!
//! A schema DSL (enums, structs, required fields) with a PEST grammar, plus a
//! recursive binder that walks a YAML document tree against a schema,
//! performing type coercion, structural validation, and path-qualified error
//! reporting. Errors accumulate instead of aborting the bind, under four
//! independent strictness switches.
//!
//! ## Schema structure
//!
//! - **enum**: named member list, matched case-insensitively on bind
//! - **struct**: ordered fields, optionally `required`
//!
//! ## Field types
//!
//! - Base: `int`, `float`, `bool`, `string`, `text`
//! - Structured: `vec2`, `vec3`, `quat`, `rotator`, `transform`, `color`,
//!   `linearcolor`, `mat4`
//! - Containers: `list<T>`, `map<K, V>`
//! - `ref<Kind>` (resolver-backed object references), `custom<Handler>`
//!   (caller-registered binding overrides), named enum/struct references
//!
//! ## Example schema
//!
//! ```text
//! enum Quality { Low, Medium, High }
//!
//! struct Config {
//!     required id: int;
//!     title: string;
//!     quality: Quality;
//!     scale: vec3;
//!     tags: list<string>;
//!     limits: map<string, int>;
//! }
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use yamlbind::{parse, BindOptions, Binder, Node, ResolvedSchema, Value, TypeSpec};
//!
//! let schema = ResolvedSchema::resolve(parse("struct C { n: int; }").unwrap()).unwrap();
//! let node = Node::from_yaml_str("n: 7").unwrap();
//! let mut target = Value::default_for(&TypeSpec::TypeRef("C".into()), &schema);
//! let report = Binder::new(&schema).bind_struct(&node, "C", &mut target, &BindOptions::strict());
//! assert!(report.success);
//! ```

pub mod ast;
pub mod bind;
pub mod codec;
pub mod emit;
pub mod lint;
pub mod node;
pub mod parser;
pub mod types;
pub mod value;

pub use ast::{BuiltinType, EnumDef, FieldDef, ResolvedSchema, Schema, StructDef, TypeSpec};
pub use bind::{
    Bindable, BindContext, BindOptions, BindReport, Binder, CustomHandler, HandlerRegistry,
    ObjectResolver, MAX_BIND_DEPTH,
};
pub use codec::ConvertError;
pub use emit::{encode_struct, to_yaml_string};
pub use node::{Node, NodeKind};
pub use parser::parse;
pub use value::Value;
