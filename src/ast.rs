//! Abstract Syntax Tree for the schema DSL.

use std::collections::HashMap;

/// Root schema definition: enums and structs.
#[derive(Debug, Clone)]
pub struct Schema {
    pub enums: Vec<EnumDef>,
    pub structs: Vec<StructDef>,
}

#[derive(Debug, Clone)]
pub struct EnumDef {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub type_spec: TypeSpec,
    pub required: bool,
}

/// Field type specification. Bare identifiers (`TypeRef`) are resolved
/// against the schema's enums and structs at bind time.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    Int,
    Float,
    Bool,
    Str,
    Text,
    Builtin(BuiltinType),
    List(Box<TypeSpec>),
    Map(Box<TypeSpec>, Box<TypeSpec>),
    /// Object reference; the identifier names the expected base kind,
    /// resolved through the injected resolver.
    Ref(String),
    /// Opaque type bound by a caller-registered handler.
    Custom(String),
    /// Named enum or struct reference.
    TypeRef(String),
}

/// Structured types with dedicated wire shapes, converted by the codec
/// instead of generic struct recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    Vec2,
    Vec3,
    Quat,
    Rotator,
    Transform,
    Color,
    LinearColor,
    Mat4,
}

impl BuiltinType {
    /// DSL keyword, also used as the type name in diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            BuiltinType::Vec2 => "vec2",
            BuiltinType::Vec3 => "vec3",
            BuiltinType::Quat => "quat",
            BuiltinType::Rotator => "rotator",
            BuiltinType::Transform => "transform",
            BuiltinType::Color => "color",
            BuiltinType::LinearColor => "linearcolor",
            BuiltinType::Mat4 => "mat4",
        }
    }

    pub fn from_keyword(s: &str) -> Option<BuiltinType> {
        match s {
            "vec2" => Some(BuiltinType::Vec2),
            "vec3" => Some(BuiltinType::Vec3),
            "quat" => Some(BuiltinType::Quat),
            "rotator" => Some(BuiltinType::Rotator),
            "transform" => Some(BuiltinType::Transform),
            "color" => Some(BuiltinType::Color),
            "linearcolor" => Some(BuiltinType::LinearColor),
            "mat4" => Some(BuiltinType::Mat4),
            _ => None,
        }
    }
}

impl TypeSpec {
    /// Diagnostic name used in `cannot convert ... to type <kind>` messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeSpec::Int => "integer",
            TypeSpec::Float => "float",
            TypeSpec::Bool => "boolean",
            TypeSpec::Str => "string",
            TypeSpec::Text => "text",
            TypeSpec::Builtin(b) => b.keyword(),
            TypeSpec::List(_) => "list",
            TypeSpec::Map(_, _) => "map",
            TypeSpec::Ref(_) => "reference",
            TypeSpec::Custom(_) => "custom",
            TypeSpec::TypeRef(_) => "type",
        }
    }

    /// Declared type name for custom-handler lookup: named types only.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            TypeSpec::Custom(name) | TypeSpec::TypeRef(name) => Some(name),
            TypeSpec::Builtin(b) => Some(b.keyword()),
            _ => None,
        }
    }
}

/// Resolved schema: enums and structs by name for the binder.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    pub schema: Schema,
    pub structs_by_name: HashMap<String, usize>,
    pub enums_by_name: HashMap<String, usize>,
}

impl ResolvedSchema {
    pub fn resolve(schema: Schema) -> Result<Self, String> {
        let mut structs_by_name = HashMap::new();
        let mut enums_by_name = HashMap::new();
        for (i, e) in schema.enums.iter().enumerate() {
            if enums_by_name.insert(e.name.clone(), i).is_some() {
                return Err(format!("Duplicate enum name: {}", e.name));
            }
        }
        for (i, s) in schema.structs.iter().enumerate() {
            if structs_by_name.contains_key(&s.name) || enums_by_name.contains_key(&s.name) {
                return Err(format!("Duplicate type name: {}", s.name));
            }
            structs_by_name.insert(s.name.clone(), i);
        }
        Ok(ResolvedSchema {
            schema,
            structs_by_name,
            enums_by_name,
        })
    }

    pub fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs_by_name
            .get(name)
            .map(|&i| &self.schema.structs[i])
    }

    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums_by_name.get(name).map(|&i| &self.schema.enums[i])
    }
}
