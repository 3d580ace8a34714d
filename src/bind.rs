//! Binder/validator engine: recursively walks a schema descriptor against a
//! document tree, populating target storage and accumulating path-qualified
//! validation errors.
//!
//! Binding never aborts on a field failure; every sibling, element, and map
//! entry is still attempted and all errors are collected in depth-first,
//! declaration order. Strictness is controlled by four independent switches
//! on [`BindOptions`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::ast::{EnumDef, FieldDef, ResolvedSchema, StructDef, TypeSpec};
use crate::codec;
use crate::node::Node;
use crate::value::Value;

/// Recursion bound: documents nested deeper than this fail with a dedicated
/// error instead of exhausting the call stack.
pub const MAX_BIND_DEPTH: usize = 64;

/// The one key/name comparison rule, shared by field-value lookup, the
/// additional-property sweep, and enum member matching.
pub(crate) fn keys_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Strictness switches. Default construction is fully permissive.
#[derive(Clone, Default)]
pub struct BindOptions {
    /// Node-kind mismatches and unparsable scalars become errors.
    pub check_types: bool,
    /// Unmatched enum values become errors.
    pub check_enums: bool,
    /// Absent required fields become errors.
    pub check_required: bool,
    /// Map keys with no matching struct field become errors.
    pub check_additional_properties: bool,
    /// Caller-supplied handlers, consulted by declared type name before the
    /// built-in codec and before generic struct recursion.
    pub handlers: HandlerRegistry,
}

impl BindOptions {
    /// All switches off (the default).
    pub fn lax() -> Self {
        BindOptions::default()
    }

    /// All switches on.
    pub fn strict() -> Self {
        BindOptions {
            check_types: true,
            check_enums: true,
            check_required: true,
            check_additional_properties: true,
            handlers: HandlerRegistry::default(),
        }
    }

    pub fn with_handler<F>(mut self, type_name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Node, &mut Value, &mut BindContext) + Send + Sync + 'static,
    {
        self.handlers.register(type_name, handler);
        self
    }
}

/// A user-supplied binding override for an otherwise-opaque type.
pub type CustomHandler = Arc<dyn Fn(&Node, &mut Value, &mut BindContext) + Send + Sync>;

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, CustomHandler>,
}

impl HandlerRegistry {
    pub fn register<F>(&mut self, type_name: impl Into<String>, handler: F)
    where
        F: Fn(&Node, &mut Value, &mut BindContext) + Send + Sync + 'static,
    {
        self.handlers.insert(type_name.into(), Arc::new(handler));
    }

    pub fn get(&self, type_name: &str) -> Option<&CustomHandler> {
        self.handlers.get(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("types", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolves object-reference paths to handles. Absent resolver means every
/// reference field fails closed.
pub trait ObjectResolver {
    fn resolve(&self, path: &str, expected_kind: &str) -> Option<String>;
}

/// Path stack and error list for one top-level bind call. Not shared across
/// concurrent binds.
pub struct BindContext {
    path: Vec<String>,
    errors: Vec<String>,
}

impl BindContext {
    /// Fresh context, path seeded with the empty root segment.
    pub fn new() -> Self {
        BindContext {
            path: vec![String::new()],
            errors: Vec::new(),
        }
    }

    pub fn push_segment(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub fn pop_segment(&mut self) {
        debug_assert!(self.path.len() > 1, "pop_segment on empty path stack");
        self.path.pop();
    }

    /// Run `f` with `segment` pushed; the pop is paired even on early return.
    pub fn scoped<R>(&mut self, segment: impl Into<String>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_segment(segment);
        let out = f(self);
        self.pop_segment();
        out
    }

    /// Record an error at the current path: `"<dotted-path>: <message>"`.
    pub fn add_error(&mut self, message: impl AsRef<str>) {
        self.errors
            .push(format!("{}: {}", self.path.join("."), message.as_ref()));
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    fn depth(&self) -> usize {
        self.path.len() - 1
    }
}

impl Default for BindContext {
    fn default() -> Self {
        BindContext::new()
    }
}

/// Result of one top-level bind call.
#[derive(Debug, Clone, PartialEq)]
pub struct BindReport {
    pub success: bool,
    pub errors: Vec<String>,
}

impl From<BindContext> for BindReport {
    fn from(ctx: BindContext) -> Self {
        BindReport {
            success: ctx.errors.is_empty(),
            errors: ctx.errors,
        }
    }
}

/// A compile-time-known target type that supplies its own descriptor.
///
/// `capture` seeds the dynamic storage from the current contents, so fields
/// absent from the document keep their prior values; `apply` writes the bound
/// storage back.
pub trait Bindable {
    fn descriptor() -> StructDef;
    fn capture(&self) -> Value;
    fn apply(&mut self, storage: &Value);
}

/// The engine. Holds the resolved schema and an optional reference resolver;
/// carries no per-call state, so one binder may serve many bind calls.
pub struct Binder<'a> {
    schema: &'a ResolvedSchema,
    resolver: Option<&'a dyn ObjectResolver>,
}

impl<'a> Binder<'a> {
    pub fn new(schema: &'a ResolvedSchema) -> Self {
        Binder {
            schema,
            resolver: None,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn ObjectResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Bind into untyped storage shaped by a schema struct.
    ///
    /// The caller allocates `target` (normally via [`Value::default_for`])
    /// before the call; binding mutates it in place.
    pub fn bind_struct(
        &self,
        node: &Node,
        struct_name: &str,
        target: &mut Value,
        options: &BindOptions,
    ) -> BindReport {
        let def = self
            .schema
            .get_struct(struct_name)
            .unwrap_or_else(|| panic!("schema has no struct named `{struct_name}`"));
        let mut ctx = BindContext::new();
        // An undefined root is "absent", not a mismatch: nothing to bind.
        if node.is_defined() {
            self.bind_struct_fields(node, def, target, options, &mut ctx);
        }
        BindReport::from(ctx)
    }

    /// Bind into a typed target that carries its own descriptor.
    pub fn bind<T: Bindable>(
        &self,
        node: &Node,
        target: &mut T,
        options: &BindOptions,
    ) -> BindReport {
        let def = T::descriptor();
        let mut storage = target.capture();
        let mut ctx = BindContext::new();
        if node.is_defined() {
            self.bind_struct_fields(node, &def, &mut storage, options, &mut ctx);
        }
        target.apply(&storage);
        BindReport::from(ctx)
    }

    /// Per-field entry: absence check first, then node dispatch.
    fn bind_field(
        &self,
        node: &Node,
        field: &FieldDef,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        trace!(field = %field.name, kind = field.type_spec.kind_name(), "binding field");
        if !node.is_defined() {
            // Absent, not a type mismatch. Prior target value is preserved.
            if options.check_required && field.required {
                ctx.add_error("yaml does not contain this required field");
            }
            return;
        }
        self.bind_node(node, &field.type_spec, target, options, ctx);
    }

    /// Kind dispatch for a defined node.
    fn bind_node(
        &self,
        node: &Node,
        spec: &TypeSpec,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        if ctx.depth() > MAX_BIND_DEPTH {
            ctx.add_error("maximum nesting depth exceeded");
            return;
        }
        // Custom handlers win over the codec and over struct recursion, and
        // bypass all generic checks.
        if let Some(type_name) = spec.type_name() {
            if let Some(handler) = options.handlers.get(type_name) {
                trace!(type_name, "dispatching to custom handler");
                handler(node, target, ctx);
                return;
            }
        }
        match spec {
            TypeSpec::Int | TypeSpec::Float | TypeSpec::Bool | TypeSpec::Str | TypeSpec::Text => {
                self.bind_primitive(node, spec, target, options, ctx)
            }
            TypeSpec::Builtin(builtin) => {
                let result = codec::decode_builtin(node, *builtin);
                match result {
                    Ok(value) => *target = value,
                    Err(err) => {
                        if options.check_types {
                            ctx.add_error(err.to_string());
                        }
                    }
                }
            }
            TypeSpec::List(elem) => self.bind_list(node, elem, target, options, ctx),
            TypeSpec::Map(key, value) => self.bind_map(node, key, value, target, options, ctx),
            TypeSpec::Ref(expected_kind) => {
                self.bind_reference(node, expected_kind, target, options, ctx)
            }
            TypeSpec::Custom(id) => {
                // Reaching here means no handler was registered: the calling
                // program, not the document, is wrong.
                panic!("no handler registered for custom type `{id}`");
            }
            TypeSpec::TypeRef(name) => {
                if let Some(def) = self.schema.get_enum(name) {
                    self.bind_enum(node, def, target, options, ctx);
                } else if let Some(def) = self.schema.get_struct(name) {
                    self.bind_struct_fields(node, def, target, options, ctx);
                } else {
                    panic!("schema has no type named `{name}`");
                }
            }
        }
    }

    fn bind_primitive(
        &self,
        node: &Node,
        spec: &TypeSpec,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        if options.check_types {
            if !node.is_scalar() {
                ctx.add_error("value is not a scalar");
                return;
            }
            if !codec::can_decode_primitive(node, spec) {
                let raw = node.scalar().unwrap_or_default();
                ctx.add_error(format!(
                    "cannot convert \"{}\" to type {}",
                    raw,
                    spec.kind_name()
                ));
                return;
            }
        }
        // Lax mode: a failed decode is silently skipped and the prior value
        // stays in place.
        if let Ok(value) = codec::decode_primitive(node, spec) {
            *target = value;
        }
    }

    fn bind_enum(
        &self,
        node: &Node,
        def: &EnumDef,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        let Some(text) = node.scalar() else {
            if options.check_types {
                ctx.add_error("value is not a scalar");
            }
            return;
        };
        match def.members.iter().find(|m| keys_match(m, text)) {
            Some(member) => *target = Value::Enum(member.clone()),
            None => {
                // An unmatched value never blocks the rest of the bind; in
                // lax mode it just leaves the target unchanged.
                if options.check_enums {
                    ctx.add_error(format!(
                        "\"{}\" is not an allowed value for enum {}",
                        text, def.name
                    ));
                }
            }
        }
    }

    fn bind_list(
        &self,
        node: &Node,
        elem: &TypeSpec,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        if options.check_types && !node.is_sequence() {
            ctx.add_error("value is not a sequence");
            return;
        }
        // Map-as-sequence leniency: the map's values, in tree order, populate
        // the list.
        let sources: Vec<&Node> = if node.is_sequence() {
            node.items().iter().collect()
        } else if node.is_map() {
            node.entries().iter().map(|(_, v)| v).collect()
        } else {
            return;
        };
        // Kind confirmed: the old contents go away even if some elements
        // fail, so stale entries never mix with new ones.
        let mut out = Vec::with_capacity(sources.len());
        for (i, child) in sources.into_iter().enumerate() {
            let mut slot = Value::default_for(elem, self.schema);
            ctx.scoped(format!("[{}]", i), |ctx| {
                self.bind_node(child, elem, &mut slot, options, ctx);
            });
            out.push(slot);
        }
        *target = Value::List(out);
    }

    fn bind_map(
        &self,
        node: &Node,
        key_spec: &TypeSpec,
        value_spec: &TypeSpec,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        if !node.is_map() {
            if options.check_types {
                ctx.add_error("value is not a map");
            }
            return;
        }
        let mut out = Vec::with_capacity(node.len());
        for (key_node, value_node) in node.entries() {
            let segment = key_node
                .scalar()
                .map(str::to_string)
                .unwrap_or_else(|| key_node.brief());
            let mut key_slot = Value::default_for(key_spec, self.schema);
            let mut value_slot = Value::default_for(value_spec, self.schema);
            // Key and value are both attempted even if one fails.
            ctx.scoped(segment, |ctx| {
                self.bind_node(key_node, key_spec, &mut key_slot, options, ctx);
                self.bind_node(value_node, value_spec, &mut value_slot, options, ctx);
            });
            out.push((key_slot, value_slot));
        }
        *target = Value::Map(out);
    }

    fn bind_struct_fields(
        &self,
        node: &Node,
        def: &StructDef,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        trace!(name = %def.name, "binding struct");
        if !node.is_map() {
            if options.check_types {
                ctx.add_error("value is not a map");
            }
            return;
        }
        if !matches!(target, Value::Struct(_)) {
            *target = Value::Struct(HashMap::new());
        }
        let Value::Struct(slots) = target else {
            unreachable!()
        };
        for field in &def.fields {
            let value_node = node.get_by(|key| keys_match(key, &field.name));
            let slot = slots
                .entry(field.name.clone())
                .or_insert_with(|| Value::default_for(&field.type_spec, self.schema));
            ctx.scoped(field.name.clone(), |ctx| {
                self.bind_field(value_node, field, slot, options, ctx);
            });
        }
        if options.check_additional_properties {
            for key in node.map_keys() {
                if !def.fields.iter().any(|f| keys_match(&f.name, key)) {
                    ctx.scoped(key.to_string(), |ctx| {
                        ctx.add_error(format!(
                            "additional property does not match a property in {}",
                            def.name
                        ));
                    });
                }
            }
        }
    }

    fn bind_reference(
        &self,
        node: &Node,
        expected_kind: &str,
        target: &mut Value,
        options: &BindOptions,
        ctx: &mut BindContext,
    ) {
        let Some(text) = node.scalar() else {
            if options.check_types {
                ctx.add_error("value is not a scalar");
            }
            return;
        };
        // References fail closed: an absent resolver or failed resolution is
        // an error in lax mode too.
        match self.resolver.and_then(|r| r.resolve(text, expected_kind)) {
            Some(handle) => *target = Value::Reference(handle),
            None => ctx.add_error(format!("Cannot find {}: {}", expected_kind, text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_join_has_leading_dot() {
        let mut ctx = BindContext::new();
        ctx.scoped("outer", |ctx| {
            ctx.scoped("inner", |ctx| ctx.add_error("boom"));
        });
        assert_eq!(ctx.errors(), vec![".outer.inner: boom"]);
    }

    #[test]
    fn scoped_restores_path_on_nested_errors() {
        let mut ctx = BindContext::new();
        ctx.scoped("a", |ctx| {
            ctx.scoped("[0]", |_| {});
            ctx.add_error("after");
        });
        assert_eq!(ctx.errors(), vec![".a: after"]);
        assert_eq!(ctx.error_count(), 1);
        assert!(!ctx.success());
    }
}
