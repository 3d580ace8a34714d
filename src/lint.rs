//! Linter for resolved schemas: catches definition defects before binding.
//!
//! ## Rules
//!
//! - **Unknown type reference**: a field names an enum/struct the schema does
//!   not define.
//! - **Duplicate field**: two fields of one struct collide under the binder's
//!   case-insensitive key comparison.
//! - **Duplicate enum member**: two members collide the same way.
//! - **Value cycle**: a struct contains itself by value through nested struct
//!   fields (lists and maps break the chain).
//! - **Custom type** (warning): the field only binds if the caller registers
//!   a handler.
//!
//! Run via the `yamlbind` binary with `--lint`, or call [`lint_schema`].

use crate::ast::{ResolvedSchema, StructDef, TypeSpec};
use crate::bind::keys_match;

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies which rule produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    UnknownTypeRef,
    DuplicateField,
    DuplicateEnumMember,
    ValueCycle,
    CustomNeedsHandler,
}

/// A single lint message.
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
}

/// Run all lint rules. Returns messages in schema declaration order.
pub fn lint_schema(schema: &ResolvedSchema) -> Vec<LintMessage> {
    let mut out = Vec::new();

    for e in &schema.schema.enums {
        for (i, member) in e.members.iter().enumerate() {
            if e.members[..i].iter().any(|m| keys_match(m, member)) {
                out.push(LintMessage {
                    rule: LintRule::DuplicateEnumMember,
                    severity: Severity::Error,
                    message: format!(
                        "enum {}: member `{}` collides case-insensitively with an earlier member",
                        e.name, member
                    ),
                });
            }
        }
    }

    for s in &schema.schema.structs {
        for (i, field) in s.fields.iter().enumerate() {
            if s.fields[..i].iter().any(|f| keys_match(&f.name, &field.name)) {
                out.push(LintMessage {
                    rule: LintRule::DuplicateField,
                    severity: Severity::Error,
                    message: format!(
                        "struct {}: field `{}` collides case-insensitively with an earlier field",
                        s.name, field.name
                    ),
                });
            }
            check_spec(schema, s, &field.name, &field.type_spec, &mut out);
        }
        if let Some(cycle) = find_value_cycle(schema, s) {
            out.push(LintMessage {
                rule: LintRule::ValueCycle,
                severity: Severity::Error,
                message: format!("struct {}: contains itself by value via `{}`", s.name, cycle),
            });
        }
    }

    out
}

fn check_spec(
    schema: &ResolvedSchema,
    owner: &StructDef,
    field: &str,
    spec: &TypeSpec,
    out: &mut Vec<LintMessage>,
) {
    match spec {
        TypeSpec::TypeRef(name) => {
            if schema.get_enum(name).is_none() && schema.get_struct(name).is_none() {
                out.push(LintMessage {
                    rule: LintRule::UnknownTypeRef,
                    severity: Severity::Error,
                    message: format!(
                        "struct {}: field `{}` references unknown type `{}`",
                        owner.name, field, name
                    ),
                });
            }
        }
        TypeSpec::Custom(id) => {
            out.push(LintMessage {
                rule: LintRule::CustomNeedsHandler,
                severity: Severity::Warning,
                message: format!(
                    "struct {}: field `{}` is custom<{}> and only binds with a registered handler",
                    owner.name, field, id
                ),
            });
        }
        TypeSpec::List(elem) => check_spec(schema, owner, field, elem, out),
        TypeSpec::Map(key, value) => {
            check_spec(schema, owner, field, key, out);
            check_spec(schema, owner, field, value, out);
        }
        _ => {}
    }
}

/// Depth-first search over direct (by-value) struct fields only.
fn find_value_cycle(schema: &ResolvedSchema, start: &StructDef) -> Option<String> {
    fn visit(
        schema: &ResolvedSchema,
        target: &str,
        current: &StructDef,
        trail: &mut Vec<String>,
        seen: &mut Vec<String>,
    ) -> Option<String> {
        for field in &current.fields {
            if let TypeSpec::TypeRef(name) = &field.type_spec {
                let Some(next) = schema.get_struct(name) else {
                    continue;
                };
                trail.push(field.name.clone());
                if next.name == target {
                    let path = trail.join(".");
                    trail.pop();
                    return Some(path);
                }
                if !seen.contains(&next.name) {
                    seen.push(next.name.clone());
                    if let Some(path) = visit(schema, target, next, trail, seen) {
                        trail.pop();
                        return Some(path);
                    }
                }
                trail.pop();
            }
        }
        None
    }
    let mut trail = Vec::new();
    let mut seen = vec![start.name.clone()];
    visit(schema, &start.name, start, &mut trail, &mut seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn lint(src: &str) -> Vec<LintMessage> {
        let schema = ResolvedSchema::resolve(parse(src).expect("parse")).expect("resolve");
        lint_schema(&schema)
    }

    #[test]
    fn unknown_type_ref_is_error() {
        let msgs = lint("struct S { x: Missing; }");
        assert!(msgs.iter().any(|m| m.rule == LintRule::UnknownTypeRef));
    }

    #[test]
    fn duplicate_fields_collide_case_insensitively() {
        let msgs = lint("struct S { value: int; Value: string; }");
        let dups: Vec<_> = msgs
            .iter()
            .filter(|m| m.rule == LintRule::DuplicateField)
            .collect();
        assert_eq!(dups.len(), 1, "{:?}", msgs);
    }

    #[test]
    fn value_cycle_detected_through_intermediate() {
        let src = "struct A { b: B; }\nstruct B { a: A; }";
        let msgs = lint(src);
        assert!(msgs.iter().any(|m| m.rule == LintRule::ValueCycle));
    }

    #[test]
    fn list_of_self_is_not_a_value_cycle() {
        let msgs = lint("struct Tree { children: list<Tree>; }");
        assert!(!msgs.iter().any(|m| m.rule == LintRule::ValueCycle));
    }

    #[test]
    fn clean_schema_passes() {
        let src = "enum Q { Low, High }\nstruct S { q: Q; n: int; }";
        let msgs = lint(src);
        assert!(
            msgs.iter().all(|m| m.severity != Severity::Error),
            "{:?}",
            msgs
        );
    }
}
