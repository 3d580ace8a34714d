//! Parse schema DSL source into AST using PEST.

use crate::ast::*;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SchemaParser;

/// Parse schema source into AST.
pub fn parse(source: &str) -> Result<Schema, String> {
    let pairs = SchemaParser::parse(Rule::schema, source)
        .map_err(|e| format!("Parse error: {}", e))?;
    let pair = pairs.into_iter().next().ok_or("Empty parse")?;
    build_schema(pair)
}

fn build_schema(pair: pest::iterators::Pair<Rule>) -> Result<Schema, String> {
    let mut enums = Vec::new();
    let mut structs = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::enum_section => enums.push(build_enum(inner)?),
            Rule::struct_section => structs.push(build_struct(inner)?),
            _ => {}
        }
    }

    Ok(Schema { enums, structs })
}

fn build_enum(pair: pest::iterators::Pair<Rule>) -> Result<EnumDef, String> {
    let mut name = String::new();
    let mut members = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::enum_member => members.push(inner.as_str().trim().to_string()),
            _ => {}
        }
    }
    if name.is_empty() {
        return Err("enum section: missing name".to_string());
    }
    if members.is_empty() {
        return Err(format!("enum {}: must have at least one member", name));
    }
    Ok(EnumDef { name, members })
}

fn build_struct(pair: pest::iterators::Pair<Rule>) -> Result<StructDef, String> {
    let mut name = String::new();
    let mut fields = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::struct_field => fields.push(build_field(inner)?),
            _ => {}
        }
    }
    if name.is_empty() {
        return Err("struct section: missing name".to_string());
    }
    Ok(StructDef { name, fields })
}

fn build_field(pair: pest::iterators::Pair<Rule>) -> Result<FieldDef, String> {
    let mut name = String::new();
    let mut type_spec = None;
    let mut required = false;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::required_flag => required = true,
            Rule::ident => name = inner.as_str().to_string(),
            Rule::type_spec => type_spec = Some(build_type_spec(inner)?),
            _ => {}
        }
    }
    Ok(FieldDef {
        name,
        type_spec: type_spec.ok_or("Missing type in field")?,
        required,
    })
}

fn build_type_spec(pair: pest::iterators::Pair<Rule>) -> Result<TypeSpec, String> {
    let inner = pair.into_inner().next().ok_or("Empty type_spec")?;
    match inner.as_rule() {
        Rule::base_type => match inner.as_str().trim() {
            "int" => Ok(TypeSpec::Int),
            "float" => Ok(TypeSpec::Float),
            "bool" => Ok(TypeSpec::Bool),
            "string" => Ok(TypeSpec::Str),
            "text" => Ok(TypeSpec::Text),
            other => Err(format!("Unknown base type: {}", other)),
        },
        Rule::builtin_type => {
            let kw = inner.as_str().trim();
            BuiltinType::from_keyword(kw)
                .map(TypeSpec::Builtin)
                .ok_or_else(|| format!("Unknown builtin type: {}", kw))
        }
        Rule::list_type => {
            let elem = inner.into_inner().next().ok_or("list<T>")?;
            Ok(TypeSpec::List(Box::new(build_type_spec(elem)?)))
        }
        Rule::map_type => {
            let mut it = inner.into_inner();
            let key = it.next().ok_or("map<K, V>: missing key type")?;
            let value = it.next().ok_or("map<K, V>: missing value type")?;
            Ok(TypeSpec::Map(
                Box::new(build_type_spec(key)?),
                Box::new(build_type_spec(value)?),
            ))
        }
        Rule::ref_type => {
            let kind = inner.into_inner().next().ok_or("ref<Kind>")?;
            Ok(TypeSpec::Ref(kind.as_str().to_string()))
        }
        Rule::custom_type => {
            let id = inner.into_inner().next().ok_or("custom<Handler>")?;
            Ok(TypeSpec::Custom(id.as_str().to_string()))
        }
        Rule::type_ref => Ok(TypeSpec::TypeRef(inner.as_str().to_string())),
        _ => Err(format!("Unhandled type rule: {:?}", inner.as_rule())),
    }
}
