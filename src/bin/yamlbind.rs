//! Bind a YAML document against a schema struct and report validation errors.
//!
//! Usage:
//!   yamlbind [OPTIONS] <schema.dsl> <StructName> [doc.yaml]
//!   yamlbind schema.dsl Config < doc.yaml
//!
//! Reads the document from the given file, or stdin when no file is given.
//! Exit code 1 if binding (or the schema lint) produced errors.
//!
//! Options:
//!   --strict, -s  All four validation switches on (default: lax)
//!   --lint, -l    Only lint the schema, do not bind
//!   --emit, -e    Re-emit the bound value as YAML on success

use std::io::Read;

use anyhow::{anyhow, Context};
use yamlbind::lint::{lint_schema, LintMessage, Severity};
use yamlbind::{
    encode_struct, parse, to_yaml_string, BindOptions, Binder, Node, ResolvedSchema, TypeSpec,
    Value,
};

fn print_lint(path: &str, m: &LintMessage) {
    let severity = match m.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    eprintln!("{}: {}: {} [{:?}]", path, severity, m.message, m.rule);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let strict = if let Some(pos) = args.iter().position(|a| a == "--strict" || a == "-s") {
        args.remove(pos);
        true
    } else {
        false
    };
    let lint_only = if let Some(pos) = args.iter().position(|a| a == "--lint" || a == "-l") {
        args.remove(pos);
        true
    } else {
        false
    };
    let emit = if let Some(pos) = args.iter().position(|a| a == "--emit" || a == "-e") {
        args.remove(pos);
        true
    } else {
        false
    };

    if args.len() < 2 && !(lint_only && args.len() == 1) {
        eprintln!("usage: yamlbind [--strict] [--lint] [--emit] <schema.dsl> <StructName> [doc.yaml]");
        std::process::exit(2);
    }

    let schema_path = &args[0];
    let source = std::fs::read_to_string(schema_path)
        .with_context(|| format!("reading schema {}", schema_path))?;
    let schema = parse(&source).map_err(|e| anyhow!("{}: {}", schema_path, e))?;
    let resolved = ResolvedSchema::resolve(schema).map_err(|e| anyhow!("{}: {}", schema_path, e))?;

    let messages = lint_schema(&resolved);
    for m in &messages {
        print_lint(schema_path, m);
    }
    let lint_failed = messages.iter().any(|m| m.severity == Severity::Error);
    if lint_only {
        std::process::exit(if lint_failed { 1 } else { 0 });
    }
    if lint_failed {
        std::process::exit(1);
    }

    let struct_name = &args[1];
    let doc = match args.get(2) {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading document {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let node = Node::from_yaml_str(&doc).map_err(|e| anyhow!(e))?;

    if resolved.get_struct(struct_name).is_none() {
        return Err(anyhow!("{}: no struct named {}", schema_path, struct_name));
    }
    let options = if strict {
        BindOptions::strict()
    } else {
        BindOptions::lax()
    };
    let root_spec = TypeSpec::TypeRef(struct_name.clone());
    let mut target = Value::default_for(&root_spec, &resolved);
    let binder = Binder::new(&resolved);
    let report = binder.bind_struct(&node, struct_name, &mut target, &options);

    for error in &report.errors {
        println!("{}", error);
    }
    if report.success && emit {
        let def = resolved
            .get_struct(struct_name)
            .ok_or_else(|| anyhow!("no struct named {}", struct_name))?;
        let encoded = encode_struct(&resolved, def, &target);
        print!("{}", to_yaml_string(&encoded).map_err(|e| anyhow!(e))?);
    }
    std::process::exit(if report.success { 0 } else { 1 });
}
