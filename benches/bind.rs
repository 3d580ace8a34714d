//! Benchmark: bind a generated document against a nested schema, lax vs
//! strict, and the strict failure path (every row carries one bad scalar).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use yamlbind::{parse, BindOptions, Binder, Node, ResolvedSchema, TypeSpec, Value};

const SCHEMA: &str = r#"
enum Quality { Low, Medium, High }

struct Row {
    required id: int;
    label: string;
    quality: Quality;
    position: vec3;
    weights: list<float>;
}

struct Table {
    name: string;
    rows: list<Row>;
    limits: map<string, int>;
}
"#;

fn build_document(rows: usize, poison: bool) -> String {
    let mut doc = String::from("name: bench\nlimits: {a: 1, b: 2, c: 3}\nrows:\n");
    for i in 0..rows {
        let id = if poison { "nope".to_string() } else { i.to_string() };
        doc.push_str(&format!(
            "  - {{id: {}, label: row{}, quality: medium, position: [1, 2, 3], weights: [0.1, 0.2, 0.3]}}\n",
            id, i
        ));
    }
    doc
}

fn bench_bind(c: &mut Criterion) {
    let resolved = ResolvedSchema::resolve(parse(SCHEMA).expect("parse")).expect("resolve");
    let binder = Binder::new(&resolved);
    let root = TypeSpec::TypeRef("Table".to_string());

    let clean = Node::from_yaml_str(&build_document(500, false)).expect("yaml");
    let poisoned = Node::from_yaml_str(&build_document(500, true)).expect("yaml");

    c.bench_function("bind_500_rows_lax", |b| {
        let options = BindOptions::lax();
        b.iter(|| {
            let mut target = Value::default_for(&root, &resolved);
            let report = binder.bind_struct(black_box(&clean), "Table", &mut target, &options);
            assert!(report.success);
            target
        })
    });

    c.bench_function("bind_500_rows_strict", |b| {
        let options = BindOptions::strict();
        b.iter(|| {
            let mut target = Value::default_for(&root, &resolved);
            let report = binder.bind_struct(black_box(&clean), "Table", &mut target, &options);
            assert!(report.success);
            target
        })
    });

    c.bench_function("bind_500_rows_strict_all_failing", |b| {
        let options = BindOptions::strict();
        b.iter(|| {
            let mut target = Value::default_for(&root, &resolved);
            let report = binder.bind_struct(black_box(&poisoned), "Table", &mut target, &options);
            assert_eq!(report.errors.len(), 500);
            target
        })
    });
}

criterion_group!(benches, bench_bind);
criterion_main!(benches);
