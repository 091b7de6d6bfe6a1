//! Benchmark: parse only, and full conversion to each target, over the order
//! fixture and a synthetic file with many records.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use structconv::{convert, parse, Config, Target};

const ORDER: &str = include_str!("../tests/fixtures/order.go");

/// `n` records, each referencing the previous one and carrying a nested struct.
fn synthetic_source(n: usize) -> String {
    let mut src = String::from("package bench\n\n// #c.include <stdint.h>\n\n");
    for i in 0..n {
        src.push_str(&format!("type Record{} struct {{\n", i));
        src.push_str("\tID     uint64 `json:\"id\"`\n");
        src.push_str("\tName   string `json:\"name\" ctype:\"char[64]\"`\n");
        src.push_str("\tTags   []string `json:\"tags,omitempty\"`\n");
        src.push_str("\tWhen   time.Time\n");
        if i > 0 {
            src.push_str(&format!("\tPrev   *Record{}\n", i - 1));
        }
        src.push_str("\tDetail struct {\n\t\tScore float64\n\t}\n");
        src.push_str("}\n\n");
    }
    src
}

fn bench_convert(c: &mut Criterion) {
    let synthetic = synthetic_source(500);
    let config = Config::new().with_prefix("B");
    eprintln!("convert: synthetic source {} bytes", synthetic.len());

    c.bench_function("parse_order_fixture", |b| {
        b.iter(|| black_box(parse(black_box(ORDER)).expect("parse")));
    });

    c.bench_function("convert_order_fixture_c", |b| {
        b.iter(|| black_box(convert(&[black_box(ORDER)], Target::C, &config).expect("convert")));
    });

    c.bench_function("convert_order_fixture_typescript", |b| {
        b.iter(|| black_box(convert(&[black_box(ORDER)], Target::TypeScript, &config).expect("convert")));
    });

    c.bench_function("parse_synthetic_500", |b| {
        b.iter(|| black_box(parse(black_box(&synthetic)).expect("parse")));
    });

    c.bench_function("convert_synthetic_500_c", |b| {
        b.iter(|| black_box(convert(&[black_box(synthetic.as_str())], Target::C, &config).expect("convert")));
    });

    c.bench_function("convert_synthetic_500_typescript", |b| {
        b.iter(|| {
            black_box(convert(&[black_box(synthetic.as_str())], Target::TypeScript, &config).expect("convert"))
        });
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
