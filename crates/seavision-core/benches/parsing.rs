use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seavision_core::assessment::AssessmentPolicy;
use seavision_core::catalog;
use seavision_core::parser::{parse_sheet_str, score_sheet, validate_sheet};

fn ishihara_sheet() -> String {
    let mut s = String::from("[sheet]\nquiz = \"ishihara\"\nparticipant = \"Bench\"\n\n[answers]\n");
    for plate in catalog::ishihara().items() {
        s.push_str(&format!("{} = \"{}\"\n", plate.id, plate.normal));
    }
    s
}

fn hue_sheet() -> String {
    let ids: Vec<String> = catalog::fm15()
        .items()
        .iter()
        .rev()
        .map(|s| format!("\"{}\"", s.id))
        .collect();
    format!("[sheet]\nquiz = \"hue\"\nset = \"fm15\"\norder = [{}]\n", ids.join(", "))
}

fn bench_sheet_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet_parsing");

    let ishihara = ishihara_sheet();
    let hue = hue_sheet();

    group.bench_function("ishihara_24", |b| {
        b.iter(|| parse_sheet_str(black_box(&ishihara), black_box("bench.toml".as_ref())))
    });

    group.bench_function("fm15_order", |b| {
        b.iter(|| parse_sheet_str(black_box(&hue), black_box("bench.toml".as_ref())))
    });

    group.finish();
}

fn bench_sheet_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet_scoring");
    let policy = AssessmentPolicy::default();

    let ishihara = parse_sheet_str(&ishihara_sheet(), "bench.toml".as_ref()).unwrap();
    let hue = parse_sheet_str(&hue_sheet(), "bench.toml".as_ref()).unwrap();

    group.bench_function("validate_ishihara", |b| {
        b.iter(|| validate_sheet(black_box(&ishihara)))
    });

    group.bench_function("score_ishihara", |b| {
        b.iter(|| score_sheet(black_box(&ishihara), black_box(&policy)))
    });

    group.bench_function("score_fm15", |b| {
        b.iter(|| score_sheet(black_box(&hue), black_box(&policy)))
    });

    group.finish();
}

criterion_group!(benches, bench_sheet_parsing, bench_sheet_scoring);
criterion_main!(benches);
