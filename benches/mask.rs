use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldmask::{parse, FieldPath, Mask};

/// A mask with `width` top-level fields, each with a few nested alternatives.
fn wide_mask(width: usize) -> Mask {
    let mut mask = Mask::new();
    for i in 0..width {
        for leaf in ["name", "labels", "size"] {
            let path = FieldPath::from([format!("field_{}", i), "spec".into(), leaf.into()]);
            mask.add_path(&path);
        }
    }
    mask.set_any(FieldPath::from(["metadata"]).to_mask());
    mask
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let source = "spec.(name,labels.*,disks.*.(size,type)),metadata.\"display name\"";

    c.bench_function("parse_simple", |b| b.iter(|| parse(black_box(source))));
}

fn benchmark_parse_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_wide");

    for width in [10, 50, 100, 500].iter() {
        let source = wide_mask(*width).marshal();

        group.bench_with_input(BenchmarkId::from_parameter(width), &source, |b, source| {
            b.iter(|| parse(black_box(source)))
        });
    }
    group.finish();
}

fn benchmark_marshal(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal");

    for width in [10, 50, 100, 500].iter() {
        let mask = wide_mask(*width);

        group.bench_with_input(BenchmarkId::from_parameter(width), &mask, |b, mask| {
            b.iter(|| black_box(mask).marshal())
        });
    }
    group.finish();
}

fn benchmark_union(c: &mut Criterion) {
    let left = wide_mask(100);
    let right = parse("field_1.spec.(zone,cpu),field_200.spec,*.(status,metadata.x)").unwrap();

    c.bench_function("union", |b| {
        b.iter(|| black_box(&left).union(black_box(&right)))
    });
}

fn benchmark_reset_intersection(c: &mut Criterion) {
    let left = wide_mask(100);
    let right = parse("*.spec.(name,size),field_3.*").unwrap();

    c.bench_function("intersect_reset_mask", |b| {
        b.iter(|| black_box(&left).intersect_reset_mask(black_box(&right)))
    });
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_parse_wide,
    benchmark_marshal,
    benchmark_union,
    benchmark_reset_intersection
);
criterion_main!(benches);
