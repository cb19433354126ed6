//! Benchmarks for insertion-point resolution
//!
//! Run with: cargo bench -p blinc_sortable

use blinc_core::{Point, Size};
use blinc_layout::{Document, ElementId, LayoutStyle};
use blinc_sortable::geometry::{find_target, is_flow_horizontal, resolve_insertion_target};
use blinc_sortable::SortableHost;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn column(count: usize) -> (Document, ElementId) {
    let mut doc = Document::new(Size::new(800.0, 100_000.0)).unwrap();
    let root = doc.root();
    let list = doc.create(root, LayoutStyle::flex_column()).unwrap();
    for _ in 0..count {
        doc.create(list, LayoutStyle::fixed_size(200.0, 20.0)).unwrap();
    }
    (doc, list)
}

fn grid(count: usize) -> (Document, ElementId) {
    let mut doc = Document::new(Size::new(800.0, 100_000.0)).unwrap();
    let root = doc.root();
    let list = doc.create(root, LayoutStyle::flex_row_wrap(800.0)).unwrap();
    for _ in 0..count {
        doc.create(list, LayoutStyle::fixed_size(100.0, 60.0)).unwrap();
    }
    (doc, list)
}

fn bench_flow_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable/flow");

    for count in [10, 100, 500] {
        let (doc, list) = column(count);
        let items = SortableHost::children(&doc, list);
        group.bench_with_input(BenchmarkId::new("column", count), &items, |b, items| {
            b.iter(|| black_box(is_flow_horizontal(&doc, items)))
        });

        let (doc, list) = grid(count);
        let items = SortableHost::children(&doc, list);
        group.bench_with_input(BenchmarkId::new("grid", count), &items, |b, items| {
            b.iter(|| black_box(is_flow_horizontal(&doc, items)))
        });
    }

    group.finish();
}

fn bench_insertion_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable/insertion");

    for count in [10, 100, 500] {
        let (mut doc, list) = column(count);
        let items = SortableHost::children(&doc, list);
        let placeholder = items[0];
        let point = Point::new(10.0, count as f32 * 20.0 - 5.0);

        group.bench_function(BenchmarkId::new("column", count), |b| {
            b.iter(|| {
                let target = find_target(&doc, &items, point);
                black_box(resolve_insertion_target(
                    &mut doc,
                    list,
                    target,
                    placeholder,
                    point,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flow_detection, bench_insertion_target);
criterion_main!(benches);
