//! Stack resolution benchmarks.

use anchor_layout::{
    Alignment, CollectingHost, ConstraintRecord, Dimension, Edge, LayoutTree, StackOptions,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_stack(len: usize) -> (LayoutTree, anchor_layout::NodeId) {
    let mut tree = LayoutTree::new();
    let stack = tree
        .create_stack(
            StackOptions::new()
                .with_spacing(8.0)
                .with_alignment(Alignment::StretchX),
        )
        .expect("valid options");
    for i in 0..len {
        let record = match i % 4 {
            0 => ConstraintRecord::new().with_top(Edge::offset(4.0)),
            1 => ConstraintRecord::new().with_width(Dimension::Absolute(120.0)),
            2 => ConstraintRecord::new().with_center_y(3.0).with_left(Edge::percent(10.0)),
            _ => ConstraintRecord::new(),
        };
        let child = tree.create_node_with(record);
        tree.append(stack, child).expect("stack accepts children");
    }
    let last = tree.children(stack)[len - 1];
    tree.update_record(last, |r| r.bottom = Some(Edge::offset(0.0)))
        .expect("child exists");
    (tree, stack)
}

fn resolve_short(c: &mut Criterion) {
    let (tree, stack) = build_stack(6);
    c.bench_function("resolve_short", |b| b.iter(|| tree.resolve(black_box(stack))));
}

fn resolve_long(c: &mut Criterion) {
    let (tree, stack) = build_stack(1_000);
    c.bench_function("resolve_long", |b| b.iter(|| tree.resolve(black_box(stack))));
}

fn flush_after_mutations(c: &mut Criterion) {
    let (mut tree, stack) = build_stack(100);
    let target = tree.children(stack)[50];
    let mut host = CollectingHost::new();
    c.bench_function("flush_after_mutations", |b| {
        b.iter(|| {
            for offset in 0..20 {
                tree.update_record(target, |r| r.top = Some(Edge::offset(offset as f64)))
                    .expect("child exists");
            }
            host.clear();
            tree.flush(black_box(&mut host))
        })
    });
}

criterion_group!(benches, resolve_short, resolve_long, flush_after_mutations);
criterion_main!(benches);
