use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fishbone_renderer::config::LayoutConfig;
use fishbone_renderer::ingest::{Delimiter, parse_table};
use fishbone_renderer::ir::FishboneTree;
use fishbone_renderer::layout::compute_layout;
use fishbone_renderer::render::render_svg;
use fishbone_renderer::theme::Theme;
use std::hint::black_box;

fn dense_table_source(classifications: usize, causes_per_category: usize) -> String {
    let mut out = String::from("Classification,Category,Cause,Sub-cause\n");
    for c in 0..classifications {
        for cat in 0..3 {
            for k in 0..causes_per_category {
                out.push_str(&format!(
                    "Class {c},Category {c}-{cat},Cause {c}-{cat}-{k},Detail {k}\n"
                ));
            }
        }
    }
    out
}

fn synthetic_tree(classifications: usize, causes_per_category: usize) -> FishboneTree {
    parse_table(
        &dense_table_source(classifications, causes_per_category),
        Delimiter::Comma,
    )
    .expect("synthetic table is well-formed")
}

fn bench_layout(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("compute_layout");
    for (classifications, causes) in [(4, 3), (6, 8), (10, 20)] {
        let tree = synthetic_tree(classifications, causes);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{classifications}x{causes}")),
            &tree,
            |b, tree| {
                b.iter(|| compute_layout(black_box(tree), "Problem", &theme, &config));
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let source = dense_table_source(6, 8);
    c.bench_function("ingest_layout_render", |b| {
        b.iter(|| {
            let tree = parse_table(black_box(&source), Delimiter::Comma).unwrap();
            let layout = compute_layout(&tree, "Problem", &theme, &config);
            render_svg(&layout, &theme)
        });
    });
}

criterion_group!(benches, bench_layout, bench_end_to_end);
criterion_main!(benches);
