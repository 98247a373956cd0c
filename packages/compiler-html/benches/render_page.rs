use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lander_compiler_html::{compile_page, CompileOptions};
use lander_parts::{template_for, Part, PartId, PartType, Theme};

fn full_page() -> Vec<Part> {
    PartType::ALL
        .into_iter()
        .enumerate()
        .map(|(i, part_type)| Part::new(PartId::new(i.to_string()), part_type, template_for(part_type)))
        .collect()
}

fn render_preview(c: &mut Criterion) {
    let theme = Theme::default();
    let parts = full_page();
    let options = CompileOptions::preview();

    c.bench_function("render_full_page_preview", |b| {
        b.iter(|| compile_page(black_box(&theme), black_box(&parts), &options))
    });
}

fn render_packaged(c: &mut Criterion) {
    let theme = Theme::default();
    let parts = full_page();
    let options = CompileOptions::packaged().with_pretty(false);

    c.bench_function("render_full_page_packaged", |b| {
        b.iter(|| compile_page(black_box(&theme), black_box(&parts), &options))
    });
}

criterion_group!(benches, render_preview, render_packaged);
criterion_main!(benches);
