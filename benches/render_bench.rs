use criterion::{black_box, criterion_group, criterion_main, Criterion};

const PLAN: &str = include_str!("../tests/goldens/pages/boost_plan.md");

fn bench_render(c: &mut Criterion) {
    let long = PLAN.repeat(50);

    c.bench_function("render_boost_plan", |b| {
        b.iter(|| creativefuse::render(black_box(PLAN)))
    });

    c.bench_function("render_long_response", |b| {
        b.iter(|| creativefuse::render(black_box(long.as_str())))
    });

    c.bench_function("parse_inline_heavy", |b| {
        let line = "**a** *b* `c` ".repeat(200);
        b.iter(|| creativefuse::parse(black_box(line.as_str())))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
