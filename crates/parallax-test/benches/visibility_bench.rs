//! Benchmarks for layout passes

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use parallax_state::PageSetup;
use parallax_visibility::{visible_fraction, PageLayout, Rect, VisibilityBank, Viewport};

fn bench_visible_fraction(c: &mut Criterion) {
    let viewport = Viewport::new(1280.0, 800.0).scrolled_to(400.0);
    let section = Rect::band(800.0, 1600.0, 1280.0);

    c.bench_function("visible_fraction", |b| {
        b.iter(|| black_box(visible_fraction(black_box(&section), &viewport)))
    });
}

fn bench_layout_pass(c: &mut Criterion) {
    let page = PageSetup::jacket();
    let mut bank = VisibilityBank::new(page.sections());
    let ids: Vec<_> = page.sections().iter().map(|d| d.id.clone()).collect();
    let layout = PageLayout::stacked(&ids, 800.0, 800.0, 1280.0);
    let mut viewport = Viewport::new(1280.0, 800.0);

    c.bench_function("layout_pass", |b| {
        let mut y = 0.0f32;
        b.iter(|| {
            y = (y + 13.0) % 4000.0;
            viewport.scroll_to(y);
            black_box(bank.observe(&viewport, &layout))
        })
    });
}

criterion_group!(benches, bench_visible_fraction, bench_layout_pass);
criterion_main!(benches);
