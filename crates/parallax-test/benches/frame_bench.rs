//! Benchmarks for the per-frame path

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use parallax_core::{FrameDelta, Pose, SectionId};
use parallax_motion::TransformInterpolator;
use parallax_runtime::{NoChrome, SceneFrame, Stage};
use parallax_state::{resolve, JacketSection, PageSetup};
use parallax_time::SteppedClock;

fn bench_interpolator_step(c: &mut Criterion) {
    let mut interp = TransformInterpolator::new(JacketSection::Hero.pose());
    let targets = [JacketSection::Chest.pose(), JacketSection::Back.pose()];
    let delta = FrameDelta::from_secs_f32(1.0 / 60.0);

    c.bench_function("interpolator_step", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = i.wrapping_add(1);
            let target: &Pose = &targets[(i / 120) % 2];
            black_box(*interp.step(black_box(target), delta))
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let page = PageSetup::jacket();

    c.bench_function("pose_resolve", |b| {
        b.iter(|| black_box(resolve(page.table(), black_box("elbow"))))
    });
}

fn bench_stage_frame(c: &mut Criterion) {
    let mut stage = Stage::new(PageSetup::jacket());
    stage.enter(SectionId::new("shoulder"));
    let delta = FrameDelta::from_secs_f32(1.0 / 60.0);

    c.bench_function("stage_frame", |b| {
        b.iter(|| black_box(stage.frame(black_box(delta))))
    });
}

fn bench_stage_run_frame(c: &mut Criterion) {
    let mut stage = Stage::new(PageSetup::jacket());
    stage.enter(SectionId::new("back"));
    let mut clock = SteppedClock::sixty_hz();
    let mut chrome = NoChrome;
    let mut scene = |frame: &SceneFrame| {
        black_box(frame.model);
    };

    c.bench_function("stage_run_frame", |b| {
        b.iter(|| black_box(stage.run_frame(&mut clock, &mut scene, &mut chrome)))
    });
}

criterion_group!(
    benches,
    bench_interpolator_step,
    bench_resolve,
    bench_stage_frame,
    bench_stage_run_frame
);
criterion_main!(benches);
