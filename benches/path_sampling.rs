use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use scroll_path_camera::path::format::parse_path;
use scroll_path_camera::{
    CameraDriver, CameraPose, LookAtTarget, Path, PathSampler, ScrollProgress, ScrollRig,
};
use std::f32::consts::TAU;

/// Helix-shaped path with `count` samples
fn helix(count: usize) -> Path {
    Path::from_positions((0..count).map(|i| {
        let t = i as f32 / count as f32;
        Vec3::new((t * TAU * 3.0).cos() * 10.0, t * 5.0, (t * TAU * 3.0).sin() * 10.0)
    }))
}

fn driver() -> CameraDriver {
    CameraDriver::new(
        CameraPose::at(Vec3::new(0.0, 2.0, 15.0)),
        LookAtTarget::fixed(Vec3::new(0.0, -2.21, -5.0)),
    )
}

/// Benchmark: offset -> index for growing path sizes
fn bench_resolve_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_index");

    for count in [2, 1_000, 100_000].iter() {
        let path = helix(*count);
        group.bench_with_input(BenchmarkId::new("points", count), count, |b, _| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..=100 {
                    let offset = i as f32 / 100.0;
                    sum += PathSampler::resolve_index(black_box(&path), black_box(offset))
                        .unwrap_or(0);
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

/// Benchmark: one driver step (sample, ease, re-aim)
fn bench_driver_update(c: &mut Criterion) {
    let path = helix(1_000);
    let mut driver = driver();
    let mut frame = 0u32;

    c.bench_function("driver_update", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let offset = (frame % 600) as f32 / 600.0;
            black_box(driver.update(Some(black_box(&path)), offset, 1.0 / 60.0))
        })
    });
}

/// Benchmark: a full rig frame with damped scrolling
fn bench_rig_frame(c: &mut Criterion) {
    let scroll = ScrollProgress::new(9.0, 1080.0).with_damping(0.1);
    let mut rig = ScrollRig::with_path(helix(1_000), scroll, driver());
    let mut frame = 0u32;

    c.bench_function("rig_frame", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            rig.scroll_mut().scroll_by(if frame % 1200 < 600 { 12.0 } else { -12.0 });
            black_box(rig.frame(1.0 / 60.0))
        })
    });
}

/// Benchmark: parsing curve documents of growing size
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_path");

    for count in [100, 10_000].iter() {
        let records: Vec<String> = helix(*count)
            .positions()
            .map(|p| format!("{{\"x\":{},\"y\":{},\"z\":{}}}", p.x, p.y, p.z))
            .collect();
        let json = format!("[{}]", records.join(","));

        group.bench_with_input(BenchmarkId::new("points", count), count, |b, _| {
            b.iter(|| black_box(parse_path("bench.json", black_box(json.as_bytes()))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_index,
    bench_driver_update,
    bench_rig_frame,
    bench_parse
);
criterion_main!(benches);
