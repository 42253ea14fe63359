//! Benchmarks for rep counting and the session pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exercise_form::{
    config::Config,
    geometry::{angle_at, Point2D},
    landmarks::{Landmark, LandmarkFrame},
    rep_counter::{count_reps, RepCounter, RepCounterConfig},
    session::SessionAnalyzer,
};

/// Elbow angles with jitter around both thresholds
fn jittery_curls(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.2;
            100.0 + 75.0 * t.cos() + 10.0 * (rand::random::<f64>() - 0.5)
        })
        .collect()
}

fn arm_frame(angle: f64) -> LandmarkFrame {
    let radians = angle.to_radians();
    let wrist = |x: f64| Point2D::new(x + 80.0 * radians.sin(), 200.0 - 80.0 * radians.cos());

    LandmarkFrame::new()
        .with(Landmark::LeftShoulder, Point2D::new(100.0, 100.0))
        .with(Landmark::LeftElbow, Point2D::new(100.0, 200.0))
        .with(Landmark::LeftWrist, wrist(100.0))
        .with(Landmark::RightShoulder, Point2D::new(300.0, 100.0))
        .with(Landmark::RightElbow, Point2D::new(300.0, 200.0))
        .with(Landmark::RightWrist, wrist(300.0))
}

fn benchmark_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("rep_counter");

    let config = RepCounterConfig::default();
    for len in [100, 1_000, 10_000] {
        let series = jittery_curls(len);

        group.bench_with_input(BenchmarkId::new("count_reps", len), &series, |b, data| {
            b.iter(|| black_box(count_reps(black_box(data), &config)));
        });
    }

    let mut counter = RepCounter::new(config);
    group.bench_function("single_update", |b| {
        b.iter(|| black_box(counter.update(black_box(0), black_box(Some(120.0)))));
    });

    group.finish();
}

fn benchmark_geometry(c: &mut Criterion) {
    let a = Point2D::new(100.0, 100.0);
    let b = Point2D::new(100.0, 200.0);
    let wrist = Point2D::new(160.0, 150.0);

    c.bench_function("angle_at", |bench| {
        bench.iter(|| black_box(angle_at(black_box(a), black_box(b), black_box(wrist))));
    });
}

fn benchmark_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    let frames: Vec<LandmarkFrame> = jittery_curls(300).into_iter().map(arm_frame).collect();
    let config = Config::default();

    group.bench_function("process_and_finish_300", |b| {
        b.iter(|| {
            let mut session = SessionAnalyzer::from_config(&config).expect("default config is valid");
            for frame in &frames {
                black_box(session.process_frame(Some(frame)));
            }
            black_box(session.finish());
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_counter, benchmark_geometry, benchmark_session);
criterion_main!(benches);
