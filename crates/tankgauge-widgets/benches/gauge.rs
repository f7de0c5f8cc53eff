//! Benchmarks for the gauge frame loop and geometry.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tankgauge_core::{Point, RecordingScene, Size};
use tankgauge_widgets::{
    wave, GaugeConfig, Layout, TankGauge, TankVariant, Threshold,
};

fn thresholds(count: usize) -> Vec<Threshold> {
    (0..count)
        .map(|i| Threshold::new(format!("t{i}"), (i as f64 + 0.5) * 100.0 / count as f64))
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let config = GaugeConfig::new(TankVariant::Round)
        .with_value(55.0)
        .with_thresholds(thresholds(8));
    let mut gauge = TankGauge::new(config, Size::new(200.0, 400.0), RecordingScene::new())
        .expect("valid gauge");
    let mut now = 0.0;

    c.bench_function("gauge_tick", |b| {
        b.iter(|| {
            now += 16.0;
            gauge.tick(black_box(now)).expect("live gauge");
        })
    });
}

fn bench_hover(c: &mut Criterion) {
    let config = GaugeConfig::default().with_thresholds(thresholds(32));
    let mut gauge = TankGauge::new(config, Size::new(120.0, 400.0), RecordingScene::new())
        .expect("valid gauge");
    let mut y = 0.0f32;

    c.bench_function("gauge_hover_32_thresholds", |b| {
        b.iter(|| {
            y = (y + 7.0) % 400.0;
            gauge
                .handle_pointer_move(black_box(Point::new(60.0, y)))
                .expect("live gauge")
        })
    });
}

fn bench_layout(c: &mut Criterion) {
    let config = GaugeConfig::new(TankVariant::Round);

    c.bench_function("layout_compute_round", |b| {
        b.iter(|| Layout::compute(black_box(&config), black_box(Size::new(200.0, 400.0)), 18.0))
    });
}

fn bench_wave_path(c: &mut Criterion) {
    c.bench_function("wave_path_wide_container", |b| {
        b.iter(|| wave::wave_path(black_box(40.0), 3.0, Size::new(1920.0, 400.0), 2.0))
    });
}

criterion_group!(benches, bench_tick, bench_hover, bench_layout, bench_wave_path);
criterion_main!(benches);
