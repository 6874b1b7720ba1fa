use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sacred_core::{DisplayList, Engine, ParamId, ParameterSet, RadialBurst, WavePattern};

fn bench_radial_render_24_axis(c: &mut Criterion) {
    let mut params = ParameterSet::default();
    params.set(ParamId::AxisCount, 24.0);
    let burst = RadialBurst::from_params(&params);
    let mut list = DisplayList::new(1920.0, 980.0);
    c.bench_function("radial_render_24_axis", |b| {
        b.iter(|| {
            list.reset();
            burst.render(black_box(750.0), &mut list);
        });
    });
}

fn bench_wave_segments_fine_steps(c: &mut Criterion) {
    let mut params = ParameterSet::default();
    params.set(ParamId::LineOuterStep, 1.0);
    params.set(ParamId::LineInnerStep, 1.0);
    let wave = WavePattern::from_params(&params);
    c.bench_function("wave_segments_1deg", |b| {
        b.iter(|| black_box(wave.segments()));
    });
}

fn bench_engine_tick_animated(c: &mut Criterion) {
    let mut engine = Engine::for_window(1920.0, true, 0);
    engine.set_param(ParamId::SpawnFrequency, 10.0);
    engine.set_param(ParamId::AnimationSpeed, 1.0);
    let mut list = DisplayList::new(1920.0, 980.0);
    // Warm up to a steady population of bursts.
    let mut now = 0u64;
    for _ in 0..2000 {
        now += 16;
        engine.tick(now, &mut list);
    }
    c.bench_function("engine_tick_animated", |b| {
        b.iter(|| {
            now += 16;
            black_box(engine.tick(now, &mut list));
        });
    });
}

fn bench_randomize(c: &mut Criterion) {
    let mut engine = Engine::for_window(1920.0, false, 0);
    let mut rng = StdRng::seed_from_u64(3);
    c.bench_function("randomize", |b| {
        b.iter(|| engine.randomize(&mut rng));
    });
}

criterion_group!(
    benches,
    bench_radial_render_24_axis,
    bench_wave_segments_fine_steps,
    bench_engine_tick_animated,
    bench_randomize,
);
criterion_main!(benches);
