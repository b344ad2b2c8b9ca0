use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use klondike_env::core::{GameConfig, GameRng, GameState};
use klondike_env::env::KlondikeEnv;
use klondike_env::nn::{ActionSpace, KlondikeEncoder, StateEncoder};

fn action_stream(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = GameRng::new(seed);
    (0..n)
        .map(|_| rng.gen_range_usize(0..ActionSpace::SIZE))
        .collect()
}

fn bench_step(c: &mut Criterion) {
    let mut g = c.benchmark_group("klondike_step");
    for &n in &[256usize, 4096usize] {
        let actions = action_stream(n, 7);
        g.bench_with_input(BenchmarkId::new("step_index", n), &actions, |b, actions| {
            b.iter(|| {
                let mut env = KlondikeEnv::new(GameConfig::default(), 42).unwrap();
                for &index in actions {
                    black_box(env.step_index(black_box(index)));
                }
            })
        });
    }
    g.finish();
}

fn bench_encode(c: &mut Criterion) {
    let state = GameState::deal(&mut GameRng::new(42));
    let encoder = KlondikeEncoder::default();
    c.bench_function("encode_state", |b| b.iter(|| encoder.encode(black_box(&state))));
}

criterion_group!(benches, bench_step, bench_encode);
criterion_main!(benches);
