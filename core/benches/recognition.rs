use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geometry::{simplify, Point};
use network::{Hyperparameters, Network};
use patterns::PatternDefinition;
use rand::rngs::StdRng;
use rand::SeedableRng;
use recognition::{Recognizer, RecognizerConfig};

const SAMPLING_FACTOR: usize = 20;
const STROKE_LENGTHS: &[usize] = &[8, 64, 512];

fn wave(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            Point::new(t * 400.0, (t * 12.0).sin() * 60.0)
        })
        .collect()
}

fn templates() -> Vec<PatternDefinition> {
    let line = |dx: f32, dy: f32| -> Vec<Point> {
        (0..11)
            .map(|i| Point::new(i as f32 * dx, i as f32 * dy))
            .collect()
    };
    vec![
        PatternDefinition::normalized("horizontal", line(10.0, 0.0), SAMPLING_FACTOR).unwrap(),
        PatternDefinition::normalized("vertical", line(0.0, 10.0), SAMPLING_FACTOR).unwrap(),
        PatternDefinition::normalized("diagonal", line(10.0, 10.0), SAMPLING_FACTOR).unwrap(),
        PatternDefinition::normalized("wave", wave(40), SAMPLING_FACTOR).unwrap(),
    ]
}

fn trained(patterns: &[PatternDefinition]) -> Network {
    let mut rng = StdRng::seed_from_u64(1);
    Network::for_patterns(patterns, SAMPLING_FACTOR, Hyperparameters::default(), &mut rng)
        .unwrap()
        .train(patterns, 200, Some(1))
        .unwrap()
}

fn bench_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");

    for &n in STROKE_LENGTHS {
        let stroke = wave(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stroke, |b, stroke| {
            b.iter(|| black_box(simplify(stroke, SAMPLING_FACTOR)))
        });
    }

    group.finish();
}

fn bench_recognize(c: &mut Criterion) {
    let patterns = templates();
    let mut network = trained(&patterns);
    let recognizer = Recognizer::from_config(&RecognizerConfig::default());
    let mut group = c.benchmark_group("recognize");

    for &n in STROKE_LENGTHS {
        let stroke = wave(n);
        group.bench_with_input(BenchmarkId::new("network", n), &stroke, |b, stroke| {
            b.iter(|| black_box(recognizer.recognize(stroke, &mut network).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("heuristic", n), &stroke, |b, stroke| {
            b.iter(|| black_box(recognizer.recognize_heuristic(stroke, &patterns).unwrap()))
        });
    }

    group.finish();
}

fn bench_training_epoch(c: &mut Criterion) {
    let patterns = templates();

    c.bench_function("train/epoch", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(2);
            let network =
                Network::for_patterns(&patterns, SAMPLING_FACTOR, Hyperparameters::default(), &mut rng)
                    .unwrap();
            black_box(network.train(&patterns, 1, Some(2)).unwrap())
        })
    });
}

criterion_group!(benches, bench_simplify, bench_recognize, bench_training_epoch);
criterion_main!(benches);
