use geometry::Point;
use patterns::PatternDefinition;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Hyperparameters, Network, NetworkError, Step, TrainingSession};

const SAMPLING_FACTOR: usize = 20;

fn params() -> Hyperparameters {
    Hyperparameters {
        learning_rate: 0.2,
        theta: 0.5,
        elastic: 1.0,
        decay: 0.9999,
    }
}

fn stroke(dx: f32, dy: f32) -> Vec<Point> {
    (0..11)
        .map(|i| Point::new(i as f32 * dx, i as f32 * dy))
        .collect()
}

fn lines() -> Vec<PatternDefinition> {
    vec![
        PatternDefinition::normalized("horizontal", stroke(10.0, 0.0), SAMPLING_FACTOR).unwrap(),
        PatternDefinition::normalized("vertical", stroke(0.0, 10.0), SAMPLING_FACTOR).unwrap(),
        PatternDefinition::normalized("diagonal", stroke(10.0, 10.0), SAMPLING_FACTOR).unwrap(),
    ]
}

fn fresh(patterns: &[PatternDefinition], seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    Network::for_patterns(patterns, SAMPLING_FACTOR, params(), &mut rng).unwrap()
}

#[test]
fn test_separates_distinct_lines() {
    let patterns = lines();
    let network = fresh(&patterns, 42);
    assert_eq!(network.input_size(), 19);
    assert_eq!(network.hidden_size(), 12);

    let mut trained = network.train(&patterns, 2000, Some(7)).unwrap();

    for pattern in &patterns {
        let result = trained.propagate(&pattern.angles(), 0.8).unwrap();
        assert_eq!(result.label, pattern.name());
        assert!(result.success, "{} scored {}", pattern.name(), result.score);
    }
}

#[test]
fn test_labels_follow_pattern_order() {
    let mut patterns = lines();
    patterns.reverse();

    let network = fresh(&patterns, 1);
    let session = TrainingSession::with_seed(network, &patterns, 1, Some(1)).unwrap();

    assert_eq!(
        session.network().labels(),
        ["diagonal", "vertical", "horizontal"].map(String::from)
    );
}

#[test]
fn test_one_epoch_per_step() {
    let patterns = lines();
    let mut session = TrainingSession::with_seed(fresh(&patterns, 3), &patterns, 3, Some(3)).unwrap();

    assert_eq!(session.step(), Step::InProgress { epoch: 1, total: 3 });
    assert_eq!(session.step(), Step::InProgress { epoch: 2, total: 3 });
    assert_eq!(session.step(), Step::Done);
    assert_eq!(session.step(), Step::Done);
    assert_eq!(session.epoch(), 3);

    // Three samples per epoch, each decaying the rate once
    let expected = 0.2 * 0.9999f32.powi(9);
    let actual = session.network().params().learning_rate;
    assert!((actual - expected).abs() < 1e-6);
}

#[test]
fn test_stepping_matches_blocking_training() {
    let patterns = lines();

    let mut session =
        TrainingSession::with_seed(fresh(&patterns, 5), &patterns, 25, Some(8)).unwrap();
    while let Step::InProgress { .. } = session.step() {}
    let stepped = session.into_network();

    let blocking = fresh(&patterns, 5).train(&patterns, 25, Some(8)).unwrap();
    assert_eq!(stepped, blocking);
}

#[test]
fn test_cancel_lands_on_epoch_boundary() {
    let patterns = lines();

    let mut session =
        TrainingSession::with_seed(fresh(&patterns, 6), &patterns, 100, Some(2)).unwrap();
    for _ in 0..10 {
        session.step();
    }
    let cancelled = session.into_network();

    let ten_epochs = fresh(&patterns, 6).train(&patterns, 10, Some(2)).unwrap();
    assert_eq!(cancelled, ten_epochs);
}

#[test]
fn test_rejects_empty_training_set() {
    let network = fresh(&lines(), 1);
    let result = TrainingSession::with_seed(network, &[], 10, None);
    assert!(matches!(result, Err(NetworkError::EmptyTrainingSet)));
}

#[test]
fn test_rejects_wrong_class_count() {
    let patterns = lines();
    let network = fresh(&patterns[..2], 1);

    let result = TrainingSession::with_seed(network, &patterns, 10, None);
    assert!(matches!(
        result,
        Err(NetworkError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    ));
}

#[test]
fn test_rejects_wrong_sampling_factor() {
    let patterns = lines();
    let network = fresh(&patterns, 1);

    let short: Vec<PatternDefinition> = patterns
        .iter()
        .map(|p| {
            let mut p = p.clone();
            p.simplify_to(10).unwrap();
            p
        })
        .collect();

    let result = TrainingSession::with_seed(network, &short, 10, None);
    assert!(matches!(
        result,
        Err(NetworkError::DimensionMismatch {
            expected: 19,
            actual: 9
        })
    ));
}
