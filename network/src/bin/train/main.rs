mod args;
mod progress;

use args::Args;
use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use network::{Hyperparameters, Network, Step, TrainingSession};
use patterns::{PatternDefinition, PatternSet};
use progress::TrainingProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, SimpleLogger};
use std::{
    error::Error,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_handler = Arc::clone(&stop_flag);

    ctrlc::set_handler(move || {
        log::info!("Received SIGINT, stopping after the current epoch...");
        stop_flag_handler.store(true, Ordering::Relaxed);
    })?;

    let patterns = load_patterns(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let params = Hyperparameters {
        learning_rate: args.learning_rate,
        theta: args.theta,
        elastic: args.elastic,
        decay: args.decay,
    };
    let network = Network::for_patterns(&patterns, args.sampling_factor, params, &mut rng)?;

    let mut session = TrainingSession::new(network, &patterns, args.epochs, rng)?;
    let progress = TrainingProgressBar::new(args.epochs)?;

    loop {
        if stop_flag.load(Ordering::Relaxed) {
            progress.finish(format!("stopped at epoch {}", session.epoch()));
            log::info!("Training cancelled, nothing written");
            return Ok(());
        }

        let step = session.step();
        progress.update(session.network().params().learning_rate);

        if step == Step::Done {
            break;
        }
    }

    let mut network = session.into_network();
    progress.finish(format!("{} epochs", args.epochs));
    report(&mut network, &patterns)?;

    let path = args.output.clone().unwrap_or_else(|| {
        let timestamp = Local::now().format("%Y-%m-%d-%H:%M");
        PathBuf::from(format!("classifier-{}.json", timestamp))
    });
    network.save(&path)?;

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    Ok(args)
}

fn load_patterns(args: &Args) -> Result<Vec<PatternDefinition>, Box<dyn Error>> {
    let set = PatternSet::load(&args.patterns)?;

    let mut patterns = if args.names.is_empty() {
        set.as_slice().to_vec()
    } else {
        set.select(&args.names)?
    };

    if patterns.is_empty() {
        return Err("No patterns to train on".into());
    }

    for pattern in &mut patterns {
        pattern.simplify_to(args.sampling_factor)?;
    }

    log::info!(
        "Training on: {}",
        patterns
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(patterns)
}

// Re-classify every training pattern with the trained weights.
fn report(network: &mut Network, patterns: &[PatternDefinition]) -> Result<(), Box<dyn Error>> {
    for pattern in patterns {
        let result = network.propagate(&pattern.angles(), 0.8)?;
        log::info!(
            "{:>16} -> {} ({:.4})",
            pattern.name(),
            result.label,
            result.score
        );
    }
    Ok(())
}
