use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gesture")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Log protocol communication to a file for debugging.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Pattern document to load on startup.
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Classifier state to load on startup.
    #[arg(long)]
    pub classifier: Option<PathBuf>,

    /// Seed for weight initialization and shuffling.
    #[arg(long)]
    pub seed: Option<u64>,
}
