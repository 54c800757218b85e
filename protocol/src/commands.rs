use std::path::PathBuf;

use geometry::Point;

#[derive(Debug, PartialEq)]
pub enum Input {
    Hello,
    IsReady,
    SetOption {
        name: String,
        value: String,
    },

    Pattern {
        name: String,
        points: Vec<Point>,
    },
    Recognize(Vec<Point>),
    Match {
        label: String,
        threshold: f32,
        points: Vec<Point>,
    },
    Compare {
        template: String,
        points: Vec<Point>,
    },
    Heuristic(Vec<Point>),

    Train(TrainParams),
    Stop,

    Load {
        document: Document,
        path: PathBuf,
    },
    Save {
        document: Document,
        path: PathBuf,
    },

    Quit,
    /// A known command with unusable arguments.
    Malformed(String),
    Unknown(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainParams {
    // Falls back to the configured epoch count.
    pub epochs: Option<usize>,

    // Train only these patterns, in this order. Empty means all of them.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Patterns,
    Classifier,
}

#[derive(Debug, PartialEq)]
pub enum Output {
    IdName(String),
    IdVersion(String),
    HelloOk,
    ReadyOk,
    Option(String),

    Result(Score),
    Match { label: String, matched: bool },

    Info(Progress),
    Trained(Vec<String>),
    Cancelled(Progress),

    Error(String),
}

#[derive(Debug, Default, PartialEq)]
pub struct Score {
    pub label: String,
    pub score: f32,
    pub percent: f32,
    pub success: bool,
}

#[derive(Debug, Default, PartialEq)]
pub struct Progress {
    pub epoch: usize,
    pub total: usize,
}
