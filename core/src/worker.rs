use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use geometry::Point;
use network::Step;
use protocol::commands::{Progress, Score, TrainParams};
use protocol::{Document, Output};
use recognition::{RecognitionContext, RecognitionError, RecognizerConfig};
use scoring::RecognitionResult;

/// Epochs between two progress lines.
const PROGRESS_INTERVAL: usize = 100;

/// Commands sent from the protocol thread to the recognition worker.
pub enum WorkerCommand {
    /// Replace the recognizer configuration.
    Configure(Box<RecognizerConfig>),
    AddPattern {
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
    /// Start a training run, advanced one epoch per loop iteration.
    Train(TrainParams),
    /// Cancel the active run at the current epoch boundary.
    Stop,
    Load {
        document: Document,
        path: PathBuf,
    },
    Save {
        document: Document,
        path: PathBuf,
    },
    /// Shut down the worker thread.
    Quit,
}

/// Recognition worker that processes commands on a dedicated thread.
///
/// Owns the recognition context. While a training run is active it runs one
/// epoch per iteration and drains pending commands in between, so the host
/// stays responsive. Commands are handled in the order they were sent, so a
/// stop always lands before any later train.
pub struct RecognitionWorker {
    context: RecognitionContext,
    rx: Receiver<WorkerCommand>,
    output: Sender<Output>,
}

impl RecognitionWorker {
    pub fn new(
        context: RecognitionContext,
        rx: Receiver<WorkerCommand>,
        output: Sender<Output>,
    ) -> Self {
        Self {
            context,
            rx,
            output,
        }
    }

    /// Main loop: process commands until Quit is received or the host hangs up.
    pub fn run(mut self) {
        loop {
            let command = if self.context.is_training() {
                match self.rx.try_recv() {
                    Ok(command) => Some(command),
                    Err(TryRecvError::Empty) => None,
                    Err(TryRecvError::Disconnected) => break,
                }
            } else {
                match self.rx.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                }
            };

            if let Some(command) = command {
                if !self.handle(command) {
                    break;
                }
                continue;
            }

            self.tick();
        }

        self.context.cancel_training();
    }

    /// Handles one command. Returns false on quit.
    fn handle(&mut self, command: WorkerCommand) -> bool {
        let result = match command {
            WorkerCommand::Configure(config) => {
                *self.context.config_mut() = *config;
                Ok(())
            }
            WorkerCommand::AddPattern { name, points } => {
                self.context.add_pattern(&name, points).map(|()| {
                    log::debug!("Added pattern '{}'", name);
                })
            }
            WorkerCommand::Recognize(points) => self
                .context
                .recognize(&points)
                .map(|result| self.send(Output::Result(score(&result)))),
            WorkerCommand::Match {
                label,
                threshold,
                points,
            } => self
                .context
                .matches(&points, &label, threshold)
                .map(|matched| self.send(Output::Match { label, matched })),
            WorkerCommand::Compare { template, points } => self
                .context
                .compare(&template, points)
                .map(|result| self.send(Output::Result(score(&result)))),
            WorkerCommand::Heuristic(points) => self
                .context
                .recognize_heuristic(&points)
                .map(|result| self.send(Output::Result(score(&result)))),
            WorkerCommand::Train(params) => self
                .context
                .begin_training(params.names.as_slice(), params.epochs),
            WorkerCommand::Stop => {
                self.cancel();
                Ok(())
            }
            WorkerCommand::Load { document, path } => match document {
                Document::Patterns => self.context.load_patterns(&path),
                Document::Classifier => self.context.load_classifier(&path),
            },
            WorkerCommand::Save { document, path } => match document {
                Document::Patterns => self.context.save_patterns(&path),
                Document::Classifier => self.context.save_classifier(&path),
            },
            WorkerCommand::Quit => return false,
        };

        if let Err(e) = result {
            self.report(e);
        }
        true
    }

    fn cancel(&mut self) {
        match self.context.cancel_training() {
            Some((epoch, total)) => self.send(Output::Cancelled(Progress { epoch, total })),
            None => log::debug!("Stop without an active training run"),
        }
    }

    // One epoch of the active run.
    fn tick(&mut self) {
        match self.context.step_training() {
            Some(Step::InProgress { epoch, total }) => {
                if epoch % PROGRESS_INTERVAL == 0 {
                    self.send(Output::Info(Progress { epoch, total }));
                }
            }
            Some(Step::Done) => {
                let labels = self
                    .context
                    .network()
                    .map(|n| n.labels().to_vec())
                    .unwrap_or_default();
                self.send(Output::Trained(labels));
            }
            None => {}
        }
    }

    fn report(&self, error: RecognitionError) {
        log::warn!("{}", error);
        self.send(Output::Error(error.to_string()));
    }

    fn send(&self, output: Output) {
        let _ = self.output.send(output);
    }
}

fn score(result: &RecognitionResult) -> Score {
    Score {
        label: result.label.clone(),
        score: result.score,
        percent: result.score_as_percent(),
        success: result.success,
    }
}
