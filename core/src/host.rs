//! Protocol host: decodes commands and coordinates the recognition worker.

use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use log::debug;
use protocol::{Connection, Document, Input, Output};
use recognition::{RecognitionContext, RecognizerConfig};

use crate::args::Args;
use crate::worker::{RecognitionWorker, WorkerCommand};

const HOST_NAME: &str = "gesture";
const HOST_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Host {
    config: RecognizerConfig,
    cmd_tx: Sender<WorkerCommand>,
    output: Sender<Output>,
    worker_handle: JoinHandle<()>,
}

impl Host {
    /// Spawns the worker thread and queues any documents named on the command line.
    pub fn new(args: &Args, output: Sender<Output>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let config = RecognizerConfig::default();
        let mut context = RecognitionContext::new(config.clone());
        if let Some(seed) = args.seed {
            context = context.with_seed(seed);
        }

        let worker = RecognitionWorker::new(context, cmd_rx, output.clone());
        let worker_handle = thread::spawn(move || worker.run());

        let host = Self {
            config,
            cmd_tx,
            output,
            worker_handle,
        };

        if let Some(path) = &args.patterns {
            host.load(Document::Patterns, path.clone());
        }
        if let Some(path) = &args.classifier {
            host.load(Document::Classifier, path.clone());
        }

        host
    }

    /// Runs the protocol loop until quit or end of input.
    pub fn run(mut self, connection: &mut Connection) -> Result<(), Box<dyn Error>> {
        connection.listen(|input, _| {
            self.handle(input);
            Ok(())
        })?;

        self.shutdown();
        Ok(())
    }

    fn handle(&mut self, input: &Input) {
        match input {
            Input::Hello => {
                self.send(Output::IdName(HOST_NAME.to_string()));
                self.send(Output::IdVersion(HOST_VERSION.to_string()));
                let _ = self.config.to_protocol(&self.output);
                self.send(Output::HelloOk);
            }
            Input::IsReady => self.send(Output::ReadyOk),
            Input::SetOption { name, value } => {
                if let Err(e) = self.config.update_from_protocol(name, value) {
                    debug!("Option setting failed: {}", e);
                    self.send(Output::Error(e));
                } else {
                    debug!("Set option '{}' to '{}'", name, value);
                    self.command(WorkerCommand::Configure(Box::new(self.config.clone())));
                }
            }

            Input::Pattern { name, points } => self.command(WorkerCommand::AddPattern {
                name: name.clone(),
                points: points.clone(),
            }),
            Input::Recognize(points) => self.command(WorkerCommand::Recognize(points.clone())),
            Input::Match {
                label,
                threshold,
                points,
            } => self.command(WorkerCommand::Match {
                label: label.clone(),
                threshold: *threshold,
                points: points.clone(),
            }),
            Input::Compare { template, points } => self.command(WorkerCommand::Compare {
                template: template.clone(),
                points: points.clone(),
            }),
            Input::Heuristic(points) => self.command(WorkerCommand::Heuristic(points.clone())),

            Input::Train(params) => self.command(WorkerCommand::Train(params.clone())),
            Input::Stop => self.command(WorkerCommand::Stop),

            Input::Load { document, path } => self.load(*document, path.clone()),
            Input::Save { document, path } => self.command(WorkerCommand::Save {
                document: *document,
                path: path.clone(),
            }),

            Input::Quit => {}
            Input::Malformed(message) => self.send(Output::Error(message.clone())),
            Input::Unknown(line) => {
                debug!("Unknown command: {}", line);
                self.send(Output::Error(format!("unknown command '{}'", line)));
            }
        }
    }

    fn load(&self, document: Document, path: PathBuf) {
        self.command(WorkerCommand::Load { document, path });
    }

    fn command(&self, command: WorkerCommand) {
        let _ = self.cmd_tx.send(command);
    }

    fn send(&self, output: Output) {
        let _ = self.output.send(output);
    }

    fn shutdown(self) {
        let _ = self.cmd_tx.send(WorkerCommand::Quit);
        let _ = self.worker_handle.join();
    }
}
