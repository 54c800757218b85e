use super::commands::{Input, Output};
use super::decoder::Decoder;
use super::encoder::Encoder;
use log::debug;
use std::error::Error;
use std::io::{self, BufRead};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

pub struct Connection {
    output_tx: Sender<Output>,
    printer: JoinHandle<()>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    pub fn new() -> Self {
        let (output_tx, output_rx) = channel();

        let printer = Self::spawn_output_handler(output_rx);

        Self { output_tx, printer }
    }

    pub fn sender(&self) -> Sender<Output> {
        self.output_tx.clone()
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub fn listen<F>(&mut self, callback: F) -> io::Result<()>
    where
        F: FnMut(&Input, Sender<Output>) -> Result<(), Box<dyn Error>>,
    {
        let stdin = io::stdin();
        self.listen_to(stdin.lock(), callback)
    }

    /// Feeds every line of `reader` to `callback`. End of input counts as `quit`.
    pub fn listen_to<R, F>(&mut self, mut reader: R, mut callback: F) -> io::Result<()>
    where
        R: BufRead,
        F: FnMut(&Input, Sender<Output>) -> Result<(), Box<dyn Error>>,
    {
        let decoder = Decoder::new();

        loop {
            let mut in_line = String::new();
            let input = if reader.read_line(&mut in_line)? == 0 {
                Input::Quit
            } else {
                let in_line = in_line.trim();
                debug!("Input: {:?}", in_line);
                if in_line.is_empty() {
                    continue;
                }
                decoder.decode(in_line)
            };

            if let Err(e) = callback(&input, self.output_tx.clone()) {
                debug!("Callback error: {:?}", e);
            }

            if matches!(input, Input::Quit) {
                break;
            }
        }

        Ok(())
    }

    /// Waits until every queued line is printed.
    ///
    /// Returns once all other senders handed out by this connection are dropped.
    pub fn close(self) {
        let Connection { output_tx, printer } = self;
        drop(output_tx);
        let _ = printer.join();
    }

    fn spawn_output_handler(output_rx: Receiver<Output>) -> JoinHandle<()> {
        thread::spawn(move || {
            let encoder = Encoder {};

            while let Ok(output) = output_rx.recv() {
                let out_line = encoder.encode(&output);
                debug!("Output: {:?}", out_line);
                println!("{}", out_line);
            }
        })
    }
}
