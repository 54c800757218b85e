mod args;
mod host;
mod worker;

use args::Args;
use clap::Parser;
use host::Host;
use log::LevelFilter;
use protocol::Connection;
use simplelog::{Config, WriteLogger};
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let mut connection = Connection::new();
    let host = Host::new(&args, connection.sender());
    host.run(&mut connection)?;

    connection.close();
    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?;
    }

    Ok(args)
}
