mod connection;
mod decoder;
mod encoder;
mod options;

pub mod commands;

pub use commands::{Document, Input, Output};
pub use connection::Connection;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use options::{OptionType, ProtocolOption};
