mod definition;
mod document;
mod error;
mod set;

pub use definition::PatternDefinition;
pub use error::PatternError;
pub use set::PatternSet;
