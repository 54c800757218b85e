mod greedy;
mod result;
mod traits;

pub use greedy::GreedyCloudMatch;
pub use result::{score_as_percent, RecognitionResult};
pub use traits::HeuristicStrategy;
