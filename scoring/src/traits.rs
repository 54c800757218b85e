// Heuristic scoring interface.
//
// A heuristic compares two patterns directly, without a trained network.
// Lower scores mean closer shapes; callers read them through the same
// percent transform the network path uses.

use patterns::PatternDefinition;

pub trait HeuristicStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, candidate: &PatternDefinition, template: &PatternDefinition) -> f32;
}
