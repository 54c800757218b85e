use super::commands::Output;

pub struct Encoder {}

impl Encoder {
    pub fn encode(&self, response: &Output) -> String {
        match response {
            Output::IdName(name) => format!("id name {}", name),
            Output::IdVersion(version) => format!("id version {}", version),

            Output::HelloOk => "hellook".to_string(),
            Output::ReadyOk => "readyok".to_string(),
            Output::Option(option_str) => option_str.clone(),

            Output::Result(score) => format!(
                "result label {} score {:.6} percent {:.4} success {}",
                score.label, score.score, score.percent, score.success
            ),
            Output::Match { label, matched } => format!("match {} {}", label, matched),

            Output::Info(progress) => {
                format!("info epoch {}/{}", progress.epoch, progress.total)
            }
            Output::Trained(labels) => format!("trained {}", labels.join(" ")),
            Output::Cancelled(progress) => {
                format!("cancelled epoch {}/{}", progress.epoch, progress.total)
            }

            Output::Error(message) => format!("error {}", message),
        }
    }
}
