use indicatif::{ProgressBar, ProgressStyle};

pub struct TrainingProgressBar {
    bar: ProgressBar,
}

impl TrainingProgressBar {
    pub fn new(epochs: usize) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(epochs as u64);
        bar.set_style(ProgressStyle::default_bar().template(
            "{spinner:.cyan} {pos}/{len} [{wide_bar:.cyan/blue}] {eta_precise} | {msg}",
        )?);
        Ok(Self { bar })
    }

    pub fn update(&self, learning_rate: f32) {
        self.bar.set_message(format!("lr: {:.6}", learning_rate));
        self.bar.inc(1);
    }

    pub fn finish(&self, message: String) {
        self.bar.set_message(message);
        self.bar.finish();
    }
}
