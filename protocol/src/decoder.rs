use std::path::PathBuf;

use geometry::Point;

use super::commands::{Document, Input, TrainParams};

pub struct Decoder;

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &str) -> Input {
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "hello" => Input::Hello,
            "isready" => Input::IsReady,
            "stop" => Input::Stop,
            "quit" => Input::Quit,

            "setoption" => self.decode_setoption(input),
            "pattern" => self.decode_pattern(rest),
            "recognize" => points(rest).map_or_else(Input::Malformed, Input::Recognize),
            "heuristic" => points(rest).map_or_else(Input::Malformed, Input::Heuristic),
            "match" => self.decode_match(rest),
            "compare" => self.decode_compare(rest),
            "train" => self.decode_train(rest),
            "load" | "save" => self.decode_document(command, rest),

            _ => Input::Unknown(input.to_string()),
        }
    }

    fn decode_setoption(&self, input: &str) -> Input {
        // setoption name <name> [value <value>]
        let Some(rest) = input.strip_prefix("setoption name ") else {
            return Input::Malformed("setoption needs a name".to_string());
        };

        let (name, value) = match rest.split_once(" value ") {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (rest.trim(), ""),
        };

        Input::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn decode_pattern(&self, rest: &str) -> Input {
        let Some((name, coordinates)) = split_word(rest) else {
            return Input::Malformed("pattern needs a name".to_string());
        };

        match points(coordinates) {
            Ok(points) => Input::Pattern {
                name: name.to_string(),
                points,
            },
            Err(message) => Input::Malformed(message),
        }
    }

    fn decode_match(&self, rest: &str) -> Input {
        let Some((label, rest)) = split_word(rest) else {
            return Input::Malformed("match needs a label".to_string());
        };
        let Some((threshold, coordinates)) = split_word(rest) else {
            return Input::Malformed("match needs a threshold".to_string());
        };
        let Ok(threshold) = threshold.parse::<f32>() else {
            return Input::Malformed(format!("invalid threshold '{}'", threshold));
        };

        match points(coordinates) {
            Ok(points) => Input::Match {
                label: label.to_string(),
                threshold,
                points,
            },
            Err(message) => Input::Malformed(message),
        }
    }

    fn decode_compare(&self, rest: &str) -> Input {
        let Some((template, coordinates)) = split_word(rest) else {
            return Input::Malformed("compare needs a pattern name".to_string());
        };

        match points(coordinates) {
            Ok(points) => Input::Compare {
                template: template.to_string(),
                points,
            },
            Err(message) => Input::Malformed(message),
        }
    }

    fn decode_train(&self, rest: &str) -> Input {
        let mut words = rest.split_whitespace().peekable();

        let epochs = words.peek().and_then(|w| w.parse::<usize>().ok());
        if epochs.is_some() {
            words.next();
        }

        Input::Train(TrainParams {
            epochs,
            names: words.map(str::to_string).collect(),
        })
    }

    fn decode_document(&self, command: &str, rest: &str) -> Input {
        let Some((kind, path)) = split_word(rest) else {
            return Input::Malformed(format!("{} needs a document and a path", command));
        };
        if path.is_empty() {
            return Input::Malformed(format!("{} needs a path", command));
        }

        let document = match kind {
            "patterns" => Document::Patterns,
            "classifier" => Document::Classifier,
            other => return Input::Malformed(format!("unknown document '{}'", other)),
        };
        let path = PathBuf::from(path);

        if command == "load" {
            Input::Load { document, path }
        } else {
            Input::Save { document, path }
        }
    }
}

// First word and the trimmed remainder.
fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    })
}

fn points(input: &str) -> Result<Vec<Point>, String> {
    let points = input
        .split_whitespace()
        .map(|p| p.parse::<Point>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    if points.is_empty() {
        return Err("no points given".to_string());
    }
    Ok(points)
}
