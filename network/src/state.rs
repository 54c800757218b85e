// Classifier state document.
//
// A flat JSON object carrying the hyperparameters, layer sizes, weight
// matrices, scratch buffers and output labels. Numbers may also be stored as
// numeric strings.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::{Hyperparameters, Network, NetworkError};

impl Network {
    pub fn to_value(&self) -> Value {
        json!({
            "learningRate": self.params.learning_rate,
            "elasticSigmoid": self.params.elastic,
            "momentum": self.params.decay,
            "theta": self.params.theta,
            "neuronInput": self.input_size as f32,
            "neuronHidden": self.hidden_size as f32,
            "neuronOut": self.output_size as f32,
            "inpA": self.input_activations,
            "hidA": self.hidden_activations,
            "hidN": self.hidden_net,
            "hidW": self.hidden_weights,
            "outA": self.output_activations,
            "outN": self.output_net,
            "outD": self.output_deltas,
            "outW": self.output_weights,
            "patternIDs": self.labels,
        })
    }

    pub fn from_value(value: &Value) -> Result<Self, NetworkError> {
        let fields = value
            .as_object()
            .ok_or_else(|| malformed("expected a JSON object"))?;
        let state = Fields(fields);

        let input_size = state.count("neuronInput")?;
        let hidden_size = state.count("neuronHidden")?;
        let output_size = state.count("neuronOut")?;

        let params = Hyperparameters {
            learning_rate: state.float("learningRate")?,
            theta: state.float("theta")?,
            elastic: state.float("elasticSigmoid")?,
            decay: state.float("momentum")?,
        };

        let labels = state.labels("patternIDs")?;
        if output_size == 0 || labels.len() != output_size {
            return Err(malformed(format!(
                "{} labels for {} output neurons",
                labels.len(),
                output_size
            )));
        }

        Ok(Self {
            input_size,
            hidden_size,
            output_size,
            params,
            hidden_weights: state.matrix("hidW", hidden_size, input_size)?,
            output_weights: state.matrix("outW", output_size, hidden_size)?,
            input_activations: state.vector("inpA", input_size)?,
            hidden_net: state.vector("hidN", hidden_size)?,
            hidden_activations: state.vector("hidA", hidden_size)?,
            output_net: state.vector("outN", output_size)?,
            output_activations: state.vector("outA", output_size)?,
            output_deltas: state.vector("outD", output_size)?,
            labels,
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let value: Value = serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn read<R: Read>(reader: R) -> Result<Self, NetworkError> {
        let value: Value = serde_json::from_reader(reader).map_err(|e| malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), NetworkError> {
        serde_json::to_writer(&mut *writer, &self.to_value())
            .map_err(|e| malformed(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, NetworkError> {
        let network = Self::read(BufReader::new(File::open(path)?))?;
        log::info!(
            "Loaded classifier {}-{}-{} from {}",
            network.input_size,
            network.hidden_size,
            network.output_size,
            path.display()
        );
        Ok(network)
    }

    pub fn save(&self, path: &Path) -> Result<(), NetworkError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        log::info!("Saved classifier to {}", path.display());
        Ok(())
    }
}

fn malformed(message: impl Into<String>) -> NetworkError {
    NetworkError::MalformedState(message.into())
}

struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn get(&self, key: &str) -> Result<&Value, NetworkError> {
        self.0
            .get(key)
            .ok_or_else(|| malformed(format!("missing '{}'", key)))
    }

    fn float(&self, key: &str) -> Result<f32, NetworkError> {
        number(self.get(key)?).ok_or_else(|| malformed(format!("'{}' is not a number", key)))
    }

    fn count(&self, key: &str) -> Result<usize, NetworkError> {
        let value = self.float(key)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(malformed(format!("'{}' is not a neuron count: {}", key, value)));
        }
        Ok(value as usize)
    }

    fn vector(&self, key: &str, len: usize) -> Result<Vec<f32>, NetworkError> {
        let values = numbers(self.get(key)?)
            .ok_or_else(|| malformed(format!("'{}' is not a list of numbers", key)))?;
        if values.len() != len {
            return Err(malformed(format!(
                "'{}' has {} values, expected {}",
                key,
                values.len(),
                len
            )));
        }
        Ok(values)
    }

    fn matrix(&self, key: &str, rows: usize, cols: usize) -> Result<Vec<Vec<f32>>, NetworkError> {
        let not_matrix = || malformed(format!("'{}' is not a matrix of numbers", key));

        let matrix = self
            .get(key)?
            .as_array()
            .ok_or_else(not_matrix)?
            .iter()
            .map(|row| numbers(row).ok_or_else(not_matrix))
            .collect::<Result<Vec<_>, _>>()?;

        if matrix.len() != rows || matrix.iter().any(|row| row.len() != cols) {
            return Err(malformed(format!("'{}' is not {}x{}", key, rows, cols)));
        }
        Ok(matrix)
    }

    fn labels(&self, key: &str) -> Result<Vec<String>, NetworkError> {
        let not_labels = || malformed(format!("'{}' is not a list of names", key));

        self.get(key)?
            .as_array()
            .ok_or_else(not_labels)?
            .iter()
            .map(|label| match label {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(not_labels()),
            })
            .collect()
    }
}

fn number(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn numbers(value: &Value) -> Option<Vec<f32>> {
    value.as_array()?.iter().map(number).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> Value {
        json!({
            "learningRate": "0.01",
            "elasticSigmoid": 0.5,
            "momentum": "0.999",
            "theta": 0.5,
            "neuronInput": "2",
            "neuronHidden": 2.0,
            "neuronOut": 1,
            "inpA": [0.0, 0.0],
            "hidA": [0.0, "0"],
            "hidN": [0.0, 0.0],
            "hidW": [[0.1, -0.2], ["0.3", 0.4]],
            "outA": [0.0],
            "outN": [0.0],
            "outD": [0.0],
            "outW": [[1.0, -1.0]],
            "patternIDs": ["only"],
        })
    }

    #[test]
    fn test_accepts_numeric_strings() {
        let network = Network::from_value(&state()).unwrap();

        assert_eq!(network.input_size(), 2);
        assert_eq!(network.hidden_size(), 2);
        assert_eq!(network.labels(), ["only".to_string()]);
        assert_eq!(network.hidden_weights[1][0], 0.3);
        assert_eq!(network.params().learning_rate, 0.01);
    }

    #[test]
    fn test_missing_key() {
        let mut value = state();
        value.as_object_mut().unwrap().remove("outW");

        let Err(NetworkError::MalformedState(message)) = Network::from_value(&value) else {
            panic!("expected a malformed state error");
        };
        assert!(message.contains("outW"));
    }

    #[test]
    fn test_unparsable_number() {
        let mut value = state();
        value["theta"] = json!("half");
        assert!(matches!(
            Network::from_value(&value),
            Err(NetworkError::MalformedState(_))
        ));
    }

    #[test]
    fn test_wrong_shape() {
        let mut value = state();
        value["hidW"] = json!([[0.1, 0.2, 0.3], [0.3, 0.4, 0.5]]);
        assert!(matches!(
            Network::from_value(&value),
            Err(NetworkError::MalformedState(_))
        ));

        let mut value = state();
        value["patternIDs"] = json!(["a", "b"]);
        assert!(matches!(
            Network::from_value(&value),
            Err(NetworkError::MalformedState(_))
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            Network::from_json("[1, 2, 3]"),
            Err(NetworkError::MalformedState(_))
        ));
        assert!(matches!(
            Network::from_json("{"),
            Err(NetworkError::MalformedState(_))
        ));
    }
}
