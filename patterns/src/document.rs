use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use geometry::Point;
use serde::{Deserialize, Serialize};

use crate::{PatternDefinition, PatternError, PatternSet};

// On-disk layout of a single pattern. The point count travels as text and
// every point is an "<x>,<y>" string.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatternRecord {
    name: String,
    sampling_factor: Count,
    points: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Count {
    Text(String),
    Number(u64),
}

impl Count {
    fn parse(&self, pattern: &str) -> Result<usize, PatternError> {
        match self {
            Count::Number(n) => Ok(*n as usize),
            Count::Text(text) => text.trim().parse().map_err(|_| {
                PatternError::MalformedDocument(format!(
                    "pattern '{}' has a non-numeric samplingFactor '{}'",
                    pattern, text
                ))
            }),
        }
    }
}

impl From<&PatternDefinition> for PatternRecord {
    fn from(pattern: &PatternDefinition) -> Self {
        Self {
            name: pattern.name().to_string(),
            sampling_factor: Count::Text(pattern.sampling_factor().to_string()),
            points: pattern.points().iter().map(Point::to_string).collect(),
        }
    }
}

impl TryFrom<PatternRecord> for PatternDefinition {
    type Error = PatternError;

    fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
        let sampling_factor = record.sampling_factor.parse(&record.name)?;

        let points = record
            .points
            .iter()
            .map(|p| {
                p.parse::<Point>().map_err(|e| {
                    PatternError::MalformedDocument(format!("pattern '{}': {}", record.name, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        PatternDefinition::normalized(record.name, points, sampling_factor)
    }
}

impl PatternSet {
    pub fn to_json(&self) -> Result<String, PatternError> {
        let records: Vec<PatternRecord> = self.iter().map(PatternRecord::from).collect();
        serde_json::to_string_pretty(&records)
            .map_err(|e| PatternError::MalformedDocument(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PatternError> {
        let records: Vec<PatternRecord> = serde_json::from_str(json)
            .map_err(|e| PatternError::MalformedDocument(e.to_string()))?;
        Self::from_records(records)
    }

    pub fn read<R: Read>(reader: R) -> Result<Self, PatternError> {
        let records: Vec<PatternRecord> = serde_json::from_reader(reader)
            .map_err(|e| PatternError::MalformedDocument(e.to_string()))?;
        Self::from_records(records)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), PatternError> {
        let records: Vec<PatternRecord> = self.iter().map(PatternRecord::from).collect();
        serde_json::to_writer_pretty(&mut *writer, &records)
            .map_err(|e| PatternError::MalformedDocument(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let set = Self::read(BufReader::new(File::open(path)?))?;
        log::info!("Loaded {} patterns from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn save(&self, path: &Path) -> Result<(), PatternError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        log::info!("Saved {} patterns to {}", self.len(), path.display());
        Ok(())
    }

    fn from_records(records: Vec<PatternRecord>) -> Result<Self, PatternError> {
        let mut set = PatternSet::new();
        for record in records {
            set.insert(PatternDefinition::try_from(record)?)?;
        }
        Ok(set)
    }
}
