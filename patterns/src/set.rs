use ahash::AHashMap;

use crate::{PatternDefinition, PatternError};

/// Named collection of patterns.
///
/// Names are unique. Insertion order is kept because it decides which output
/// neuron a pattern is assigned to when the set is used for training.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<PatternDefinition>,
    index: AHashMap<String, usize>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pattern: PatternDefinition) -> Result<(), PatternError> {
        if self.index.contains_key(pattern.name()) {
            return Err(PatternError::DuplicateLabel(pattern.name().to_string()));
        }

        self.index
            .insert(pattern.name().to_string(), self.patterns.len());
        self.patterns.push(pattern);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PatternDefinition> {
        self.index.get(name).map(|&i| &self.patterns[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PatternDefinition> {
        let position = self.index.remove(name)?;
        let removed = self.patterns.remove(position);

        // Later patterns shifted down by one
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        Some(removed)
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
        self.index.clear();
    }

    /// Clones the named patterns in the order they are requested.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<PatternDefinition>, PatternError> {
        names
            .iter()
            .map(|name| {
                self.get(name.as_ref())
                    .cloned()
                    .ok_or_else(|| PatternError::UnknownLabel(name.as_ref().to_string()))
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternDefinition> {
        self.patterns.iter()
    }

    pub fn as_slice(&self) -> &[PatternDefinition] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a PatternDefinition;
    type IntoIter = std::slice::Iter<'a, PatternDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
