//! Base implementation of records.
use crate::error::HoverError;
use std::collections::{hash_map::Iter, HashMap};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, e.g. a reward or a distance.
    Scalar(f64),

    /// A text value, e.g. the reason an episode terminated.
    String(String),
}

/// A container of key-value pairs of [`RecordValue`]s.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f64) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f64, HoverError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(HoverError::RecordValueTypeError("Scalar".to_string())),
            None => Err(HoverError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, HoverError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(HoverError::RecordValueTypeError("String".to_string())),
            None => Err(HoverError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the number of values in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_scalar_errors() {
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("termination", RecordValue::String("Boundary".to_string())),
        ]);

        assert_eq!(record.get_scalar("reward"), Ok(1.0));
        assert_eq!(
            record.get_scalar("termination"),
            Err(HoverError::RecordValueTypeError("Scalar".to_string()))
        );
        assert_eq!(
            record.get_scalar("distance"),
            Err(HoverError::RecordKeyError("distance".to_string()))
        );
        assert_eq!(record.get_string("termination").unwrap(), "Boundary");
    }

    #[test]
    fn test_insert_overwrites() {
        let mut record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("height", RecordValue::Scalar(10.0)),
        ]);
        record.insert("reward", RecordValue::Scalar(2.0));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get_scalar("reward").unwrap(), 2.0);
        assert_eq!(record.iter().count(), 2);
        assert_eq!(
            record.get_string("height"),
            Err(HoverError::RecordValueTypeError("String".to_string()))
        );
    }
}
