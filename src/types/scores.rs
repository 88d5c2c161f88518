use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Department name to confidence, kept in insertion order.
///
/// Insertion order matters: the router selects departments in map order. In
/// JSON the map is a plain object; any value that is not a finite number
/// deserializes as 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentScoreMap {
    entries: Vec<(String, f64)>,
}

impl DepartmentScoreMap {
    pub fn new() -> Self { Self::default() }

    /// Number of departments in the map.
    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Insert or overwrite a score. Overwriting keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((name, score)),
        }
    }

    /// Get the score of a department by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|&(_, s)| s)
    }

    /// Get an iterator over (name, score) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    /// Get the first highest-scoring department.
    pub fn best(&self) -> Option<(&str, f64)> {
        self.iter().fold(None, |best, (name, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((name, score)),
        })
    }

    /// Copy of this map with every non-finite score replaced by 0.0.
    pub fn coerced(&self) -> Self {
        self.iter()
            .map(|(name, score)| (name.to_string(), if score.is_finite() { score } else { 0.0 }))
            .collect()
    }

    /// Build a map from an arbitrary JSON value. Non-objects give an empty map.
    pub fn from_value(value: &Value) -> Self {
        value.as_object()
            .map(|object| object.iter().map(|(name, v)| (name.clone(), coerce(v))).collect())
            .unwrap_or_default()
    }
}

fn coerce(value: &Value) -> f64 {
    value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl FromIterator<(String, f64)> for DepartmentScoreMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        iter.into_iter().for_each(|(name, score)| map.insert(name, score));
        map
    }
}

impl<'a> FromIterator<(&'a str, f64)> for DepartmentScoreMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter().map(|(name, score)| (name.to_string(), score)).collect()
    }
}

impl Serialize for DepartmentScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, score) in self.iter() {
            map.serialize_entry(name, &score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DepartmentScoreMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreVisitor;

        impl<'de> Visitor<'de> for ScoreVisitor {
            type Value = DepartmentScoreMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of department names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = DepartmentScoreMap::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    map.insert(name, coerce(&value));
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ScoreVisitor)
    }
}
