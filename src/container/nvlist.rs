//! In-memory name/value list.
//!
//! Pairs keep their insertion order and names are unique.  The JSON form is
//! an object whose values are tagged with their kind, with binary blobs
//! hex-encoded:
//!
//! ```text
//! {"af": {"number": 2}, "address": {"binary": "c0000201"}}
//! ```

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ValueKind, WireContainer};

/// A single typed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NvValue {
    Number(u64),
    #[serde(with = "hex")]
    Binary(Vec<u8>),
    String(String),
    Nvlist(NvList),
}

impl NvValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            NvValue::Number(_) => ValueKind::Number,
            NvValue::Binary(_) => ValueKind::Binary,
            NvValue::String(_) => ValueKind::String,
            NvValue::Nvlist(_) => ValueKind::Nvlist,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvList {
    pairs: Vec<(String, NvValue)>,
}

impl NvList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&NvValue> {
        self.pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    /// Store `value` under `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: &str, value: NvValue) {
        match self.pairs.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<NvValue> {
        let idx = self.pairs.iter().position(|(n, _)| n == name)?;
        Some(self.pairs.remove(idx).1)
    }
}

impl WireContainer for NvList {
    fn new_empty() -> Self {
        Self::new()
    }

    fn kind(&self, name: &str) -> Option<ValueKind> {
        self.get(name).map(NvValue::kind)
    }

    fn get_number(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            NvValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn get_binary(&self, name: &str) -> Option<&[u8]> {
        match self.get(name)? {
            NvValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            NvValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn get_nvlist(&self, name: &str) -> Option<&Self> {
        match self.get(name)? {
            NvValue::Nvlist(l) => Some(l),
            _ => None,
        }
    }

    fn add_number(&mut self, name: &str, value: u64) {
        self.insert(name, NvValue::Number(value));
    }

    fn add_binary(&mut self, name: &str, value: &[u8]) {
        self.insert(name, NvValue::Binary(value.to_vec()));
    }

    fn add_string(&mut self, name: &str, value: &str) {
        self.insert(name, NvValue::String(value.to_string()));
    }

    fn add_nvlist(&mut self, name: &str, value: Self) {
        self.insert(name, NvValue::Nvlist(value));
    }
}

impl Serialize for NvList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (name, value) in &self.pairs {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct NvListVisitor;

impl<'de> Visitor<'de> for NvListVisitor {
    type Value = NvList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of names to tagged values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<NvList, A::Error> {
        let mut list = NvList::new();
        while let Some((name, value)) = access.next_entry::<String, NvValue>()? {
            if list.get(&name).is_some() {
                return Err(de::Error::custom(format!("duplicate name `{}`", name)));
            }
            list.pairs.push((name, value));
        }
        Ok(list)
    }
}

impl<'de> Deserialize<'de> for NvList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NvListVisitor)
    }
}
