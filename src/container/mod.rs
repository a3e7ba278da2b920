//! The key/value container the codec marshals into.
//!
//! The codec only ever talks to a container through [`WireContainer`], so a
//! platform nvlist binding can be dropped in next to the bundled [`NvList`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod nvlist;
pub use nvlist::{NvList, NvValue};

/// Type tag of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Binary,
    String,
    Nvlist,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Number => "number",
            ValueKind::Binary => "binary",
            ValueKind::String => "string",
            ValueKind::Nvlist => "nvlist",
        };
        f.write_str(name)
    }
}

/// Ordered, self-describing name/value container.
///
/// Getters return `None` when the name is absent *or* holds a value of
/// another kind; use [`WireContainer::kind`] to tell the two apart.  Adding
/// a name that already exists replaces its value.
pub trait WireContainer: Sized {
    /// Create an empty container.
    fn new_empty() -> Self;

    /// Kind of the value stored under `name`, if any.
    fn kind(&self, name: &str) -> Option<ValueKind>;

    fn exists(&self, name: &str) -> bool {
        self.kind(name).is_some()
    }

    fn get_number(&self, name: &str) -> Option<u64>;
    fn get_binary(&self, name: &str) -> Option<&[u8]>;
    fn get_string(&self, name: &str) -> Option<&str>;
    fn get_nvlist(&self, name: &str) -> Option<&Self>;

    fn add_number(&mut self, name: &str, value: u64);
    fn add_binary(&mut self, name: &str, value: &[u8]);
    fn add_string(&mut self, name: &str, value: &str);
    fn add_nvlist(&mut self, name: &str, value: Self);
}
