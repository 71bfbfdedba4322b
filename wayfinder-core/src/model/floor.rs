use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a building level (`"0"`, `"1"`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(String);

impl FloorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FloorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FloorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Parse a `level` attribute such as `"0;1"` into floor identifiers.
///
/// Entries are trimmed, empty entries are dropped and repeated floors keep
/// their first position.
pub fn parse_levels(raw: &str) -> Vec<FloorId> {
    let mut floors: Vec<FloorId> = Vec::new();
    for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        if !floors.iter().any(|f| f.as_str() == part) {
            floors.push(FloorId::from(part));
        }
    }
    floors
}
