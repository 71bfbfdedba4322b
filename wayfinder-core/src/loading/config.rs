use std::path::PathBuf;

use serde::Deserialize;

use crate::model::FloorId;

/// Where floor plans live on disk and which floors to load
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FloorSourceConfig {
    pub dir: PathBuf,
    pub floors: Vec<FloorId>,
    /// File name with a `{floor}` placeholder
    pub file_pattern: String,
}

impl Default for FloorSourceConfig {
    fn default() -> Self {
        Self::new("floor_levels")
    }
}

impl FloorSourceConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            floors: default_floors(),
            file_pattern: default_file_pattern(),
        }
    }

    pub fn file_for(&self, floor: &FloorId) -> PathBuf {
        self.dir
            .join(self.file_pattern.replace("{floor}", floor.as_str()))
    }
}

fn default_floors() -> Vec<FloorId> {
    ["0", "1", "2"].into_iter().map(FloorId::from).collect()
}

fn default_file_pattern() -> String {
    "Level{floor}.json".to_string()
}
