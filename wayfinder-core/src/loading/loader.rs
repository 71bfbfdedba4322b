use std::fs;

use super::{config::FloorSourceConfig, parser::parse_feature_collection};
use crate::{
    Error,
    model::{FloorFeature, FloorId},
};

/// Source of per-floor features
pub trait FloorLoader: Sync {
    /// # Errors
    ///
    /// Returns `GeometryLoad` when the floor cannot be read or parsed
    fn load_floor(&self, floor: &FloorId) -> Result<Vec<FloorFeature>, Error>;
}

/// Reads one GeoJSON document per floor from a directory
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    config: FloorSourceConfig,
}

impl DirectoryLoader {
    pub fn new(config: FloorSourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FloorSourceConfig {
        &self.config
    }
}

impl FloorLoader for DirectoryLoader {
    fn load_floor(&self, floor: &FloorId) -> Result<Vec<FloorFeature>, Error> {
        let path = self.config.file_for(floor);
        let load_error = |reason: String| Error::GeometryLoad {
            floor: floor.clone(),
            reason: format!("{}: {reason}", path.display()),
        };

        let text = fs::read_to_string(&path).map_err(|e| load_error(e.to_string()))?;
        parse_feature_collection(&text).map_err(|e| load_error(e.to_string()))
    }
}
