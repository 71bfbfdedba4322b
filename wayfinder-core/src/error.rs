use thiserror::Error;

use crate::model::{FloorId, NodeKey};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load floor {floor}: {reason}")]
    GeometryLoad { floor: FloorId, reason: String },
    #[error("No walkable geometry or stairs on floor {0}")]
    NoWalkableGeometryOnFloor(FloorId),
    #[error("No path between {from} and {to}")]
    Disconnected { from: NodeKey, to: NodeKey },
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
