//! Canonical graph node identity.
//!
//! Floating point coordinates are never compared directly: every coordinate
//! is rounded to a fixed number of decimal degrees and stored as integers, so
//! two vertices that describe the same location on the same floor always map
//! to the same node.

use std::fmt;

use geo::Coord;

use super::FloorId;

/// Fixed-point scale: 1e-7 degrees, roughly one centimetre
pub const COORD_SCALE: f64 = 1e7;

/// Latitude/longitude rounded to [`COORD_SCALE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedCoord {
    pub lat: i64,
    pub lon: i64,
}

impl FixedCoord {
    /// Round a `geo` coordinate (x = longitude, y = latitude)
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_coord(coord: Coord<f64>) -> Self {
        Self {
            lat: (coord.y * COORD_SCALE).round() as i64,
            lon: (coord.x * COORD_SCALE).round() as i64,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lon as f64 / COORD_SCALE,
            y: self.lat as f64 / COORD_SCALE,
        }
    }
}

impl From<Coord<f64>> for FixedCoord {
    fn from(coord: Coord<f64>) -> Self {
        Self::from_coord(coord)
    }
}

/// Graph node key: a rounded position on one floor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub position: FixedCoord,
    pub floor: FloorId,
}

impl NodeKey {
    pub fn new(coord: Coord<f64>, floor: FloorId) -> Self {
        Self {
            position: FixedCoord::from_coord(coord),
            floor,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coord = self.position.to_coord();
        write!(f, "({:.7}, {:.7}) on floor {}", coord.y, coord.x, self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_coordinates_collapse() {
        let a = NodeKey::new(Coord { x: 123.756515, y: 8.065151 }, FloorId::from("0"));
        let b = NodeKey::new(
            Coord {
                x: 123.756515 + 1e-12,
                y: 8.065151 - 1e-12,
            },
            FloorId::from("0"),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_floor_is_part_of_identity() {
        let coord = Coord { x: 123.75, y: 8.06 };
        assert_ne!(
            NodeKey::new(coord, FloorId::from("0")),
            NodeKey::new(coord, FloorId::from("1"))
        );
    }

    #[test]
    fn test_fixed_coord_round_trip_precision() {
        let coord = Coord {
            x: 123.7565151,
            y: 8.0651519,
        };
        let back = FixedCoord::from_coord(coord).to_coord();
        assert!((back.x - coord.x).abs() < 1e-9);
        assert!((back.y - coord.y).abs() < 1e-9);
    }
}
