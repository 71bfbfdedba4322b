//! Geometry helpers shared by every routing component

use geo::{Coord, Distance, Haversine, LineString, Point, Polygon};

/// Supported floor plan geometries
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl FeatureGeometry {
    /// All vertices in file order (the exterior ring for polygons)
    pub fn vertices(&self) -> &[Coord<f64>] {
        match self {
            FeatureGeometry::Point(point) => std::slice::from_ref(&point.0),
            FeatureGeometry::LineString(line) => &line.0,
            FeatureGeometry::Polygon(polygon) => &polygon.exterior().0,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureGeometry::Point(_) => "Point",
            FeatureGeometry::LineString(_) => "LineString",
            FeatureGeometry::Polygon(_) => "Polygon",
        }
    }
}

/// Representative point of a feature: the vertex at index `n / 2`.
///
/// This is a deliberate simplification rather than a centroid. The graph
/// builder, the nearest node resolver, the segmenter and route endpoints all
/// anchor stairs and features through this one function so they agree on the
/// same vertex.
pub fn index_midpoint(geometry: &FeatureGeometry) -> Option<Coord<f64>> {
    let vertices = geometry.vertices();
    vertices.get(vertices.len() / 2).copied()
}

/// Great-circle distance in metres
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point, polygon};

    use super::*;

    #[test]
    fn test_index_midpoint_point() {
        let geometry = FeatureGeometry::Point(point!(x: 123.75, y: 8.06));
        assert_eq!(index_midpoint(&geometry), Some(Coord { x: 123.75, y: 8.06 }));
    }

    #[test]
    fn test_index_midpoint_linestring_uses_floor_index() {
        let even = FeatureGeometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 3.0, y: 0.0),
        ]);
        assert_eq!(index_midpoint(&even), Some(Coord { x: 2.0, y: 0.0 }));

        let odd = FeatureGeometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 2.0, y: 0.0),
        ]);
        assert_eq!(index_midpoint(&odd), Some(Coord { x: 1.0, y: 0.0 }));
    }

    #[test]
    fn test_index_midpoint_polygon_uses_exterior_ring() {
        // Closed ring has 5 vertices, index 2 is the opposite corner
        let geometry = FeatureGeometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]);
        assert_eq!(index_midpoint(&geometry), Some(Coord { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn test_index_midpoint_empty_line() {
        let geometry = FeatureGeometry::LineString(LineString::new(vec![]));
        assert_eq!(index_midpoint(&geometry), None);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = Coord { x: 123.7565, y: 8.0651 };
        let b = Coord { x: 123.7570, y: 8.0655 };
        let ab = haversine_distance(a, b);
        assert!(ab > 50.0 && ab < 80.0);
        assert!((ab - haversine_distance(b, a)).abs() < 1e-9);
    }
}
