//! Splitting of a solved path into per-floor segments and stair transitions

use geo::Coord;
use log::warn;
use thiserror::Error;

use super::path::Path;
use crate::{
    graph::StairRecord,
    model::{FixedCoord, FloorId},
};

/// Contiguous run of path coordinates on one floor
#[derive(Debug, Clone, PartialEq)]
pub struct FloorSegment {
    pub floor: FloorId,
    pub coords: Vec<Coord<f64>>,
}

/// A floor change along the path
#[derive(Debug, Clone, PartialEq)]
pub struct StairTransition {
    pub from_floor: FloorId,
    pub to_floor: FloorId,
    /// First path coordinate on the new floor
    pub coordinate: Coord<f64>,
    pub stair_name: String,
}

/// Non-fatal problems found while naming stair transitions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteWarning {
    #[error("Several stairs match transition at {coordinate:?}: {}", .candidates.join(", "))]
    AmbiguousStairMatch {
        coordinate: Coord<f64>,
        candidates: Vec<String>,
    },
    #[error("No stair matches transition from floor {from_floor} to {to_floor} at {coordinate:?}")]
    StairNotFound {
        coordinate: Coord<f64>,
        from_floor: FloorId,
        to_floor: FloorId,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    /// In visiting order, a floor may appear more than once
    pub segments: Vec<FloorSegment>,
    pub transitions: Vec<StairTransition>,
    pub warnings: Vec<RouteWarning>,
}

/// Decompose `path` into per-floor segments and the stair transitions
/// between them. Unnamed or unmatched stairs are labelled `stair_label`.
pub fn segment_path(path: &Path, stairs: &[StairRecord], stair_label: &str) -> Segmentation {
    let Some(first) = path.first() else {
        return Segmentation::default();
    };

    let mut result = Segmentation::default();
    let mut current = FloorSegment {
        floor: first.floor().clone(),
        coords: vec![first.coord],
    };

    for pair in path.waypoints.windows(2) {
        let (previous, point) = (&pair[0], &pair[1]);

        if point.floor() == previous.floor() {
            current.coords.push(point.coord);
            continue;
        }

        let next = FloorSegment {
            floor: point.floor().clone(),
            coords: vec![point.coord],
        };
        result.segments.push(std::mem::replace(&mut current, next));

        let (stair_name, warning) = match_stair(
            stairs,
            point.key.position,
            point.coord,
            previous.floor(),
            point.floor(),
            stair_label,
        );
        if let Some(warning) = warning {
            warn!("{warning}");
            result.warnings.push(warning);
        }

        result.transitions.push(StairTransition {
            from_floor: previous.floor().clone(),
            to_floor: point.floor().clone(),
            coordinate: point.coord,
            stair_name,
        });
    }
    result.segments.push(current);

    result
}

fn match_stair(
    stairs: &[StairRecord],
    position: FixedCoord,
    coordinate: Coord<f64>,
    from: &FloorId,
    to: &FloorId,
    stair_label: &str,
) -> (String, Option<RouteWarning>) {
    let mut names: Vec<&str> = Vec::new();
    for stair in stairs
        .iter()
        .filter(|s| s.connects(from, to) && s.touches(position))
    {
        if !names.contains(&stair.name.as_str()) {
            names.push(&stair.name);
        }
    }

    match names.as_slice() {
        [] => (
            stair_label.to_string(),
            Some(RouteWarning::StairNotFound {
                coordinate,
                from_floor: from.clone(),
                to_floor: to.clone(),
            }),
        ),
        [name] => ((*name).to_string(), None),
        [name, ..] => (
            (*name).to_string(),
            Some(RouteWarning::AmbiguousStairMatch {
                coordinate,
                candidates: names.iter().map(ToString::to_string).collect(),
            }),
        ),
    }
}
