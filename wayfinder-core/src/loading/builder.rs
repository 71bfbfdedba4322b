use log::{info, warn};
use rayon::prelude::*;

use super::loader::FloorLoader;
use crate::{
    Error,
    model::{FloorId, FloorSnapshot},
};

/// Loads every requested floor into a snapshot.
///
/// Floors are read in parallel. A floor that fails to load is recorded in
/// the snapshot's failures and does not prevent the others from loading.
///
/// # Errors
///
/// Returns an error if no floors are requested or none of them could be
/// loaded
pub fn load_snapshot(loader: &dyn FloorLoader, floors: &[FloorId]) -> Result<FloorSnapshot, Error> {
    if floors.is_empty() {
        return Err(Error::InvalidData(
            "No floors provided in the configuration".to_string(),
        ));
    }

    info!("Loading {} floors", floors.len());

    let results: Vec<_> = floors
        .par_iter()
        .map(|floor| (floor.clone(), loader.load_floor(floor)))
        .collect();

    let mut snapshot = FloorSnapshot::new();
    for (floor, result) in results {
        match result {
            Ok(features) => {
                info!("Floor {floor}: {} features", features.len());
                snapshot.insert_floor(floor, features);
            }
            Err(e) => {
                warn!("Floor {floor} could not be loaded: {e}");
                snapshot.record_failure(floor, e.to_string());
            }
        }
    }

    if snapshot.floor_count() == 0 {
        return Err(Error::InvalidData(format!(
            "None of the {} requested floors could be loaded",
            floors.len()
        )));
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use geo::point;
    use hashbrown::HashMap;

    use super::*;
    use crate::model::{FeatureGeometry, FloorFeature};

    struct MemoryLoader(HashMap<FloorId, Vec<FloorFeature>>);

    impl FloorLoader for MemoryLoader {
        fn load_floor(&self, floor: &FloorId) -> Result<Vec<FloorFeature>, Error> {
            self.0.get(floor).cloned().ok_or_else(|| Error::GeometryLoad {
                floor: floor.clone(),
                reason: "missing".to_string(),
            })
        }
    }

    fn loader() -> MemoryLoader {
        let corridor = FloorFeature::new(
            FeatureGeometry::Point(point!(x: 0.0, y: 0.0)),
            [("indoor", "corridor")].into_iter().collect(),
        );
        let mut floors = HashMap::new();
        floors.insert(FloorId::from("0"), vec![corridor.clone(), corridor]);
        floors.insert(FloorId::from("1"), vec![]);
        MemoryLoader(floors)
    }

    #[test]
    fn test_partial_failure_is_recorded() {
        let floors: Vec<FloorId> = ["0", "1", "2"].into_iter().map(FloorId::from).collect();
        let snapshot = load_snapshot(&loader(), &floors).unwrap();

        assert_eq!(snapshot.floor_count(), 2);
        assert_eq!(snapshot.feature_count(), 2);
        assert_eq!(snapshot.failures().len(), 1);
        assert_eq!(snapshot.failures()[0].floor, FloorId::from("2"));
    }

    #[test]
    fn test_all_floors_failing_is_an_error() {
        let floors = vec![FloorId::from("5"), FloorId::from("6")];
        assert!(matches!(
            load_snapshot(&loader(), &floors),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_no_floors_requested() {
        assert!(matches!(
            load_snapshot(&loader(), &[]),
            Err(Error::InvalidData(_))
        ));
    }
}
