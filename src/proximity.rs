//! Proximity trigger: one-shot visits when the camera enters a location's box.

use crate::locations::{AssetHandle, LocationRegistry};
use crate::motion::UniverseCoordinate;

/// A location that was just visited
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub index: usize,
    pub name: String,
    pub asset: Option<AssetHandle>,
}

/// Mark every unvisited location containing `at` as visited and return them
/// in registry order.
pub fn scan(registry: &mut LocationRegistry, at: UniverseCoordinate) -> Vec<Visit> {
    puffin::profile_function!();

    let mut visits = Vec::new();
    for index in 0..registry.len() {
        let Some(location) = registry.get_mut(index) else {
            continue;
        };
        if location.is_visited() || !location.contains(at) {
            continue;
        }
        location.visit();
        log::info!(
            "Visited '{}' at ({:.2}, {:.2}, {:.2})",
            location.name,
            at.x,
            at.y,
            at.zoom_size
        );
        visits.push(Visit {
            index,
            name: location.name.clone(),
            asset: location.asset.clone(),
        });
    }
    visits
}
