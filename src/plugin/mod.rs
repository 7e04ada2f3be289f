//! Defines the Bevy [Plugin] for WaypointTiles
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod path_layer;
pub mod terrain_layer;

/// Separates cache tidying from grid rebuilds and route calculation so stale
/// records are gone before new work is published
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	Tidy,
	Calculate,
}

/// Registers the types, events and systems that keep waypoint grids in step
/// with the terrain and serve route requests
pub struct WaypointTilesPlugin;

impl Plugin for WaypointTilesPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<SectorID>()
			.register_type::<TileCell>()
			.register_type::<GridDimensions>()
			.register_type::<WaypointFlags>()
			.register_type::<Waypoint>()
			.register_type::<PathMetadata>()
			.add_event::<terrain_layer::EventSectorLoaded>()
			.add_event::<terrain_layer::EventSectorUnloaded>()
			.add_event::<terrain_layer::EventTerrainChange>()
			.add_event::<terrain_layer::EventCleanPaths>()
			.add_event::<path_layer::EventPathRequest>()
			.configure_sets(Update, (OrderingSet::Tidy, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					path_layer::cleanup_old_paths.in_set(OrderingSet::Tidy),
					(
						terrain_layer::process_sector_unloads,
						terrain_layer::process_sector_loads,
						terrain_layer::process_terrain_changes,
						terrain_layer::clean_dirty_paths,
						path_layer::process_path_requests,
					)
						.chain()
						.in_set(OrderingSet::Calculate),
				),
			);
	}
}
