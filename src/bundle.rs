//!
//!

use crate::prelude::*;
use bevy::prelude::*;

/// All the components describing one navigable world: the grid resolution,
/// the mirrored voxel terrain, the waypoint grids of loaded sectors and the
/// cache of solved routes
#[derive(Bundle)]
pub struct WaypointTilesBundle {
	/// Resolution of the sector grid
	grid_dimensions: GridDimensions,
	/// Mirrored per-sector voxel terrain
	sector_voxels: SectorVoxels,
	/// Navigation grids of loaded sectors
	sector_waypoints: SectorWaypoints,
	/// Solved routes shared between actors
	path_cache: PathCache,
}

impl WaypointTilesBundle {
	/// Create a new instance of [WaypointTilesBundle] with no sectors loaded
	pub fn new(tiles_per_line: u32, tile_size: f32) -> Self {
		let grid_dimensions = GridDimensions::new(tiles_per_line, tile_size);
		WaypointTilesBundle {
			grid_dimensions,
			sector_voxels: SectorVoxels::default(),
			sector_waypoints: SectorWaypoints::default(),
			path_cache: PathCache::default(),
		}
	}
	/// Create a new instance of [WaypointTilesBundle] where the [SectorVoxels]
	/// are derived from disk and a navigation grid is built for every sector
	/// of the snapshot
	#[cfg(feature = "ron")]
	pub fn new_from_disk(tiles_per_line: u32, tile_size: f32, path: &str) -> Self {
		let grid_dimensions = GridDimensions::new(tiles_per_line, tile_size);
		let sector_voxels = SectorVoxels::from_file(path.to_string());
		let mut sector_waypoints = SectorWaypoints::default();
		let sector_ids: Vec<SectorID> = sector_voxels.get().keys().cloned().collect();
		for sector_id in sector_ids.iter() {
			sector_waypoints.load_sector(
				*sector_id,
				&grid_dimensions,
				sector_voxels.get_sector(sector_id),
			);
		}
		WaypointTilesBundle {
			grid_dimensions,
			sector_voxels,
			sector_waypoints,
			path_cache: PathCache::default(),
		}
	}
}
