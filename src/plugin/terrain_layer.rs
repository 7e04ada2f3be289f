//! Logic for handling sector streaming and voxel terrain edits which in turn
//! rebuild [WaypointField] flags and clean cached routes which may of been
//! made invalid by the terrain change
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Notifies that the host has streamed a sector in and terrain data for it
/// is available, a navigation grid should be built
#[derive(Event)]
pub struct EventSectorLoaded {
	/// The sector that became active
	sector: SectorID,
}

impl EventSectorLoaded {
	/// Create a new instance of [EventSectorLoaded]
	#[cfg(not(tarpaulin_include))]
	pub fn new(sector: SectorID) -> Self {
		EventSectorLoaded { sector }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_sector(&self) -> SectorID {
		self.sector
	}
}

/// Notifies that the host has streamed a sector out, its navigation grid
/// should be dropped
#[derive(Event)]
pub struct EventSectorUnloaded {
	/// The sector that became inactive
	sector: SectorID,
}

impl EventSectorUnloaded {
	/// Create a new instance of [EventSectorUnloaded]
	#[cfg(not(tarpaulin_include))]
	pub fn new(sector: SectorID) -> Self {
		EventSectorUnloaded { sector }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_sector(&self) -> SectorID {
		self.sector
	}
}

/// Notifies that a box of voxel terrain has been edited. The box is given in
/// global tile coordinates and must sit within a single sector, edits
/// spanning sectors should be sent as one event per sector
#[derive(Event)]
pub struct EventTerrainChange {
	/// Global tile coordinates of the corner of the edited box closest to
	/// the world origin
	tile: (u32, u32, u32),
	/// Extent of the edited box in tiles along each axis
	size: (u32, u32, u32),
}

impl EventTerrainChange {
	/// Create a new instance of [EventTerrainChange]
	#[cfg(not(tarpaulin_include))]
	pub fn new(tile: (u32, u32, u32), size: (u32, u32, u32)) -> Self {
		EventTerrainChange { tile, size }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_tile(&self) -> (u32, u32, u32) {
		self.tile
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_size(&self) -> (u32, u32, u32) {
		self.size
	}
}

/// Read [EventSectorLoaded] and build the navigation grid of each freshly
/// streamed sector from whatever terrain data has arrived for it
#[cfg(not(tarpaulin_include))]
pub fn process_sector_loads(
	mut events: EventReader<EventSectorLoaded>,
	mut query: Query<(&mut SectorWaypoints, &SectorVoxels, &GridDimensions)>,
) {
	for event in events.read() {
		let sector = event.get_sector();
		for (mut sector_waypoints, sector_voxels, dimensions) in query.iter_mut() {
			debug!("Building waypoints of sector {:?}", sector.get());
			sector_waypoints.load_sector(sector, dimensions, sector_voxels.get_sector(&sector));
		}
	}
}

/// Read [EventSectorUnloaded] and drop the navigation grid of each sector
/// that streamed out
#[cfg(not(tarpaulin_include))]
pub fn process_sector_unloads(
	mut events: EventReader<EventSectorUnloaded>,
	mut query: Query<&mut SectorWaypoints>,
) {
	for event in events.read() {
		let sector = event.get_sector();
		for mut sector_waypoints in query.iter_mut() {
			sector_waypoints.unload_sector(&sector);
		}
	}
}

/// Read [EventTerrainChange] and rebuild the waypoint flags of the edited
/// regions, marking the touched sectors so stale cached routes get purged
#[cfg(not(tarpaulin_include))]
pub fn process_terrain_changes(
	mut events: EventReader<EventTerrainChange>,
	mut query: Query<(&mut SectorWaypoints, &SectorVoxels, &GridDimensions)>,
	mut event_clean_paths: EventWriter<EventCleanPaths>,
) {
	// coalesce events to avoid processing duplicates
	let mut dirty_sectors = Vec::new();
	for event in events.read() {
		for (mut sector_waypoints, sector_voxels, dimensions) in query.iter_mut() {
			let (sector, _) = dimensions.get_sector_and_cell_from_tile(event.get_tile());
			let handled = sector_waypoints.rebuild_tiles(
				sector_voxels,
				dimensions,
				event.get_tile(),
				event.get_size(),
			);
			if handled && !dirty_sectors.contains(&sector) {
				dirty_sectors.push(sector);
			}
		}
	}
	for sector in dirty_sectors.iter() {
		debug!("Rebuilt waypoints of sector {:?}", sector.get());
		event_clean_paths.write(EventCleanPaths(*sector));
	}
}

/// For the given sector any cached [Path] making use of it needs to have its
/// entry removed and a new request made to regenerate the route
#[derive(Event)]
pub struct EventCleanPaths(SectorID);

/// Lookup any cached routes making use of sectors that have had their
/// terrain adjusted and remove them from the cache, the steering pipeline or
/// character controller polls the cache and requests a fresh route
#[cfg(not(tarpaulin_include))]
pub fn clean_dirty_paths(
	mut events: EventReader<EventCleanPaths>,
	mut query: Query<(&mut PathCache, &GridDimensions)>,
) {
	let mut sectors = Vec::new();
	for event in events.read() {
		sectors.push(event.0);
	}
	if !sectors.is_empty() {
		for (mut cache, dimensions) in query.iter_mut() {
			let mut to_purge = Vec::new();
			'next: for (metadata, path) in cache.get().iter() {
				for id in sectors.iter() {
					if *id == metadata.get_source_sector() {
						to_purge.push(*metadata);
						continue 'next;
					}
					if *id == metadata.get_target_sector() {
						to_purge.push(*metadata);
						continue 'next;
					}
					for point in path.get_points().iter() {
						if let Some((point_sector, _)) =
							dimensions.get_sector_and_cell_from_position(*point)
						{
							if point_sector == *id {
								to_purge.push(*metadata);
								continue 'next;
							}
						}
					}
				}
			}
			for purge_me in to_purge.iter() {
				cache.remove_path(*purge_me);
			}
		}
	}
}
