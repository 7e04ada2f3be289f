//! The set of [WaypointField] for every loaded sector and the top-level
//! operations over them: resolving world positions to waypoints, solving
//! routes and rebuilding flags when the terrain changes
//!
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Keys are the unique IDs of loaded sectors and values are the
/// [WaypointField] navigation grid of each sector. Grids only exist for
/// loaded sectors, they are created through [SectorWaypoints::load_sector]
/// when the host streams a sector in and dropped through
/// [SectorWaypoints::unload_sector] when it streams out, queries against
/// anything else resolve to [None]
#[derive(Component, Default, Clone)]
pub struct SectorWaypoints {
	/// The navigation grid of every loaded sector
	sectors: BTreeMap<SectorID, WaypointField>,
}

impl SectorWaypoints {
	/// Get a reference to the map of sectors and [WaypointField]
	pub fn get(&self) -> &BTreeMap<SectorID, WaypointField> {
		&self.sectors
	}
	/// Get a mutable reference to the map of sectors and [WaypointField]
	pub fn get_mut(&mut self) -> &mut BTreeMap<SectorID, WaypointField> {
		&mut self.sectors
	}
	/// Get the [WaypointField] of a sector. Returns [None] if the sector is
	/// not loaded
	pub fn get_sector(&self, sector: &SectorID) -> Option<&WaypointField> {
		self.sectors.get(sector)
	}
	/// Create the navigation grid of a sector and build its flags from the
	/// supplied terrain, or with every flag clear when the terrain of the
	/// sector hasn't arrived yet. Both vertical seams against already loaded
	/// neighbours are reconciled once the grid is in place
	pub fn load_sector<V: VoxelSampler>(
		&mut self,
		sector: SectorID,
		dimensions: &GridDimensions,
		voxels: Option<&V>,
	) {
		let mut field = WaypointField::new(sector, dimensions);
		field.build(voxels);
		self.sectors.insert(sector, field);
		self.reconcile_borders(sector, dimensions);
	}
	/// Drop the navigation grid of a sector
	pub fn unload_sector(&mut self, sector: &SectorID) {
		self.sectors.remove(sector);
	}
	/// Run the border pass over the full face between `sector` and each of
	/// its loaded vertical neighbours. Grids are briefly lifted out of the
	/// map so one seam partner can be written while the other is read
	fn reconcile_borders(&mut self, sector: SectorID, dimensions: &GridDimensions) {
		let tiles = dimensions.get_tiles_per_line() as usize;
		let above_id = sector.get_sector_above();
		if self.sectors.contains_key(&above_id) {
			let mut current = self.sectors.remove(&sector).unwrap();
			let above = self.sectors.get(&above_id).unwrap();
			current.build_border(above, (0, 0), (tiles, tiles));
			self.sectors.insert(sector, current);
		}
		if let Some(below_id) = sector.get_sector_below() {
			if self.sectors.contains_key(&below_id) {
				let mut below = self.sectors.remove(&below_id).unwrap();
				let current = self.sectors.get(&sector).unwrap();
				below.build_border(current, (0, 0), (tiles, tiles));
				self.sectors.insert(below_id, below);
			}
		}
	}
	/// Retrieve the waypoint of a cell within a sector. Returns [None] if
	/// the sector is not loaded
	pub fn get_waypoint(&self, sector: SectorID, cell: TileCell) -> Option<&Waypoint> {
		self.sectors
			.get(&sector)
			.map(|field| field.get_waypoint(cell))
	}
	/// Retrieve the waypoint whose tile a world-space position rounds into.
	/// Returns [None] for positions outside the sector grid or within an
	/// unloaded sector, no sector is ever loaded on behalf of a query
	pub fn find_waypoint(&self, dimensions: &GridDimensions, position: Vec3) -> Option<&Waypoint> {
		let (sector, cell) = dimensions.get_sector_and_cell_from_position(position)?;
		self.get_waypoint(sector, cell)
	}
	/// Solve a route between two world-space positions across the loaded
	/// sectors. Returns [None] when either endpoint fails to resolve to a
	/// waypoint or no walkable route connects them - a common outcome around
	/// partially streamed terrain, not an error
	pub fn find_path(
		&self,
		dimensions: &GridDimensions,
		source: Vec3,
		target: Vec3,
	) -> Option<Path> {
		let start = self.find_waypoint(dimensions, source)?;
		let goal = self.find_waypoint(dimensions, target)?;
		let start_node = (start.get_sector(), start.get_cell());
		let goal_node = (goal.get_sector(), goal.get_cell());
		let space = WaypointSearchSpace::new(self, dimensions);
		let nodes = solve(&space, start_node, goal_node, None)?;
		let mut path = Path::new();
		for (sector, cell) in nodes.iter() {
			path.add_point(dimensions.get_position_from_sector_and_cell(*sector, *cell));
		}
		Some(path)
	}
	/// Rebuild the waypoint flags covering a box of edited terrain given in
	/// global tile coordinates, the box must sit within a single sector.
	/// Returns `true` once the notification is handled which includes the
	/// no-op case of the sector lacking a navigation grid or terrain data,
	/// both load independently and a half-streamed sector is not an error
	///
	/// Edits touching the bottom or top face of the sector additionally
	/// reconcile the seam with the stacked neighbour as walkability along a
	/// face depends on tiles held by a different grid
	pub fn rebuild_tiles(
		&mut self,
		voxels: &SectorVoxels,
		dimensions: &GridDimensions,
		tile: (u32, u32, u32),
		size: (u32, u32, u32),
	) -> bool {
		let (sector, cell) = dimensions.get_sector_and_cell_from_tile(tile);
		let box_size = (size.0 as usize, size.1 as usize, size.2 as usize);
		let Some(voxel_field) = voxels.get_sector(&sector) else {
			return true;
		};
		let Some(field) = self.sectors.get_mut(&sector) else {
			return true;
		};
		field.build_area(Some(voxel_field), cell, box_size);
		let tiles_per_line = dimensions.get_tiles_per_line() as usize;
		if cell.get_y() == 0 {
			// the edit redefines the bottom face so the walkability of the
			// top face of the sector below needs recomputing
			if let Some(below_id) = sector.get_sector_below() {
				if self.sectors.contains_key(&below_id) {
					let mut below = self.sectors.remove(&below_id).unwrap();
					let current = self.sectors.get(&sector).unwrap();
					below.build_border(
						current,
						(cell.get_x(), cell.get_z()),
						(box_size.0, box_size.2),
					);
					self.sectors.insert(below_id, below);
				}
			}
		} else if cell.get_y() == tiles_per_line - box_size.1 {
			// the edit reaches the top face whose walkability depends on the
			// bottom face of the sector above
			let above_id = sector.get_sector_above();
			if self.sectors.contains_key(&above_id) {
				let mut current = self.sectors.remove(&sector).unwrap();
				let above = self.sectors.get(&above_id).unwrap();
				current.build_border(
					above,
					(cell.get_x(), cell.get_z()),
					(box_size.0, box_size.2),
				);
				self.sectors.insert(sector, current);
			}
		}
		true
	}
}
