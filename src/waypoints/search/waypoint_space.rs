//! Adapts the generic A* engine to the loaded waypoint grids, stepping
//! through the 26-cell neighbourhood of each waypoint and crossing sector
//! boundaries by resolving the sibling grid from the loaded set on every
//! probe. Sector references are never cached between calls as sectors may be
//! unloaded between searches.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A view over the loaded waypoint grids that the search engine can walk.
/// Nodes are `(sector, cell)` pairs so a route can span any number of
/// sectors without the engine knowing they exist
pub struct WaypointSearchSpace<'a> {
	/// The loaded waypoint grids
	sectors: &'a SectorWaypoints,
	/// Grid resolution for coordinate conversion
	dimensions: &'a GridDimensions,
}

impl<'a> WaypointSearchSpace<'a> {
	/// Create a new instance of [WaypointSearchSpace]
	pub fn new(sectors: &'a SectorWaypoints, dimensions: &'a GridDimensions) -> Self {
		WaypointSearchSpace {
			sectors,
			dimensions,
		}
	}
	/// World-space position of a node
	fn get_node_position(&self, node: (SectorID, TileCell)) -> Vec3 {
		self.dimensions
			.get_position_from_sector_and_cell(node.0, node.1)
	}
	/// Shift one local coordinate by a neighbour offset, stepping into the
	/// adjacent sector when it leaves the `[0, tiles_per_line)` range.
	/// Returns [None] when the step would fall off the bottom of the sector
	/// grid
	fn resolve_axis(
		local: usize,
		sector: u32,
		offset: i32,
		tiles_per_line: usize,
	) -> Option<(usize, u32)> {
		let shifted = local as i64 + offset as i64;
		if shifted < 0 {
			if sector == 0 {
				None
			} else {
				Some(((shifted + tiles_per_line as i64) as usize, sector - 1))
			}
		} else if shifted >= tiles_per_line as i64 {
			Some(((shifted - tiles_per_line as i64) as usize, sector + 1))
		} else {
			Some((shifted as usize, sector))
		}
	}
}

impl<'a> SearchSpace for WaypointSearchSpace<'a> {
	type Node = (SectorID, TileCell);
	/// Euclidean distance between the two waypoints weighted against upward
	/// movement so that routes prefer staying level where they can
	fn cost(&self, from: Self::Node, to: Self::Node) -> f32 {
		let a = self.get_node_position(from);
		let b = self.get_node_position(to);
		a.distance(b) + CLIMB_PENALTY * (b.y - a.y).max(0.0)
	}
	/// Manhattan distance between the two waypoints
	fn heuristic(&self, from: Self::Node, to: Self::Node) -> f32 {
		let a = self.get_node_position(from);
		let b = self.get_node_position(to);
		(a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
	}
	/// Steps between walkable waypoints are unconditionally passable
	//TODO clearance checks so larger actors avoid one-tile openings
	fn passable(&self, _from: Self::Node, _to: Self::Node) -> bool {
		true
	}
	/// The walkable waypoints among the 26 cells surrounding `node`, in the
	/// fixed order of [NEIGHBOUR_OFFSETS]. Stepping into an unloaded sector
	/// or below the floor of the sector grid simply drops that neighbour
	fn successors(&self, node: Self::Node) -> Vec<Self::Node> {
		let (sector, cell) = node;
		let tiles_per_line = self.dimensions.get_tiles_per_line() as usize;
		let mut neighbours = Vec::new();
		for (dx, dy, dz) in NEIGHBOUR_OFFSETS.iter() {
			let Some((x, sector_x)) =
				Self::resolve_axis(cell.get_x(), sector.get_x(), *dx, tiles_per_line)
			else {
				continue;
			};
			let Some((y, sector_y)) =
				Self::resolve_axis(cell.get_y(), sector.get_y(), *dy, tiles_per_line)
			else {
				continue;
			};
			let Some((z, sector_z)) =
				Self::resolve_axis(cell.get_z(), sector.get_z(), *dz, tiles_per_line)
			else {
				continue;
			};
			let neighbour_sector = SectorID::new(sector_x, sector_y, sector_z);
			let neighbour_cell = TileCell::new(x, y, z);
			if let Some(waypoint) = self.sectors.get_waypoint(neighbour_sector, neighbour_cell) {
				if waypoint.is_walkable() {
					neighbours.push((neighbour_sector, neighbour_cell));
				}
			}
		}
		neighbours
	}
}
