//! The WaypointField contains a dense 3D array of [Waypoint] covering every
//! tile of one sector. Flags are recomputed from the voxel data for whatever
//! region a rebuild touches rather than patched incrementally, trading some
//! redundant work for never carrying stale flags.
//!
//! A vertical slice through a field where a ledge sits above a floor:
//!
//! ```text
//!  y
//!  3 |__|__|__|__|__|__|__|__|
//!  2 |__|__|__|w_|w_|__|__|__|
//!  1 |w_|w_|xx|xx|xx|w_|w_|w_|
//!  0 |xx|xx|xx|xx|xx|xx|xx|xx|
//! ```
//!
//! `x` marks solid tiles, `w` marks waypoints carrying the walkable flag and
//! the rest are open space which is only flyable.
//!

use crate::prelude::*;

/// The dense grid of [Waypoint] for a single sector
#[derive(Clone)]
pub struct WaypointField {
	/// The sector this grid describes
	sector: SectorID,
	/// Edge length of the grid in tiles, copied from [GridDimensions] when
	/// the grid is created
	tiles_per_line: usize,
	/// Flattened `tiles_per_line` cubed array of waypoints indexed by
	/// `x + (y + z * tiles_per_line) * tiles_per_line`
	waypoints: Vec<Waypoint>,
}

impl WaypointField {
	/// Create a new instance of [WaypointField] sized to one sector with all
	/// waypoint positions precomputed and every flag unset
	pub fn new(sector: SectorID, dimensions: &GridDimensions) -> Self {
		let tiles_per_line = dimensions.get_tiles_per_line() as usize;
		let mut waypoints = Vec::with_capacity(tiles_per_line.pow(3));
		for z in 0..tiles_per_line {
			for y in 0..tiles_per_line {
				for x in 0..tiles_per_line {
					let cell = TileCell::new(x, y, z);
					let position = dimensions.get_position_from_sector_and_cell(sector, cell);
					waypoints.push(Waypoint::new(sector, cell, position));
				}
			}
		}
		WaypointField {
			sector,
			tiles_per_line,
			waypoints,
		}
	}
	/// Get the ID of the sector this grid describes
	pub fn get_sector(&self) -> SectorID {
		self.sector
	}
	/// Get the edge length of the grid in tiles
	pub fn get_tiles_per_line(&self) -> usize {
		self.tiles_per_line
	}
	/// Flatten cell coordinates into an index of the waypoint array. Each
	/// coordinate must be within the grid, checked in debug builds only as
	/// lookups sit on the hot path of the search
	fn get_index(&self, cell: TileCell) -> usize {
		debug_assert!(
			cell.get_x() < self.tiles_per_line
				&& cell.get_y() < self.tiles_per_line
				&& cell.get_z() < self.tiles_per_line,
			"Cell {:?} is out of range of a sector sized {}",
			cell,
			self.tiles_per_line
		);
		cell.get_x() + (cell.get_y() + cell.get_z() * self.tiles_per_line) * self.tiles_per_line
	}
	/// Retrieve the waypoint of a cell
	pub fn get_waypoint(&self, cell: TileCell) -> &Waypoint {
		&self.waypoints[self.get_index(cell)]
	}
	/// Retrieve a mutable reference to the waypoint of a cell
	pub fn get_waypoint_mut(&mut self, cell: TileCell) -> &mut Waypoint {
		let index = self.get_index(cell);
		&mut self.waypoints[index]
	}
	/// Rebuild the flags of every waypoint in the box starting at `corner`
	/// extending by `size` tiles along each axis
	///
	/// With voxel data the first pass marks open tiles flyable and the second
	/// pass marks open tiles walkable when the tile directly beneath is
	/// solid. Cells along the base of the grid cannot see the tile beneath
	/// them, the seam against the sector below is handled by
	/// [WaypointField::build_border] on that sector instead. Without voxel
	/// data every flag in the box is cleared
	pub fn build_area<V: VoxelSampler>(
		&mut self,
		voxels: Option<&V>,
		corner: TileCell,
		size: (usize, usize, usize),
	) {
		let (x0, y0, z0) = corner.get();
		let (xs, ys, zs) = size;
		debug_assert!(
			x0 + xs <= self.tiles_per_line
				&& y0 + ys <= self.tiles_per_line
				&& z0 + zs <= self.tiles_per_line,
			"Area {:?} sized {:?} exceeds a sector sized {}",
			corner,
			size,
			self.tiles_per_line
		);
		let Some(voxels) = voxels else {
			// no terrain data available for the region
			for z in z0..z0 + zs {
				for y in y0..y0 + ys {
					for x in x0..x0 + xs {
						self.get_waypoint_mut(TileCell::new(x, y, z))
							.get_flags_mut()
							.clear();
					}
				}
			}
			return;
		};
		for z in z0..z0 + zs {
			for y in y0..y0 + ys {
				for x in x0..x0 + xs {
					let cell = TileCell::new(x, y, z);
					let open = voxels.get_tile_type(cell) == 0;
					let flags = self.get_waypoint_mut(cell).get_flags_mut();
					flags.clear();
					if open {
						flags.insert(WaypointFlags::FLYABLE);
					}
				}
			}
		}
		for z in z0..z0 + zs {
			for y in y0.max(1)..y0 + ys {
				for x in x0..x0 + xs {
					let grounded = !self.get_waypoint(TileCell::new(x, y - 1, z)).is_flyable();
					let waypoint = self.get_waypoint_mut(TileCell::new(x, y, z));
					if waypoint.is_flyable() && grounded {
						waypoint.get_flags_mut().insert(WaypointFlags::WALKABLE);
					}
				}
			}
		}
	}
	/// Reconcile the walkability of the top face of this grid against the
	/// bottom face of the sector stacked directly above it for the `(x, z)`
	/// strip starting at `corner` extending by `size` tiles
	///
	/// The rebuild of [WaypointField::build_area] only sees tiles within one
	/// sector so the topmost layer is finalised here with the neighbouring
	/// data, resolved by the caller through the loaded sector set
	pub fn build_border(
		&mut self,
		sector_above: &WaypointField,
		corner: (usize, usize),
		size: (usize, usize),
	) {
		let top = self.tiles_per_line - 1;
		for z in corner.1..corner.1 + size.1 {
			for x in corner.0..corner.0 + size.0 {
				let above_open = sector_above.get_waypoint(TileCell::new(x, 0, z)).is_flyable();
				let waypoint = self.get_waypoint_mut(TileCell::new(x, top, z));
				if waypoint.is_flyable() && !above_open {
					waypoint.get_flags_mut().insert(WaypointFlags::WALKABLE);
				}
			}
		}
	}
	/// Rebuild the flags of the entire grid
	pub fn build<V: VoxelSampler>(&mut self, voxels: Option<&V>) {
		let tiles = self.tiles_per_line;
		self.build_area(voxels, TileCell::new(0, 0, 0), (tiles, tiles, tiles));
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use bevy::prelude::*;
	/// A sector of open space above a solid floor at `y = 0`
	fn floored_voxels(tiles_per_line: usize) -> VoxelField {
		let mut voxels = VoxelField::new(tiles_per_line as u32);
		for z in 0..tiles_per_line {
			for x in 0..tiles_per_line {
				voxels.set_tile_type(TileCell::new(x, 0, z), 1);
			}
		}
		voxels
	}
	#[test]
	fn waypoint_positions_precomputed() {
		let dimensions = GridDimensions::new(4, 1.0);
		let field = WaypointField::new(SectorID::new(1, 0, 0), &dimensions);
		let result = field.get_waypoint(TileCell::new(2, 3, 1)).get_position();
		let actual = Vec3::new(6.0, 3.0, 1.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn solid_tiles_are_neither_flyable_nor_walkable() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut field = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let voxels = floored_voxels(4);
		field.build(Some(&voxels));
		for z in 0..4 {
			for x in 0..4 {
				let waypoint = field.get_waypoint(TileCell::new(x, 0, z));
				assert!(!waypoint.is_flyable());
				assert!(!waypoint.is_walkable());
			}
		}
	}
	#[test]
	fn walkable_exactly_one_layer_above_floor() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut field = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let voxels = floored_voxels(4);
		field.build(Some(&voxels));
		for z in 0..4 {
			for y in 1..4 {
				for x in 0..4 {
					let waypoint = field.get_waypoint(TileCell::new(x, y, z));
					assert!(waypoint.is_flyable());
					assert_eq!(y == 1, waypoint.is_walkable());
				}
			}
		}
	}
	#[test]
	fn base_layer_of_open_sector_is_not_walkable() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut field = WaypointField::new(SectorID::new(0, 1, 0), &dimensions);
		let voxels = VoxelField::new(4);
		field.build(Some(&voxels));
		for z in 0..4 {
			for x in 0..4 {
				let waypoint = field.get_waypoint(TileCell::new(x, 0, z));
				assert!(waypoint.is_flyable());
				assert!(!waypoint.is_walkable());
			}
		}
	}
	#[test]
	fn build_without_voxels_clears_flags() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut field = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let voxels = floored_voxels(4);
		field.build(Some(&voxels));
		field.build::<VoxelField>(None);
		for z in 0..4 {
			for y in 0..4 {
				for x in 0..4 {
					let waypoint = field.get_waypoint(TileCell::new(x, y, z));
					assert!(!waypoint.is_flyable());
					assert!(!waypoint.is_walkable());
				}
			}
		}
	}
	#[test]
	fn partial_rebuild_leaves_surroundings_untouched() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut field = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let mut voxels = floored_voxels(4);
		field.build(Some(&voxels));
		// raise a solid pillar in one column and rebuild only that column
		voxels.set_tile_type(TileCell::new(2, 1, 2), 1);
		voxels.set_tile_type(TileCell::new(2, 2, 2), 1);
		field.build_area(Some(&voxels), TileCell::new(2, 0, 2), (1, 4, 1));
		let pillar_mid = field.get_waypoint(TileCell::new(2, 1, 2));
		assert!(!pillar_mid.is_flyable());
		let pillar_top = field.get_waypoint(TileCell::new(2, 3, 2));
		assert!(pillar_top.is_walkable());
		// a neighbouring column keeps its original flags
		let neighbour = field.get_waypoint(TileCell::new(1, 1, 2));
		assert!(neighbour.is_walkable());
	}
	#[test]
	fn border_marks_top_face_walkable_under_solid_neighbour() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut lower = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let mut upper = WaypointField::new(SectorID::new(0, 1, 0), &dimensions);
		let open = VoxelField::new(4);
		let solid = VoxelField::new_with_type(4, 1);
		lower.build(Some(&open));
		upper.build(Some(&solid));
		lower.build_border(&upper, (0, 0), (4, 4));
		for z in 0..4 {
			for x in 0..4 {
				let waypoint = lower.get_waypoint(TileCell::new(x, 3, z));
				assert!(waypoint.is_walkable());
			}
		}
	}
	#[test]
	fn border_leaves_top_face_alone_under_open_neighbour() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut lower = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let mut upper = WaypointField::new(SectorID::new(0, 1, 0), &dimensions);
		let open = VoxelField::new(4);
		lower.build(Some(&open));
		upper.build(Some(&open));
		lower.build_border(&upper, (0, 0), (4, 4));
		for z in 0..4 {
			for x in 0..4 {
				let waypoint = lower.get_waypoint(TileCell::new(x, 3, z));
				assert!(!waypoint.is_walkable());
			}
		}
	}
	#[test]
	fn border_skips_solid_top_face() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut lower = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let mut upper = WaypointField::new(SectorID::new(0, 1, 0), &dimensions);
		let solid = VoxelField::new_with_type(4, 1);
		lower.build(Some(&solid));
		upper.build(Some(&solid));
		lower.build_border(&upper, (0, 0), (4, 4));
		for z in 0..4 {
			for x in 0..4 {
				let waypoint = lower.get_waypoint(TileCell::new(x, 3, z));
				assert!(!waypoint.is_walkable());
			}
		}
	}
	#[test]
	fn border_strip_limited_to_requested_tiles() {
		let dimensions = GridDimensions::new(4, 1.0);
		let mut lower = WaypointField::new(SectorID::new(0, 0, 0), &dimensions);
		let mut upper = WaypointField::new(SectorID::new(0, 1, 0), &dimensions);
		let open = VoxelField::new(4);
		let solid = VoxelField::new_with_type(4, 1);
		lower.build(Some(&open));
		upper.build(Some(&solid));
		lower.build_border(&upper, (1, 1), (2, 2));
		assert!(lower.get_waypoint(TileCell::new(1, 3, 1)).is_walkable());
		assert!(lower.get_waypoint(TileCell::new(2, 3, 2)).is_walkable());
		assert!(!lower.get_waypoint(TileCell::new(0, 3, 0)).is_walkable());
		assert!(!lower.get_waypoint(TileCell::new(3, 3, 3)).is_walkable());
	}
}
