//! A world is split into a series of cubic sectors which are loaded and
//! unloaded dynamically, each composed of a 3D grid of tiles used for
//! waypoint navigation
//!
//!

pub mod sector_waypoints;

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of a sector
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct SectorID((u32, u32, u32));

impl SectorID {
	/// Create a new instance of [SectorID]
	pub fn new(x: u32, y: u32, z: u32) -> Self {
		SectorID((x, y, z))
	}
	/// Get the sector `(x, y, z)` tuple
	pub fn get(&self) -> (u32, u32, u32) {
		self.0
	}
	/// Get the sector `x` offset
	pub fn get_x(&self) -> u32 {
		self.0 .0
	}
	/// Get the sector `y` offset
	pub fn get_y(&self) -> u32 {
		self.0 .1
	}
	/// Get the sector `z` offset
	pub fn get_z(&self) -> u32 {
		self.0 .2
	}
	/// Get the ID of the sector stacked directly beneath this one. Returns
	/// [None] for sectors along the floor of the world
	pub fn get_sector_below(&self) -> Option<SectorID> {
		self.get_y()
			.checked_sub(1)
			.map(|y| SectorID::new(self.get_x(), y, self.get_z()))
	}
	/// Get the ID of the sector stacked directly above this one
	pub fn get_sector_above(&self) -> SectorID {
		SectorID::new(self.get_x(), self.get_y() + 1, self.get_z())
	}
}

/// The resolution of the sector grid
///
/// Tiles are the smallest unit of terrain and a sector is a cube of
/// `tiles_per_line` tiles along each edge. The sector grid begins at the
/// world origin and extends in the `(+x, +y, +z)` direction, positions with
/// any negative tile coordinate sit outside of it. `tile_size` is the width
/// of a tile in world units so a tile at global tile coordinates `(i, j, k)`
/// has a world position of `(i, j, k) * tile_size`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Default, Clone, Copy, Reflect)]
pub struct GridDimensions {
	/// Number of tiles along one edge of a sector, typically sourced from the
	/// configuration of the voxel terrain layer
	tiles_per_line: u32,
	/// Width of a single tile in world units
	tile_size: f32,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions]
	pub fn new(tiles_per_line: u32, tile_size: f32) -> Self {
		if tiles_per_line == 0 {
			panic!("Sectors require at least one tile per line");
		}
		if tile_size <= 0.0 {
			panic!(
				"Tile size must be a positive number of world units, got {}",
				tile_size
			);
		}
		GridDimensions {
			tiles_per_line,
			tile_size,
		}
	}
	/// Get the number of tiles along one edge of a sector
	pub fn get_tiles_per_line(&self) -> u32 {
		self.tiles_per_line
	}
	/// Get the width of a tile in world units
	pub fn get_tile_size(&self) -> f32 {
		self.tile_size
	}
	/// From a position in world space find the sector and local cell of the
	/// tile it rounds to. Returns [None] for positions outside the sector
	/// grid
	pub fn get_sector_and_cell_from_position(
		&self,
		position: Vec3,
	) -> Option<(SectorID, TileCell)> {
		let tile_x = (position.x / self.tile_size + 0.5).floor();
		let tile_y = (position.y / self.tile_size + 0.5).floor();
		let tile_z = (position.z / self.tile_size + 0.5).floor();
		if tile_x < 0.0 || tile_y < 0.0 || tile_z < 0.0 {
			return None;
		}
		Some(self.get_sector_and_cell_from_tile((
			tile_x as u32,
			tile_y as u32,
			tile_z as u32,
		)))
	}
	/// From global tile coordinates find the sector and the local cell within
	/// it
	pub fn get_sector_and_cell_from_tile(&self, tile: (u32, u32, u32)) -> (SectorID, TileCell) {
		let sector = SectorID::new(
			tile.0 / self.tiles_per_line,
			tile.1 / self.tiles_per_line,
			tile.2 / self.tiles_per_line,
		);
		let cell = TileCell::new(
			(tile.0 % self.tiles_per_line) as usize,
			(tile.1 % self.tiles_per_line) as usize,
			(tile.2 % self.tiles_per_line) as usize,
		);
		(sector, cell)
	}
	/// From a cell within a sector retrieve the world-space position of its
	/// waypoint
	pub fn get_position_from_sector_and_cell(&self, sector: SectorID, cell: TileCell) -> Vec3 {
		let tiles = self.tiles_per_line as f32;
		Vec3::new(
			(sector.get_x() as f32 * tiles + cell.get_x() as f32) * self.tile_size,
			(sector.get_y() as f32 * tiles + cell.get_y() as f32) * self.tile_size,
			(sector.get_z() as f32 * tiles + cell.get_z() as f32) * self.tile_size,
		)
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn sector_below_interior() {
		let sector = SectorID::new(3, 2, 1);
		let result = sector.get_sector_below().unwrap();
		let actual = SectorID::new(3, 1, 1);
		assert_eq!(actual, result);
	}
	#[test]
	fn sector_below_world_floor() {
		let sector = SectorID::new(3, 0, 1);
		let result = sector.get_sector_below();
		assert!(result.is_none());
	}
	#[test]
	fn sector_above() {
		let sector = SectorID::new(3, 2, 1);
		let result = sector.get_sector_above();
		let actual = SectorID::new(3, 3, 1);
		assert_eq!(actual, result);
	}
	#[test]
	#[should_panic]
	fn invalid_grid_dimensions_tiles() {
		GridDimensions::new(0, 1.0);
	}
	#[test]
	#[should_panic]
	fn invalid_grid_dimensions_tile_size() {
		GridDimensions::new(8, 0.0);
	}
	#[test]
	fn sector_and_cell_from_origin_position() {
		let dimensions = GridDimensions::new(8, 1.0);
		let position = Vec3::new(0.2, 0.0, 0.4);
		let result = dimensions
			.get_sector_and_cell_from_position(position)
			.unwrap();
		let actual = (SectorID::new(0, 0, 0), TileCell::new(0, 0, 0));
		assert_eq!(actual, result);
	}
	#[test]
	fn sector_and_cell_from_position_rounds_to_nearest_tile() {
		let dimensions = GridDimensions::new(8, 1.0);
		let position = Vec3::new(2.6, 1.4, 7.2);
		let result = dimensions
			.get_sector_and_cell_from_position(position)
			.unwrap();
		let actual = (SectorID::new(0, 0, 0), TileCell::new(3, 1, 7));
		assert_eq!(actual, result);
	}
	#[test]
	fn sector_and_cell_from_position_neighbour_sector() {
		let dimensions = GridDimensions::new(8, 1.0);
		let position = Vec3::new(9.0, 17.0, 3.0);
		let result = dimensions
			.get_sector_and_cell_from_position(position)
			.unwrap();
		let actual = (SectorID::new(1, 2, 0), TileCell::new(1, 1, 3));
		assert_eq!(actual, result);
	}
	#[test]
	fn sector_and_cell_from_position_scaled_tiles() {
		let dimensions = GridDimensions::new(4, 0.5);
		let position = Vec3::new(1.1, 0.0, 2.6);
		let result = dimensions
			.get_sector_and_cell_from_position(position)
			.unwrap();
		let actual = (SectorID::new(0, 0, 1), TileCell::new(2, 0, 1));
		assert_eq!(actual, result);
	}
	#[test]
	fn sector_and_cell_from_negative_position() {
		let dimensions = GridDimensions::new(8, 1.0);
		let position = Vec3::new(-3.0, 1.0, 1.0);
		let result = dimensions.get_sector_and_cell_from_position(position);
		assert!(result.is_none());
	}
	#[test]
	fn sector_and_cell_from_tile() {
		let dimensions = GridDimensions::new(8, 1.0);
		let result = dimensions.get_sector_and_cell_from_tile((17, 8, 2));
		let actual = (SectorID::new(2, 1, 0), TileCell::new(1, 0, 2));
		assert_eq!(actual, result);
	}
	#[test]
	fn position_from_sector_and_cell() {
		let dimensions = GridDimensions::new(8, 1.0);
		let result = dimensions
			.get_position_from_sector_and_cell(SectorID::new(1, 0, 2), TileCell::new(3, 1, 0));
		let actual = Vec3::new(11.0, 1.0, 16.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn position_lookup_round_trip() {
		let dimensions = GridDimensions::new(8, 0.5);
		let sector = SectorID::new(2, 1, 0);
		let cell = TileCell::new(7, 0, 4);
		let position = dimensions.get_position_from_sector_and_cell(sector, cell);
		let result = dimensions
			.get_sector_and_cell_from_position(position)
			.unwrap();
		assert_eq!((sector, cell), result);
	}
}
