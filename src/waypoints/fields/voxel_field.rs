//! A snapshot of the voxel terrain of one sector as consumed by the waypoint
//! grids. The authoritative terrain lives in the host application, these
//! structures mirror just the per-tile type byte that walkability is derived
//! from, where `0` is open space and any other value is solid
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// The tile types of a single sector
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone)]
pub struct VoxelField {
	/// Edge length of the sector in tiles
	tiles_per_line: u32,
	/// Flattened `tiles_per_line` cubed array of tile types indexed by
	/// `x + (y + z * tiles_per_line) * tiles_per_line`
	tiles: Vec<u8>,
}

impl VoxelSampler for VoxelField {
	/// Retrieve the tile type of a cell
	fn get_tile_type(&self, cell: TileCell) -> u8 {
		self.tiles[self.get_index(cell)]
	}
}

impl VoxelField {
	/// Create a new instance of [VoxelField] where every tile is open space
	pub fn new(tiles_per_line: u32) -> Self {
		VoxelField::new_with_type(tiles_per_line, 0)
	}
	/// Create a new instance of [VoxelField] where every tile carries the
	/// supplied type
	pub fn new_with_type(tiles_per_line: u32, tile_type: u8) -> Self {
		VoxelField {
			tiles_per_line,
			tiles: vec![tile_type; (tiles_per_line as usize).pow(3)],
		}
	}
	/// Get the edge length of the sector in tiles
	pub fn get_tiles_per_line(&self) -> u32 {
		self.tiles_per_line
	}
	/// Flatten cell coordinates into an index of the tile array
	fn get_index(&self, cell: TileCell) -> usize {
		let tiles = self.tiles_per_line as usize;
		if cell.get_x() >= tiles || cell.get_y() >= tiles || cell.get_z() >= tiles {
			panic!(
				"Cannot access a VoxelField tile, cell {:?} is out of range of a sector sized {}",
				cell, tiles
			);
		}
		cell.get_x() + (cell.get_y() + cell.get_z() * tiles) * tiles
	}
	/// Set the tile type of a cell
	pub fn set_tile_type(&mut self, cell: TileCell, tile_type: u8) {
		let index = self.get_index(cell);
		self.tiles[index] = tile_type;
	}
}

/// Keys are the unique IDs of loaded sectors and values are the [VoxelField]
/// mirroring each sector's terrain. Hosts populate and edit this alongside
/// their own terrain representation so that waypoint rebuilds have tile data
/// to read
#[cfg_attr(
	feature = "serde",
	derive(serde::Deserialize, serde::Serialize),
	serde(default)
)]
#[derive(Component, Clone, Default)]
pub struct SectorVoxels {
	/// The tile data of every loaded sector
	sectors: BTreeMap<SectorID, VoxelField>,
}

impl SectorVoxels {
	/// Get a reference to the map of sectors and [VoxelField]
	pub fn get(&self) -> &BTreeMap<SectorID, VoxelField> {
		&self.sectors
	}
	/// Get a mutable reference to the map of sectors and [VoxelField]
	pub fn get_mut(&mut self) -> &mut BTreeMap<SectorID, VoxelField> {
		&mut self.sectors
	}
	/// Get the [VoxelField] of a sector. Returns [None] if the sector has no
	/// terrain loaded
	pub fn get_sector(&self, sector: &SectorID) -> Option<&VoxelField> {
		self.sectors.get(sector)
	}
	/// Insert the terrain snapshot of a sector, replacing any previous data
	pub fn insert_sector(&mut self, sector: SectorID, field: VoxelField) {
		self.sectors.insert(sector, field);
	}
	/// Remove the terrain snapshot of a sector
	pub fn remove_sector(&mut self, sector: &SectorID) {
		self.sectors.remove(sector);
	}
	/// Set the tile type of a cell within a particular sector
	pub fn set_tile_type(&mut self, sector: SectorID, cell: TileCell, tile_type: u8) {
		if let Some(field) = self.sectors.get_mut(&sector) {
			field.set_tile_type(cell, tile_type);
		} else {
			error!(
				"Cannot mutate terrain in non-existent sector {:?}",
				sector
			);
		}
	}
	/// From a `ron` file generate the [SectorVoxels]
	#[cfg(feature = "ron")]
	pub fn from_file(path: String) -> Self {
		let file = std::fs::File::open(path).expect("Failed opening SectorVoxels file");
		let voxels: SectorVoxels = match ron::de::from_reader(file) {
			Ok(voxels) => voxels,
			Err(e) => panic!("Failed deserializing SectorVoxels: {}", e),
		};
		voxels
	}
}
