//! The grid cell structures that make up a sector
//!

pub mod voxel_field;
pub mod waypoint_field;

use crate::prelude::*;
use bevy::prelude::*;

/// Defines required access to per-sector voxel data. The terrain layer that
/// owns the voxels lives outside this plugin, waypoint grids only ever read
/// tile types through this boundary
pub trait VoxelSampler {
	/// Retrieve the tile type at a cell where `0` means open space and any
	/// other value is solid terrain
	fn get_tile_type(&self, cell: TileCell) -> u8;
}

/// ID of a cell within a sector grid, ordered `(x, y, z)` with `y` being the
/// vertical axis
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct TileCell((usize, usize, usize));

impl TileCell {
	/// Create a new instance of [TileCell]
	pub fn new(x: usize, y: usize, z: usize) -> Self {
		TileCell((x, y, z))
	}
	/// Get the cell `(x, y, z)` tuple
	pub fn get(&self) -> (usize, usize, usize) {
		self.0
	}
	/// Get the cell `x` coordinate
	pub fn get_x(&self) -> usize {
		self.0 .0
	}
	/// Get the cell `y` coordinate
	pub fn get_y(&self) -> usize {
		self.0 .1
	}
	/// Get the cell `z` coordinate
	pub fn get_z(&self) -> usize {
		self.0 .2
	}
}

/// Bitset describing what movement a waypoint supports
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub struct WaypointFlags(u8);

impl WaypointFlags {
	/// The tile holding the waypoint is open space
	pub const FLYABLE: WaypointFlags = WaypointFlags(0b1);
	/// The tile holding the waypoint is open space a character can stand in,
	/// implies [WaypointFlags::FLYABLE]
	pub const WALKABLE: WaypointFlags = WaypointFlags(0b10);
	/// Create an empty set of flags
	pub fn empty() -> Self {
		WaypointFlags(0)
	}
	/// Test whether every flag of `other` is set
	pub fn contains(&self, other: WaypointFlags) -> bool {
		self.0 & other.0 == other.0
	}
	/// Set the flags of `other`
	pub fn insert(&mut self, other: WaypointFlags) {
		self.0 |= other.0;
	}
	/// Unset every flag
	pub fn clear(&mut self) {
		self.0 = 0;
	}
}

/// One cell of a sector's navigation grid recording where it sits in the
/// world and what movement it supports
#[derive(Clone, Copy, Debug, Reflect)]
pub struct Waypoint {
	/// The sector whose grid this waypoint belongs to
	sector: SectorID,
	/// Local coordinates within the owning sector
	cell: TileCell,
	/// World-space position, computed once when the owning grid is built
	position: Vec3,
	/// Movement flags, rebuilt whenever the terrain of the cell changes
	flags: WaypointFlags,
}

impl Waypoint {
	/// Create a new instance of [Waypoint] with no flags set
	pub fn new(sector: SectorID, cell: TileCell, position: Vec3) -> Self {
		Waypoint {
			sector,
			cell,
			position,
			flags: WaypointFlags::empty(),
		}
	}
	/// Get the ID of the owning sector
	pub fn get_sector(&self) -> SectorID {
		self.sector
	}
	/// Get the local cell coordinates
	pub fn get_cell(&self) -> TileCell {
		self.cell
	}
	/// Get the world-space position
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Get the movement flags
	pub fn get_flags(&self) -> WaypointFlags {
		self.flags
	}
	/// Get a mutable reference to the movement flags
	pub fn get_flags_mut(&mut self) -> &mut WaypointFlags {
		&mut self.flags
	}
	/// Whether the waypoint sits in open space
	pub fn is_flyable(&self) -> bool {
		self.flags.contains(WaypointFlags::FLYABLE)
	}
	/// Whether a character can stand at the waypoint
	pub fn is_walkable(&self) -> bool {
		self.flags.contains(WaypointFlags::WALKABLE)
	}
}
