//! The world-space route produced by a successful solve and the cache that
//! lets many actors share solved routes
//!

use std::collections::BTreeMap;
use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// An ordered list of world-space points from a start position to a goal with
/// a cursor for movement logic to track how far along the route it has
/// stepped
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
	/// The points of the route in walking order
	points: Vec<Vec3>,
	/// Index of the point the follower is currently moving towards, ranges
	/// over `0..=points.len()` where the length itself means the route has
	/// been consumed
	position: usize,
}

impl Path {
	/// Create a new empty instance of [Path]
	pub fn new() -> Self {
		Path::default()
	}
	/// Append a point to the end of the route
	pub fn add_point(&mut self, point: Vec3) {
		self.points.push(point);
	}
	/// Get the point at `index`
	pub fn get_point(&self, index: usize) -> Vec3 {
		if index >= self.points.len() {
			panic!(
				"Cannot get path point {}, the path holds {} points",
				index,
				self.points.len()
			);
		}
		self.points[index]
	}
	/// Get a reference to the list of points
	pub fn get_points(&self) -> &Vec<Vec3> {
		&self.points
	}
	/// Get the number of points in the route
	pub fn get_length(&self) -> usize {
		self.points.len()
	}
	/// Get the follow cursor
	pub fn get_position(&self) -> usize {
		self.position
	}
	/// Set the follow cursor. An index one past the final point marks the
	/// route as consumed, anything further is a caller bug
	pub fn set_position(&mut self, index: usize) {
		if index > self.points.len() {
			panic!(
				"Cannot set path position {}, the path holds {} points",
				index,
				self.points.len()
			);
		}
		self.position = index;
	}
}

/// Describes the properties of a solved route
#[derive(Clone, Copy, Debug, Reflect)]
pub struct PathMetadata {
	/// Sector holding the start of the route
	source_sector: SectorID,
	/// Cell of the start waypoint within the source sector
	source_cell: TileCell,
	/// Sector holding the goal of the route
	target_sector: SectorID,
	/// Cell of the goal waypoint within the target sector
	target_cell: TileCell,
	//? If a game is running for 136 years bad things will start happening here
	/// Marks the route based on time elapsed since app start, used to enable
	/// automatic cleardown of long lived routes that are probably not needed
	/// anymore
	time_generated: Duration,
}

// we don't want to compare `time_generated` so manually impl PartialEq
impl PartialEq for PathMetadata {
	fn eq(&self, other: &Self) -> bool {
		self.source_sector == other.source_sector
			&& self.source_cell == other.source_cell
			&& self.target_sector == other.target_sector
			&& self.target_cell == other.target_cell
	}
}
impl Eq for PathMetadata {}

impl Ord for PathMetadata {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		(
			self.source_sector,
			self.source_cell,
			self.target_sector,
			self.target_cell,
		)
			.cmp(&(
				other.source_sector,
				other.source_cell,
				other.target_sector,
				other.target_cell,
			))
	}
}

impl PartialOrd for PathMetadata {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PathMetadata {
	/// Create a new instance of [PathMetadata]
	pub fn new(
		source_sector: SectorID,
		source_cell: TileCell,
		target_sector: SectorID,
		target_cell: TileCell,
		time_generated: Duration,
	) -> Self {
		PathMetadata {
			source_sector,
			source_cell,
			target_sector,
			target_cell,
			time_generated,
		}
	}
	/// Get the source sector
	pub fn get_source_sector(&self) -> SectorID {
		self.source_sector
	}
	/// Get the source cell
	pub fn get_source_cell(&self) -> TileCell {
		self.source_cell
	}
	/// Get the target sector
	pub fn get_target_sector(&self) -> SectorID {
		self.target_sector
	}
	/// Get the target cell
	pub fn get_target_cell(&self) -> TileCell {
		self.target_cell
	}
	/// Get when the route was generated
	pub fn get_time_generated(&self) -> Duration {
		self.time_generated
	}
}

/// Each solved [Path] is placed into this cache so that multiple actors
/// moving between the same pair of waypoints can read from the same dataset.
/// Keys use custom `Eq` and `Ord` implementations comparing the source and
/// target waypoints only, allowing records to be addressed without knowing
/// when they were generated
#[derive(Component, Default, Clone)]
pub struct PathCache {
	/// Solved routes that actors can follow
	paths: BTreeMap<PathMetadata, Path>,
}

impl PathCache {
	/// Get a reference to the map of solved routes
	pub fn get(&self) -> &BTreeMap<PathMetadata, Path> {
		&self.paths
	}
	/// Get a mutable reference to the map of solved routes
	pub fn get_mut(&mut self) -> &mut BTreeMap<PathMetadata, Path> {
		&mut self.paths
	}
	/// Get a solved route between two waypoints. Returns [None] if it
	/// doesn't exist
	pub fn get_path(
		&self,
		source_sector: SectorID,
		source_cell: TileCell,
		target_sector: SectorID,
		target_cell: TileCell,
	) -> Option<&Path> {
		let metadata = PathMetadata {
			source_sector,
			source_cell,
			target_sector,
			target_cell,
			time_generated: Duration::default(),
		};
		let path = self.paths.get(&metadata);
		trace!("Path: {:?}", path);
		path
	}
	/// Insert a solved route into the cache
	pub fn insert_path(&mut self, metadata: PathMetadata, path: Path) {
		self.paths.insert(metadata, path);
	}
	/// Remove a solved route from the cache
	pub fn remove_path(&mut self, metadata: PathMetadata) {
		self.paths.remove(&metadata);
	}
}
