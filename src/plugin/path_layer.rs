//! Logic relating to solving route requests and maintaining the shared
//! [PathCache]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A request to solve a route between two world-space positions and publish
/// it into the [PathCache] for actors to follow
#[derive(Event)]
pub struct EventPathRequest {
	/// Where the route should start
	source: Vec3,
	/// Where the route should end
	target: Vec3,
}

impl EventPathRequest {
	/// Create a new instance of [EventPathRequest]
	#[cfg(not(tarpaulin_include))]
	pub fn new(source: Vec3, target: Vec3) -> Self {
		EventPathRequest { source, target }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_source(&self) -> Vec3 {
		self.source
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_target(&self) -> Vec3 {
		self.target
	}
}

/// Process [EventPathRequest] and insert solved routes into the [PathCache].
/// Requests whose endpoints sit in unloaded terrain or which no walkable
/// route connects are dropped, actors poll the cache and re-request when
/// nothing arrives
#[cfg(not(tarpaulin_include))]
pub fn process_path_requests(
	mut events: EventReader<EventPathRequest>,
	mut query: Query<(&mut PathCache, &SectorWaypoints, &GridDimensions)>,
	time: Res<Time>,
) {
	for event in events.read() {
		for (mut cache, sector_waypoints, dimensions) in query.iter_mut() {
			let Some(start) = sector_waypoints.find_waypoint(dimensions, event.get_source())
			else {
				debug!(
					"Path request source {:?} does not resolve to a waypoint",
					event.get_source()
				);
				continue;
			};
			let Some(goal) = sector_waypoints.find_waypoint(dimensions, event.get_target())
			else {
				debug!(
					"Path request target {:?} does not resolve to a waypoint",
					event.get_target()
				);
				continue;
			};
			let metadata = PathMetadata::new(
				start.get_sector(),
				start.get_cell(),
				goal.get_sector(),
				goal.get_cell(),
				time.elapsed(),
			);
			// only solve if the cache doesn't contain the route already
			if cache.get().contains_key(&metadata) {
				continue;
			}
			if let Some(path) =
				sector_waypoints.find_path(dimensions, event.get_source(), event.get_target())
			{
				debug!("Route found for request {:?}", metadata);
				cache.insert_path(metadata, path);
			} else {
				debug!(
					"No route between {:?} and {:?}",
					event.get_source(),
					event.get_target()
				);
			}
		}
	}
}

/// Purge any cached routes older than 15 minutes
#[cfg(not(tarpaulin_include))]
pub fn cleanup_old_paths(mut query: Query<&mut PathCache>, time: Res<Time>) {
	for mut cache in query.iter_mut() {
		let mut paths_to_purge = Vec::new();
		for metadata in cache.get().keys() {
			let elapsed = time.elapsed();
			let diff = elapsed.saturating_sub(metadata.get_time_generated());
			if diff.as_secs() > 900 {
				paths_to_purge.push(*metadata);
			}
		}
		for purge in paths_to_purge.iter() {
			cache.remove_path(*purge);
		}
	}
}
