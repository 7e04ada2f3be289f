//! Build a small streamed world and solve routes through it
//!

use bevy::math::Vec3;
use bevy_waypoint_tiles_plugin::prelude::*;

/// Terrain of open space above a solid floor along the base of a sector
fn floored_voxels(tiles_per_line: u32) -> VoxelField {
	let mut voxels = VoxelField::new(tiles_per_line);
	for z in 0..tiles_per_line as usize {
		for x in 0..tiles_per_line as usize {
			voxels.set_tile_type(TileCell::new(x, 0, z), 1);
		}
	}
	voxels
}

#[test]
fn route_crosses_sector_boundary_through_a_wall_gap() {
	//  sector (0,0,0)          sector (1,0,0)
	//  ________________ ________________
	// |S_|__|__|__|x|__|__|__|__|__|__|__|
	// |__|__|__|__|x|__|__|__|__|__|__|__|
	// |__|__|__|__|x|__|__|__|__|__|__|__|
	// |__|__|__|__|x|__|__|__|__|G_|__|__|
	// |__|__|__|__|x|__|__|__|__|__|__|__|
	// |__|__|__|__|x|__|__|__|__|__|__|__|
	// |__|__|__|__|__|__|__|__|__|__|__|__|   <- gap at z = 6
	// |__|__|__|__|x|__|__|__|__|__|__|__|
	let dimensions = GridDimensions::new(8, 1.0);
	let mut sectors = SectorWaypoints::default();
	// a full-height wall at x = 4 of the first sector with a gap at z = 6
	let mut walled = floored_voxels(8);
	for z in 0..8 {
		if z == 6 {
			continue;
		}
		for y in 1..8 {
			walled.set_tile_type(TileCell::new(4, y, z), 1);
		}
	}
	sectors.load_sector(SectorID::new(0, 0, 0), &dimensions, Some(&walled));
	sectors.load_sector(SectorID::new(1, 0, 0), &dimensions, Some(&floored_voxels(8)));

	let source = Vec3::new(1.0, 1.0, 1.0);
	let target = Vec3::new(12.0, 1.0, 4.0);
	let path = sectors.find_path(&dimensions, source, target).unwrap();

	// endpoints sit on the resolved waypoints
	assert_eq!(Vec3::new(1.0, 1.0, 1.0), path.get_point(0));
	assert_eq!(
		Vec3::new(12.0, 1.0, 4.0),
		path.get_point(path.get_length() - 1)
	);
	// every step of the route is a walkable waypoint in a loaded sector
	for point in path.get_points().iter() {
		let waypoint = sectors.find_waypoint(&dimensions, *point).unwrap();
		assert!(waypoint.is_walkable());
	}
	// the only way through the wall is the gap
	assert!(path.get_points().contains(&Vec3::new(4.0, 1.0, 6.0)));
	// the route spans both sectors
	let crossed = path.get_points().iter().any(|p| {
		let (sector, _) = dimensions.get_sector_and_cell_from_position(*p).unwrap();
		sector == SectorID::new(1, 0, 0)
	});
	assert!(crossed);
}

#[test]
fn route_walks_around_a_ledge_rather_than_over_it() {
	// a one-tile-high ledge at x = 4 spans the sector except at z = 7, the
	// climb penalty makes the flat detour cheaper than stepping on top
	let dimensions = GridDimensions::new(8, 1.0);
	let mut sectors = SectorWaypoints::default();
	let mut voxels = floored_voxels(8);
	for z in 0..7 {
		voxels.set_tile_type(TileCell::new(4, 1, z), 1);
	}
	sectors.load_sector(SectorID::new(0, 0, 0), &dimensions, Some(&voxels));

	let path = sectors
		.find_path(
			&dimensions,
			Vec3::new(1.0, 1.0, 3.0),
			Vec3::new(6.0, 1.0, 3.0),
		)
		.unwrap();
	for point in path.get_points().iter() {
		assert_eq!(1.0, point.y);
	}
	assert!(path.get_points().contains(&Vec3::new(4.0, 1.0, 7.0)));
}

#[test]
fn route_blocked_by_unloaded_sector() {
	// the wall has no gap this time so the only continuation would be through
	// the unloaded sector behind it
	let dimensions = GridDimensions::new(8, 1.0);
	let mut sectors = SectorWaypoints::default();
	let mut walled = floored_voxels(8);
	for z in 0..8 {
		for y in 1..8 {
			walled.set_tile_type(TileCell::new(4, y, z), 1);
		}
	}
	sectors.load_sector(SectorID::new(0, 0, 0), &dimensions, Some(&walled));

	let result = sectors.find_path(
		&dimensions,
		Vec3::new(1.0, 1.0, 1.0),
		Vec3::new(6.0, 1.0, 1.0),
	);
	assert!(result.is_none());
}

#[test]
fn terrain_edit_reopens_a_blocked_route() {
	let dimensions = GridDimensions::new(8, 1.0);
	let mut sectors = SectorWaypoints::default();
	let mut voxels = SectorVoxels::default();
	let sector = SectorID::new(0, 0, 0);
	let mut walled = floored_voxels(8);
	for z in 0..8 {
		for y in 1..8 {
			walled.set_tile_type(TileCell::new(4, y, z), 1);
		}
	}
	voxels.insert_sector(sector, walled);
	sectors.load_sector(sector, &dimensions, voxels.get_sector(&sector));

	let source = Vec3::new(1.0, 1.0, 1.0);
	let target = Vec3::new(6.0, 1.0, 1.0);
	assert!(sectors.find_path(&dimensions, source, target).is_none());

	// carve a doorway through the wall and notify the grid
	voxels.set_tile_type(sector, TileCell::new(4, 1, 1), 0);
	voxels.set_tile_type(sector, TileCell::new(4, 2, 1), 0);
	let handled = sectors.rebuild_tiles(&voxels, &dimensions, (4, 1, 1), (1, 2, 1));
	assert!(handled);

	let path = sectors.find_path(&dimensions, source, target).unwrap();
	assert!(path.get_points().contains(&Vec3::new(4.0, 1.0, 1.0)));
}
