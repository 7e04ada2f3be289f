//! Measure initialising a large set of WaypointFields
//!

use bevy_waypoint_tiles_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Create a plane of sector navigation grids over floored terrain
fn init_waypoint_grids(sector_count: u32, tiles_per_line: u32) {
	let dimensions = GridDimensions::new(tiles_per_line, 1.0);
	let mut voxels = VoxelField::new(tiles_per_line);
	for z in 0..tiles_per_line as usize {
		for x in 0..tiles_per_line as usize {
			voxels.set_tile_type(TileCell::new(x, 0, z), 1);
		}
	}
	let mut sectors = SectorWaypoints::default();
	for x in 0..sector_count {
		for z in 0..sector_count {
			sectors.load_sector(SectorID::new(x, 0, z), &dimensions, Some(&voxels));
		}
	}
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("data_initialisation");
	group.significance_level(0.05).sample_size(100);
	group.bench_function("init_sector_waypoint_grids", |b| {
		b.iter(|| init_waypoint_grids(black_box(8), black_box(16)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
