//! `use bevy_waypoint_tiles_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::waypoints::{
	fields::{voxel_field::*, waypoint_field::*, *},
	path::*,
	search::{astar::*, waypoint_space::*, *},
	sectors::{sector_waypoints::*, *},
	utilities::*,
	*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{path_layer::*, terrain_layer::*, *},
};
