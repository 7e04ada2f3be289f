//! This is a plugin for the Bevy game engine to maintain per-sector waypoint grids over voxel terrain and calculate pathfinding routes across them
//!

pub mod waypoints;
pub mod bundle;
pub mod plugin;

pub mod prelude;
