//! A world is split into a series of cubic Sectors, each carrying a dense 3D
//! grid of waypoints derived from the solidity of the voxel terrain.
//!
//! Each waypoint records whether the tile it sits in is open space (`FLYABLE`)
//! and whether a character can stand in it (`WALKABLE` - open space directly
//! above solid ground). Terrain edits rebuild the flags of the affected
//! sub-box, with an explicit border pass reconciling the seam between
//! vertically stacked sectors whose data live in separate allocations.
//!
//! Sectors are positioned from the world origin in the `(+x, +y, +z)`
//! direction and the waypoints of a sector are indexed from the sector corner
//! closest to the origin.
//!
//! A sector with a solid floor along its base produces a walkable layer one
//! tile up:
//!
//! ```text
//!  y
//!  2 |__|__|__|__|__|__|__|__|   open
//!  1 |w_|w_|w_|w_|w_|w_|w_|w_|   open, walkable
//!  0 |xx|xx|xx|xx|xx|xx|xx|xx|   solid
//! ```
//!
//! Pathfinding runs an A* search directly over the waypoints, stepping
//! through the 26-cell neighbourhood of each node and crossing sector
//! boundaries transparently by resolving the sibling sector from the loaded
//! set - an unloaded neighbour simply ends the world there.
//!

pub mod fields;
pub mod path;
pub mod search;
pub mod sectors;
pub mod utilities;
