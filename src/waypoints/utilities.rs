//! Useful structures and tools used by the waypoint grids
//!

/// Weighting applied in the search cost function for each world unit of
/// upward movement between two waypoints. Climbing is discouraged so routes
/// prefer flat ground where one exists, the exact magnitude is a tunable
/// approximation rather than a calibrated constant
pub const CLIMB_PENALTY: f32 = 50.0;

/// Relative offsets of the 26 cells surrounding a waypoint in its 3x3x3
/// neighbourhood, excluding the centre. Enumeration order is fixed: the 8
/// neighbours on the same level first, then the 9 below, then the 9 above.
/// Successor enumeration walks this table in order so that routes between
/// equal-cost candidates resolve the same way on every run
pub const NEIGHBOUR_OFFSETS: [(i32, i32, i32); 26] = [
	// same level
	(-1, 0, -1),
	(0, 0, -1),
	(1, 0, -1),
	(-1, 0, 0),
	(1, 0, 0),
	(-1, 0, 1),
	(0, 0, 1),
	(1, 0, 1),
	// level below
	(-1, -1, -1),
	(0, -1, -1),
	(1, -1, -1),
	(-1, -1, 0),
	(0, -1, 0),
	(1, -1, 0),
	(-1, -1, 1),
	(0, -1, 1),
	(1, -1, 1),
	// level above
	(-1, 1, -1),
	(0, 1, -1),
	(1, 1, -1),
	(-1, 1, 0),
	(0, 1, 0),
	(1, 1, 0),
	(-1, 1, 1),
	(0, 1, 1),
	(1, 1, 1),
];
