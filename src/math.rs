//! Aliases for the mathematical types used throughout this crate.

/// The scalar type used throughout this crate.
pub use f32 as Real;

pub use na::{Point2, Point3, Vector2, Vector3};

/// The tolerance below which a 2-D cross product counts as "on the edge" and
/// below which a triangle normal's ray-axis component counts as degenerate.
///
/// This is a correctness constant of the parity fill, not a tunable: it is
/// the tie-breaking threshold that decides which of two adjacent triangles
/// owns a boundary sample.
pub const FLOAT_ERROR: Real = 1.0e-6;
