/*!
mesh-voxelize
=============

**mesh-voxelize** turns a triangle mesh into a dense 3-D binary occupancy
grid marking the voxels inside the mesh's solid interior. It implements the
parity (XOR scan-fill) method of Schwarz and Seidel: for every triangle, the
columns of the grid covered by the triangle's projection are computed, and
every voxel from the grid origin up to the surface crossing is toggled. For a
watertight, consistently oriented mesh, a voxel ends up set exactly when an
odd number of surface crossings lies above its center.

The grid is a bit-packed array of `u32` words mutated concurrently by many
workers through atomic XOR, so the pass needs no locks and no ordering
between triangles. Voxels can be addressed either linearly or along a Morton
(Z-order) curve built from per-axis lookup tables.

The caller is responsible for loading the mesh, choosing the grid resolution
and providing a bounding box that exactly covers it; see
[`GridInfo`] and [`voxelize_solid`].
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod bounding_volume;
mod error;
pub mod grid;
pub mod math;
pub mod morton;
pub mod raster;
mod voxelize;

pub use crate::bounding_volume::Aabb;
pub use crate::error::VoxelizeError;
pub use crate::grid::{GridInfo, IndexMode, VoxelGrid};
pub use crate::morton::MortonTable;
pub use crate::voxelize::{voxelize_solid, VoxelizeContext};
