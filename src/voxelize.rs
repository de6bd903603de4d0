//! The parallel solid voxelization pass.

use rayon::prelude::*;

use crate::error::VoxelizeError;
use crate::grid::{GridInfo, IndexMode, VoxelGrid};
use crate::math::Real;
use crate::raster;

/// The execution context of a voxelization pass: a bounded set of parallel
/// workers fed by a grid-stride assignment.
///
/// Worker `w` processes the triangles `w, w + stride, w + 2 * stride, ...`
/// where `stride` is the worker count. This balances the widely varying
/// per-triangle work (each triangle may cover anywhere from zero to many
/// thousands of columns) across a fixed number of workers, independently of
/// how the underlying runtime would split the triangle range on its own.
#[derive(Copy, Clone, Debug)]
pub struct VoxelizeContext {
    num_workers: usize,
}

impl Default for VoxelizeContext {
    /// A context with one worker per thread of the global rayon pool.
    fn default() -> Self {
        Self::new(rayon::current_num_threads())
    }
}

impl VoxelizeContext {
    /// Creates a context running `num_workers` parallel workers.
    ///
    /// A zero worker count is bumped to one.
    pub fn new(num_workers: usize) -> Self {
        VoxelizeContext {
            num_workers: num_workers.max(1),
        }
    }

    /// The number of parallel workers of this context.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }
}

/// Solid-voxelizes a triangle mesh into `voxels` using the parity method.
///
/// `triangle_data` holds nine floats per triangle (three vertices, tightly
/// packed, in insertion order). Each triangle toggles every voxel between the
/// grid origin and its surface along the x axis; for a watertight,
/// consistently oriented mesh fully contained in `info.aabb`, the voxels left
/// set after the pass are exactly the interior ones.
///
/// The pass accumulates into `voxels` by toggling: pass a freshly allocated
/// (or [`VoxelGrid::clear`]ed) grid for a plain voxelization. Once this
/// function returns, all workers have completed and the grid is safe to read.
///
/// # Preconditions (not validated)
///
/// * all triangle geometry lies inside `info.aabb`; out-of-range geometry
///   computes out-of-range bit indices and is only caught by debug
///   assertions;
/// * `info.aabb`'s extents divided by `info.unit` equal `info.resolution`;
/// * with [`IndexMode::Morton`], the resolution is a cubic power of two.
pub fn voxelize_solid(
    ctx: &VoxelizeContext,
    info: &GridInfo,
    triangle_data: &[Real],
    voxels: &VoxelGrid,
    mode: IndexMode,
) -> Result<(), VoxelizeError> {
    let expected = info.n_triangles * 9;
    if triangle_data.len() != expected {
        return Err(VoxelizeError::TriangleDataLength {
            expected,
            got: triangle_data.len(),
        });
    }

    let required = info.bits().ok_or(VoxelizeError::GridTooLarge)?;
    if voxels.len_bits() < required {
        return Err(VoxelizeError::GridCapacity {
            required,
            actual: voxels.len_bits(),
        });
    }

    let stride = ctx.num_workers;
    log::debug!(
        "voxelizing {} triangles into {} voxels across {} workers",
        info.n_triangles,
        required,
        stride
    );

    // The workers share `voxels` mutably, but only through atomic XOR; the
    // end of the parallel iterator is the pass's single join point.
    (0..stride).into_par_iter().for_each(|worker| {
        let mut t = worker;
        while t < info.n_triangles {
            raster::voxelize_triangle(info, &triangle_data[t * 9..t * 9 + 9], voxels, mode);
            t += stride;
        }
    });

    log::debug!("voxelization pass done ({} voxels set)", voxels.count_ones());
    Ok(())
}
