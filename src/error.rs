/// Errors that can occur when setting up a solid voxelization pass.
///
/// Every error is detected before the parallel pass starts; the pass itself
/// is infallible (degenerate triangles contribute zero voxels by design, they
/// are not failures).
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum VoxelizeError {
    /// The grid resolution has a zero component, so the grid holds no voxel.
    #[error("the grid resolution has a zero component")]
    EmptyGrid,

    /// The total voxel count overflows the 64-bit flat bit-index space.
    #[error("the total voxel count overflows the addressable bit-index space")]
    GridTooLarge,

    /// The triangle buffer length is not nine floats per declared triangle.
    #[error("the triangle buffer holds {got} floats but {expected} were expected (9 per triangle)")]
    TriangleDataLength {
        /// The length implied by `GridInfo::n_triangles`.
        expected: usize,
        /// The actual buffer length.
        got: usize,
    },

    /// The output voxel grid is too small for the declared grid resolution.
    #[error("the voxel grid holds {actual} bits but the grid metadata requires {required}")]
    GridCapacity {
        /// The bit count required by the grid resolution.
        required: u64,
        /// The bit count actually held by the voxel grid.
        actual: u64,
    },
}
