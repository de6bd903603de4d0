//! Grid metadata, flat voxel addressing and the bit-packed voxel grid.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::bounding_volume::Aabb;
use crate::error::VoxelizeError;
use crate::math::{Real, Vector3};
use crate::morton::{self, MortonTable};

/// Metadata describing the voxel grid a mesh is rasterized into.
///
/// The caller is responsible for the consistency of these fields: the
/// bounding box must tightly cover the triangle set, and its extents divided
/// by `unit` must equal `resolution` exactly. The voxelization core trusts
/// this contract and does not validate it.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridInfo {
    /// The number of voxels along each axis.
    pub resolution: Vector3<u32>,
    /// The world-space size of one voxel along each axis (may be anisotropic).
    pub unit: Vector3<Real>,
    /// The world-space box exactly covered by the grid.
    pub aabb: Aabb,
    /// The number of triangles of the mesh.
    pub n_triangles: usize,
}

impl GridInfo {
    /// The total number of voxels (= bits) of the grid, or `None` on overflow.
    #[inline]
    pub fn bits(&self) -> Option<u64> {
        (self.resolution.x as u64)
            .checked_mul(self.resolution.y as u64)?
            .checked_mul(self.resolution.z as u64)
    }

    /// The number of 32-bit words needed to store one bit per voxel.
    #[inline]
    pub fn words(&self) -> Option<u64> {
        self.bits().map(|bits| bits.div_ceil(32))
    }
}

/// The mapping from a 3-D voxel coordinate to a flat bit index.
///
/// Both modes address the same flat space of `resolution.x * resolution.y *
/// resolution.z` bits; the encoding is a pure function.
#[derive(Copy, Clone)]
pub enum IndexMode<'a> {
    /// Row-major order: `x + y * res.y + z * res.y * res.z`.
    Linear,
    /// Z-order, bit-interleaving the coordinates through the given lookup
    /// tables. Improves the memory locality of spatially local queries run
    /// on the grid afterwards.
    ///
    /// The interleaved code only stays within the grid's bit range when every
    /// resolution component is the same power of two; this is the caller's
    /// responsibility, like the rest of the [`GridInfo`] contract.
    Morton(&'a MortonTable),
}

impl IndexMode<'_> {
    /// The flat bit index of the voxel `(x, y, z)`.
    #[inline]
    pub fn encode(&self, resolution: &Vector3<u32>, x: u32, y: u32, z: u32) -> u64 {
        match self {
            IndexMode::Linear => {
                x as u64
                    + y as u64 * resolution.y as u64
                    + z as u64 * resolution.y as u64 * resolution.z as u64
            }
            IndexMode::Morton(table) => table.encode(x, y, z),
        }
    }

    /// The voxel coordinate stored at the flat bit index `index`.
    ///
    /// This inverts [`Self::encode`] under the same conditions the encoding
    /// is injective: cubic grids for `Linear`, power-of-two cubic grids for
    /// `Morton`.
    #[inline]
    pub fn decode(&self, resolution: &Vector3<u32>, index: u64) -> Vector3<u32> {
        match self {
            IndexMode::Linear => {
                let yz = resolution.y as u64 * resolution.z as u64;
                let z = index / yz;
                let y = (index % yz) / resolution.y as u64;
                let x = (index % yz) % resolution.y as u64;
                Vector3::new(x as u32, y as u32, z as u32)
            }
            IndexMode::Morton(_) => morton::morton_decode(index),
        }
    }
}

/// A dense, bit-packed voxel occupancy grid that can be toggled concurrently.
///
/// Each `u32` word stores 32 voxels, most significant bit first: bit index
/// `i` lives in word `i / 32` at bit position `31 - i % 32`. The only
/// mutation available during a voxelization pass is [`VoxelGrid::toggle`],
/// an atomic XOR with relaxed ordering. XOR is commutative and associative,
/// so concurrent workers need no ordering among themselves, only the
/// atomicity of each individual flip.
///
/// A fresh grid is zero-initialized. Re-running a pass on a grid that was not
/// [`VoxelGrid::clear`]ed accumulates: every voxel the mesh sets is toggled
/// back off.
pub struct VoxelGrid {
    words: Vec<AtomicU32>,
    len_bits: u64,
}

impl VoxelGrid {
    /// Allocates a zero-initialized grid of `len_bits` voxels.
    pub fn with_bit_len(len_bits: u64) -> Result<Self, VoxelizeError> {
        if len_bits == 0 {
            return Err(VoxelizeError::EmptyGrid);
        }

        let n_words: usize = len_bits
            .div_ceil(32)
            .try_into()
            .map_err(|_| VoxelizeError::GridTooLarge)?;

        log::debug!(
            "allocating {}kB for a voxel grid of {} bits",
            (n_words * 4) / 1024,
            len_bits
        );

        let mut words = Vec::new();
        words.resize_with(n_words, || AtomicU32::new(0));

        Ok(VoxelGrid { words, len_bits })
    }

    /// Allocates a zero-initialized grid sized for `info`'s resolution.
    pub fn for_grid(info: &GridInfo) -> Result<Self, VoxelizeError> {
        Self::with_bit_len(info.bits().ok_or(VoxelizeError::GridTooLarge)?)
    }

    /// The number of voxels (bits) this grid holds.
    #[inline]
    pub fn len_bits(&self) -> u64 {
        self.len_bits
    }

    /// Atomically flips the bit at the given flat index.
    #[inline]
    pub fn toggle(&self, bit: u64) {
        debug_assert!(bit < self.len_bits);
        let word = (bit / 32) as usize;
        let mask = 1u32 << (31 - (bit % 32) as u32);
        let _ = self.words[word].fetch_xor(mask, Ordering::Relaxed);
    }

    /// Reads the bit at the given flat index.
    #[inline]
    pub fn bit(&self, bit: u64) -> bool {
        debug_assert!(bit < self.len_bits);
        let word = self.words[(bit / 32) as usize].load(Ordering::Relaxed);
        word & (1u32 << (31 - (bit % 32) as u32)) != 0
    }

    /// The number of voxels currently set.
    pub fn count_ones(&self) -> u64 {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as u64)
            .sum()
    }

    /// Resets every voxel to zero so the grid can be reused for a fresh pass.
    pub fn clear(&mut self) {
        for w in &self.words {
            w.store(0, Ordering::Relaxed);
        }
    }

    /// The packed words backing this grid.
    #[inline]
    pub fn words(&self) -> &[AtomicU32] {
        &self.words
    }

    /// Copies the grid out as `ceil(len_bits / 8)` packed bytes.
    ///
    /// Bytes follow the grid's most-significant-bit-first convention: bit
    /// index `i` lives in byte `i / 8` at position `7 - i % 8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let n_bytes = self.len_bits.div_ceil(8) as usize;
        let mut bytes = Vec::with_capacity(self.words.len() * 4);

        for w in &self.words {
            bytes.extend_from_slice(&w.load(Ordering::Relaxed).to_be_bytes());
        }

        bytes.truncate(n_bytes);
        bytes
    }
}
