//! Morton (Z-order) encoding of voxel coordinates via per-axis lookup tables.

use crate::math::Vector3;

/// Byte-wide Morton lookup tables, one per axis.
///
/// Entry `i` of the axis-`a` table spreads the eight bits of the byte `i`
/// so that bit `b` of the byte lands at bit `3 * b + a` of the entry. A full
/// coordinate is encoded byte by byte, each byte's pre-spread pattern shifted
/// by 24 bits per byte position, and the three axes OR-combined.
///
/// The tables are immutable once built and shared read-only by every worker
/// of a voxelization pass. They are an explicit input of the pass rather than
/// a process-wide global, so independent invocations can never interfere.
pub struct MortonTable {
    x: [u32; 256],
    y: [u32; 256],
    z: [u32; 256],
}

impl Default for MortonTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MortonTable {
    /// Builds the three 256-entry tables.
    pub fn new() -> Self {
        let mut x = [0u32; 256];
        let mut y = [0u32; 256];
        let mut z = [0u32; 256];

        for (i, (xi, (yi, zi))) in x.iter_mut().zip(y.iter_mut().zip(z.iter_mut())).enumerate() {
            let spread = split_by_3_u8(i as u8);
            *xi = spread;
            *yi = spread << 1;
            *zi = spread << 2;
        }

        MortonTable { x, y, z }
    }

    /// Encodes a voxel coordinate into a Morton code.
    ///
    /// Coordinates must fit in 21 bits each so that the interleaved code fits
    /// in a `u64`.
    #[inline]
    pub fn encode(&self, x: u32, y: u32, z: u32) -> u64 {
        let mut code = 0u64;

        // Three byte positions cover the 21 usable bits per axis.
        for b in 0..3u32 {
            let byte = |v: u32| ((v >> (8 * b)) & 0xff) as usize;
            let spread = self.x[byte(x)] | self.y[byte(y)] | self.z[byte(z)];
            code |= (spread as u64) << (24 * b);
        }

        code
    }
}

/// Spreads the bits of a byte so that bit `b` lands at bit `3 * b`.
#[inline]
fn split_by_3_u8(a: u8) -> u32 {
    let mut x = a as u32;
    x = (x | x << 8) & 0x0f00f;
    x = (x | x << 4) & 0xc30c3;
    x = (x | x << 2) & 0x249249;
    x
}

/// Collects every third bit of `code`, starting at bit 0.
#[inline]
fn compact_by_3_u64(code: u64) -> u32 {
    let mut x = code & 0x1249249249249249;
    x = (x ^ (x >> 2)) & 0x10c30c30c30c30c3;
    x = (x ^ (x >> 4)) & 0x100f00f00f00f00f;
    x = (x ^ (x >> 8)) & 0x1f0000ff0000ff;
    x = (x ^ (x >> 16)) & 0x1f00000000ffff;
    x = (x ^ (x >> 32)) & 0x1fffff;
    x as u32
}

/// Decodes a Morton code back into a voxel coordinate.
///
/// This is the exact inverse of [`MortonTable::encode`] for coordinates
/// fitting in 21 bits each.
#[inline]
pub fn morton_decode(code: u64) -> Vector3<u32> {
    Vector3::new(
        compact_by_3_u64(code),
        compact_by_3_u64(code >> 1),
        compact_by_3_u64(code >> 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bit-by-bit interleaving, the slow way.
    fn naive_encode(x: u32, y: u32, z: u32) -> u64 {
        let mut code = 0u64;
        for b in 0..21 {
            code |= ((x as u64 >> b) & 1) << (3 * b);
            code |= ((y as u64 >> b) & 1) << (3 * b + 1);
            code |= ((z as u64 >> b) & 1) << (3 * b + 2);
        }
        code
    }

    #[test]
    fn lut_matches_naive_interleave() {
        let table = MortonTable::new();
        let samples = [0u32, 1, 2, 3, 7, 8, 255, 256, 511, 1023, 4096, 65535, 0x1f_ffff];

        for &x in &samples {
            for &y in &samples {
                for &z in &samples {
                    assert_eq!(table.encode(x, y, z), naive_encode(x, y, z));
                }
            }
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let table = MortonTable::new();

        for &(x, y, z) in &[(0u32, 0u32, 0u32), (1, 2, 3), (255, 128, 64), (300, 511, 257)] {
            let code = table.encode(x, y, z);
            assert_eq!(morton_decode(code), Vector3::new(x, y, z));
        }
    }

    #[test]
    fn first_codes_follow_the_z_curve() {
        let table = MortonTable::new();
        assert_eq!(table.encode(0, 0, 0), 0);
        assert_eq!(table.encode(1, 0, 0), 1);
        assert_eq!(table.encode(0, 1, 0), 2);
        assert_eq!(table.encode(1, 1, 0), 3);
        assert_eq!(table.encode(0, 0, 1), 4);
        assert_eq!(table.encode(1, 1, 1), 7);
    }
}
