//! Triangle rasterization for the parity (XOR scan-fill) solid voxelization.
//!
//! Every triangle is projected onto the plane orthogonal to the x axis (the
//! ray axis). Each grid column covered by the projection contributes one
//! surface crossing: all the voxels from the grid origin up to the crossing
//! are toggled, so after every triangle of a watertight mesh has been
//! processed, a voxel is set exactly when an odd number of crossings lies
//! above its center.

use std::mem;

use crate::grid::{GridInfo, IndexMode, VoxelGrid};
use crate::math::{Point2, Point3, Real, Vector3, FLOAT_ERROR};

/// The position of a 2-D point relative to a projected triangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointClass {
    /// The point is strictly inside the triangle.
    Inside,
    /// The point is strictly outside the triangle.
    Outside,
    /// The point lies on the edge of the given index (0 is `v0v1`, 1 is
    /// `v1v2`, 2 is `v2v0`).
    OnEdge(u32),
}

/// Is the triangle `(v0, v1, v2)` wound counter-clockwise?
///
/// A degenerate (zero signed area) triangle is not counter-clockwise.
#[inline]
pub fn is_ccw(v0: &Point2<Real>, v1: &Point2<Real>, v2: &Point2<Real>) -> bool {
    let e0 = v1 - v0;
    let e1 = v2 - v0;
    e0.perp(&e1) > 0.0
}

/// Classifies `p` against the counter-clockwise triangle `(v0, v1, v2)`.
///
/// The vertices must already be wound counter-clockwise so that the
/// all-same-sign interior test has a single fixed polarity. A point counts
/// as on an edge when the corresponding cross product is smaller than
/// [`FLOAT_ERROR`] in magnitude and the point lies between the edge's
/// endpoints.
pub fn classify_point(
    v0: &Point2<Real>,
    v1: &Point2<Real>,
    v2: &Point2<Real>,
    p: &Point2<Real>,
) -> PointClass {
    let pa = p - v0;
    let pb = p - v1;
    let pc = p - v2;

    let t0 = pa.perp(&pb);
    if t0.abs() < FLOAT_ERROR && pa.x * pb.x <= 0.0 && pa.y * pb.y <= 0.0 {
        return PointClass::OnEdge(0);
    }

    let t1 = pb.perp(&pc);
    if t1.abs() < FLOAT_ERROR && pb.x * pc.x <= 0.0 && pb.y * pc.y <= 0.0 {
        return PointClass::OnEdge(1);
    }

    let t2 = pc.perp(&pa);
    if t2.abs() < FLOAT_ERROR && pc.x * pa.x <= 0.0 && pc.y * pa.y <= 0.0 {
        return PointClass::OnEdge(2);
    }

    if t0 * t1 > 0.0 && t0 * t2 > 0.0 {
        PointClass::Inside
    } else {
        PointClass::Outside
    }
}

/// The top-left rule: does the edge `v0 -> v1` own the samples lying on it?
///
/// An edge owns its samples when it is a "top" edge (going downward) or a
/// "left" edge (horizontal, going leftward). Of two adjacent triangles
/// sharing an edge, exactly one sees the shared edge as top-left, so a grid
/// column lying exactly on it is toggled exactly once. Toggling it twice or
/// not at all would corrupt the crossing parity of the whole column.
#[inline]
pub fn is_top_left_edge(v0: &Point2<Real>, v1: &Point2<Real>) -> bool {
    v1.y < v0.y || (v1.y == v0.y && v0.x > v1.x)
}

/// Solves the triangle's plane equation at the projected point `p` for the
/// coordinate along the ray (x) axis.
///
/// `n` is the triangle normal and `v0` one of its vertices; `n.x` must not be
/// negligible.
#[inline]
pub fn ray_axis_coordinate(n: &Vector3<Real>, v0: &Point3<Real>, p: &Point2<Real>) -> Real {
    -(n.y * (p.x - v0.y) + n.z * (p.y - v0.z)) / n.x + v0.x
}

/// Rasterizes one triangle (nine floats) and toggles its voxel crossings.
///
/// Triangles nearly parallel to the ray axis contribute nothing: their
/// projected footprint degenerates.
pub(crate) fn voxelize_triangle(
    info: &GridInfo,
    tri: &[Real],
    voxels: &VoxelGrid,
    mode: IndexMode,
) {
    // Move the vertices to the grid-local frame.
    let mins = info.aabb.mins.coords;
    let v0 = Point3::new(tri[0], tri[1], tri[2]) - mins;
    let v1 = Point3::new(tri[3], tri[4], tri[5]) - mins;
    let v2 = Point3::new(tri[6], tri[7], tri[8]) - mins;

    let e0 = v1 - v0;
    let e1 = v2 - v1;
    let n = e0.cross(&e1).normalize();

    // Also skips degenerate triangles, whose normal is NaN.
    if !(n.x.abs() >= FLOAT_ERROR) {
        return;
    }

    // Project onto the yz plane and enforce a counter-clockwise winding.
    let mut p0 = Point2::new(v0.y, v0.z);
    let mut p1 = Point2::new(v1.y, v1.z);
    let mut p2 = Point2::new(v2.y, v2.z);

    if !is_ccw(&p0, &p1, &p2) {
        mem::swap(&mut p1, &mut p2);
    }

    // The inclusive range of grid columns overlapped by the projection,
    // sampling each column at its voxel center (index i samples at
    // (i + 0.5) * unit).
    let bb_min = p0.coords.inf(&p1.coords.inf(&p2.coords));
    let bb_max = p0.coords.sup(&p1.coords.sup(&p2.coords));

    let unit = info.unit;
    let y_min = (bb_min.x / unit.y - 0.5).ceil() as i64;
    let y_max = (bb_max.x / unit.y - 0.5).floor() as i64;
    let z_min = (bb_min.y / unit.z - 0.5).ceil() as i64;
    let z_max = (bb_max.y / unit.z - 0.5).floor() as i64;

    for y in y_min..=y_max {
        for z in z_min..=z_max {
            let center = Point2::new(
                (y as Real + 0.5) * unit.y,
                (z as Real + 0.5) * unit.z,
            );

            let owned = match classify_point(&p0, &p1, &p2, &center) {
                PointClass::Inside => true,
                PointClass::Outside => false,
                PointClass::OnEdge(0) => is_top_left_edge(&p0, &p1),
                PointClass::OnEdge(1) => is_top_left_edge(&p1, &p2),
                PointClass::OnEdge(_) => is_top_left_edge(&p2, &p0),
            };

            if !owned {
                continue;
            }

            // The highest voxel whose center lies below the surface crossing.
            let x_max =
                ((ray_axis_coordinate(&n, &v0, &center) / unit.x) - 0.5).floor() as i64;
            debug_assert!(x_max < info.resolution.x as i64);
            debug_assert!(y >= 0 && (y as u64) < info.resolution.y as u64);
            debug_assert!(z >= 0 && (z as u64) < info.resolution.z as u64);

            for x in 0..=x_max {
                let bit = mode.encode(&info.resolution, x as u32, y as u32, z as u32);
                voxels.toggle(bit);
            }
        }
    }
}
