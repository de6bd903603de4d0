//! Axis Aligned Bounding Box.

use crate::math::{Point3, Real, Vector3};
use na;

/// An Axis-Aligned Bounding Box (AABB), defined by its minimum and maximum
/// corners.
///
/// Invariant: `mins.x <= maxs.x`, `mins.y <= maxs.y`, `mins.z <= maxs.z`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates of this AABB.
    pub mins: Point3<Real>,
    /// The point with the highest coordinates of this AABB.
    pub maxs: Point3<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must be smaller than `maxs` component-wise.
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point3<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The smallest AABB containing all the given points.
    ///
    /// Panics if `points` is empty.
    pub fn from_points<'a, I>(points: I) -> Aabb
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut it = points.into_iter();
        let p0 = it
            .next()
            .expect("Aabb::from_points: the input iterator is empty.");
        let mut mins = *p0;
        let mut maxs = *p0;

        for pt in it {
            mins = mins.inf(pt);
            maxs = maxs.sup(pt);
        }

        Aabb { mins, maxs }
    }
}
