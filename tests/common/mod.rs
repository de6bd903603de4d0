#![allow(dead_code)] // Not every test target uses every helper.

use mesh_voxelize::{voxelize_solid, Aabb, GridInfo, IndexMode, VoxelGrid, VoxelizeContext};
use nalgebra::{Point3, Vector3};

/// Grid metadata for a cubic grid exactly covering the unit box `[0, 1]³`.
pub fn unit_grid(resolution: u32, n_triangles: usize) -> GridInfo {
    GridInfo {
        resolution: Vector3::repeat(resolution),
        unit: Vector3::repeat(1.0 / resolution as f32),
        aabb: Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)),
        n_triangles,
    }
}

/// Allocates a fresh grid and runs one voxelization pass into it.
pub fn voxelize(info: &GridInfo, triangles: &[f32], workers: usize, mode: IndexMode) -> VoxelGrid {
    let ctx = VoxelizeContext::new(workers);
    let grid = VoxelGrid::for_grid(info).unwrap();
    voxelize_solid(&ctx, info, triangles, &grid, mode).unwrap();
    grid
}

fn push_triangle(out: &mut Vec<f32>, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) {
    out.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]);
}

/// A closed axis-aligned cube spanning `[min, max]³`, as 12 triangles.
pub fn cube(min: f32, max: f32) -> Vec<f32> {
    let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
    let (a, b) = (min, max);

    // One quad per face, each split into two triangles along its diagonal.
    let quads = [
        [p(a, a, a), p(a, a, b), p(a, b, b), p(a, b, a)], // -x
        [p(b, a, a), p(b, b, a), p(b, b, b), p(b, a, b)], // +x
        [p(a, a, a), p(b, a, a), p(b, a, b), p(a, a, b)], // -y
        [p(a, b, a), p(a, b, b), p(b, b, b), p(b, b, a)], // +y
        [p(a, a, a), p(a, b, a), p(b, b, a), p(b, a, a)], // -z
        [p(a, a, b), p(b, a, b), p(b, b, b), p(a, b, b)], // +z
    ];

    let mut out = Vec::with_capacity(12 * 9);
    for [q0, q1, q2, q3] in quads {
        push_triangle(&mut out, q0, q1, q2);
        push_triangle(&mut out, q0, q2, q3);
    }
    out
}

/// A closed UV-sphere triangulation with poles on the x axis.
///
/// Vertices are computed from a single formula so that shared vertices are
/// bitwise identical and the mesh is watertight.
pub fn sphere(center: Point3<f32>, radius: f32, stacks: u32, slices: u32) -> Vec<f32> {
    use std::f32::consts::PI;

    let vert = |i: u32, j: u32| -> Point3<f32> {
        if i == 0 {
            return Point3::new(center.x + radius, center.y, center.z);
        }
        if i == stacks {
            return Point3::new(center.x - radius, center.y, center.z);
        }

        let theta = PI * i as f32 / stacks as f32;
        let phi = 2.0 * PI * (j % slices) as f32 / slices as f32;
        Point3::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin() * phi.cos(),
            center.z + radius * theta.sin() * phi.sin(),
        )
    };

    let mut out = Vec::new();
    for i in 0..stacks {
        for j in 0..slices {
            let a = vert(i, j);
            let b = vert(i + 1, j);
            let c = vert(i + 1, j + 1);
            let d = vert(i, j + 1);

            if i + 1 < stacks {
                push_triangle(&mut out, a, b, c);
            }
            if i > 0 {
                push_triangle(&mut out, a, c, d);
            }
        }
    }
    out
}

/// The number of triangles in a flat 9-floats-per-triangle buffer.
pub fn triangle_count(buffer: &[f32]) -> usize {
    assert_eq!(buffer.len() % 9, 0);
    buffer.len() / 9
}
