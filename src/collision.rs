//! Separating-axis collision testing between convex shapes.

use crate::math::{rot90, Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;
use log::trace;

/// A convex polygon that can take part in collision and lidar queries.
///
/// Only [OrientedRect](crate::OrientedRect) implements this today, but the
/// collision test and the lidar cast are written against this seam so other
/// convex shapes can join without touching either algorithm.
pub trait Convex {
    /// World space corners in a fixed winding order.
    /// Consecutive corners (wrapping at the end) form the edges.
    fn corners(&self) -> &[Point2d];
}

/// Tests whether two convex shapes overlap, using the separating axis
/// theorem: the shapes are disjoint iff some edge normal of either shape
/// separates their projected extents. Exact for convex polygons.
///
/// Shapes that merely touch along an edge or at a corner are not reported
/// as colliding; the projection comparison is strict.
pub fn is_collision(a: &impl Convex, b: &impl Convex) -> bool {
    for corners in [a.corners(), b.corners()] {
        for (i, edge) in edges(corners).enumerate() {
            let normal = rot90(edge);
            let length = normal.magnitude();
            if length == 0.0 {
                // Degenerate edge; it contributes no separating direction.
                trace!("skipping zero-length edge {i} in collision test");
                continue;
            }
            let axis = normal / length;
            if !project(a.corners(), axis).overlaps(&project(b.corners(), axis)) {
                return false;
            }
        }
    }
    true
}

/// The edge vectors of a polygon, one per consecutive corner pair.
fn edges(corners: &[Point2d]) -> impl Iterator<Item = Vector2d> + '_ {
    (0..corners.len()).map(|i| corners[(i + 1) % corners.len()] - corners[i])
}

/// Projects a corner set onto an axis, returning the extent interval.
fn project(corners: &[Point2d], axis: Vector2d) -> Interval<f64> {
    corners
        .iter()
        .map(|c| c.to_vec().dot(axis))
        .fold(Interval::new(f64::INFINITY, f64::NEG_INFINITY), |i, p| {
            Interval::new(f64::min(i.min, p), f64::max(i.max, p))
        })
}
