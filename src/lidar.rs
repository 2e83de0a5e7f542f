//! Synthetic range sensing against obstacle edges.

use crate::collision::Convex;
use crate::debug::debug_line;
use crate::error::{GeometryError, Result};
use crate::kinematics::CarState;
use crate::math::{rot90, Point2d, Vector2d};
use cgmath::prelude::*;
use log::trace;
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// Rays closer to parallel with an edge than this are treated as misses.
pub const PARALLEL_EPSILON: f64 = 1e-8;

/// One scan's worth of per-ray distances, index-aligned with ray angle.
/// Inlined up to 32 rays so routine scans stay off the heap.
pub type LidarScan = SmallVec<[f64; 32]>;

/// A simulated lidar mounted at the car's centre.
///
/// Rays are evenly spaced over a full turn, with ray 0 aligned with the
/// car's heading. Scanning is a pure function of the pose and the obstacle
/// set; the sensor itself holds only its fixed configuration.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lidar {
    /// Number of rays per scan.
    n_rays: usize,
    /// Maximum sensing distance in m; rays that hit nothing report this.
    max_range: f64,
    /// Whether to map distances from `[0, max_range]` onto `[-1, 1]`.
    normalize: bool,
}

impl Lidar {
    /// Creates a lidar configuration.
    ///
    /// Fails with [GeometryError::InvalidParameter] if `n_rays` is zero or
    /// `max_range` is not positive.
    pub fn new(n_rays: usize, max_range: f64, normalize: bool) -> Result<Self> {
        if n_rays == 0 {
            return Err(GeometryError::InvalidParameter {
                name: "n_rays",
                value: n_rays as f64,
            });
        }
        if max_range <= 0.0 {
            return Err(GeometryError::InvalidParameter {
                name: "max_range",
                value: max_range,
            });
        }
        Ok(Self {
            n_rays,
            max_range,
            normalize,
        })
    }

    /// The number of rays per scan.
    pub fn n_rays(&self) -> usize {
        self.n_rays
    }

    /// The maximum sensing distance in m.
    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    /// Casts all rays from the car's pose against every obstacle edge and
    /// returns the per-ray distance to the nearest hit, capped at the
    /// maximum range. Ray `k` points at `car.theta + k * 2π / n_rays`.
    ///
    /// With `normalize` set, distance `d` is reported as
    /// `(2d - max_range) / max_range`, so a contact reads -1 and a clear
    /// ray reads +1.
    pub fn scan(&self, car: &CarState, obstacles: &[impl Convex]) -> LidarScan {
        let origin = Point2d::new(car.x, car.y);
        let spacing = TAU / self.n_rays as f64;

        (0..self.n_rays)
            .map(|k| {
                let angle = car.theta + k as f64 * spacing;
                let (sin, cos) = angle.sin_cos();
                let dir = Vector2d::new(cos, sin);

                let mut nearest = self.max_range;
                for obstacle in obstacles {
                    for (p1, p2) in edge_pairs(obstacle.corners()) {
                        if let Some(t) = ray_segment(origin, dir, p1, p2) {
                            nearest = f64::min(nearest, t);
                        }
                    }
                }

                debug_line("lidar", origin, origin + nearest * dir);

                if self.normalize {
                    (2.0 * nearest - self.max_range) / self.max_range
                } else {
                    nearest
                }
            })
            .collect()
    }
}

/// The consecutive corner pairs of a polygon, wrapping at the end.
fn edge_pairs(corners: &[Point2d]) -> impl Iterator<Item = (Point2d, Point2d)> + '_ {
    (0..corners.len()).map(|i| (corners[i], corners[(i + 1) % corners.len()]))
}

/// Distance along the ray `origin + t * dir` at which it crosses the
/// segment `p1 -> p2`, or `None` if the ray misses or runs parallel.
fn ray_segment(origin: Point2d, dir: Vector2d, p1: Point2d, p2: Point2d) -> Option<f64> {
    let v1 = origin - p1;
    let v2 = p2 - p1;
    let v3 = rot90(dir);

    let denom = v2.dot(v3);
    if denom.abs() < PARALLEL_EPSILON {
        trace!("ray parallel to segment, skipping edge");
        return None;
    }

    let t = v2.perp_dot(v1) / denom;
    let u = v1.dot(v3) / denom;
    (t >= 0.0 && (0.0..=1.0).contains(&u)).then_some(t)
}
