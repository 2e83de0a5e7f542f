use crate::collision::Convex;
use crate::error::{GeometryError, Result};
use crate::math::{project_local, rot90, Point2d, Vector2d};
use crate::util::Interval;
use itertools::iproduct;
use smallvec::{smallvec, SmallVec};

/// Inclusive boundary tolerance for point containment tests, so that
/// floating-point edge touches do not read as misses.
pub const CONTAINMENT_EPSILON: f64 = 1e-6;

/// An oriented rectangle in world space.
///
/// This is the one collidable shape in the simulation: the car body, the
/// static obstacles and the parking slot are all `OrientedRect`s. The value
/// is immutable; the rotation basis and the four world corners are computed
/// once at construction and only ever read afterwards, which makes shared
/// access from multiple threads safe without synchronisation.
#[derive(Clone, Debug)]
pub struct OrientedRect {
    /// Centre x coordinate in m.
    x: f64,
    /// Centre y coordinate in m.
    y: f64,
    /// Rotation in radians, anticlockwise from the positive x-axis.
    theta: f64,
    /// Full width in m.
    w: f64,
    /// Full height in m.
    h: f64,
    /// Unit vector along the local x-axis (width direction).
    axis_x: Vector2d,
    /// Unit vector along the local y-axis (height direction).
    axis_y: Vector2d,
    /// World space corners, in winding order `(+,+), (+,-), (-,-), (-,+)`
    /// of the half extents. Consecutive corners form the four edges.
    corners: [Point2d; 4],
}

impl OrientedRect {
    /// Creates a rectangle centred at `(x, y)`, rotated by `theta`,
    /// with full extents `w` by `h`.
    ///
    /// Fails with [GeometryError::InvalidGeometry] unless both extents
    /// are positive.
    pub fn new(x: f64, y: f64, theta: f64, w: f64, h: f64) -> Result<Self> {
        if w <= 0.0 || h <= 0.0 {
            return Err(GeometryError::InvalidGeometry { w, h });
        }

        let (sin, cos) = theta.sin_cos();
        let axis_x = Vector2d::new(cos, sin);
        let axis_y = rot90(axis_x);

        let centre = Point2d::new(x, y);
        let (hw, hh) = (0.5 * w, 0.5 * h);
        let corners = [(hw, hh), (hw, -hh), (-hw, -hh), (-hw, hh)]
            .map(|(dx, dy)| centre + dx * axis_x + dy * axis_y);

        Ok(Self {
            x,
            y,
            theta,
            w,
            h,
            axis_x,
            axis_y,
            corners,
        })
    }

    /// The centre of the rectangle in world space.
    pub fn centre(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    /// The rotation in radians.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// The full width in m.
    pub fn width(&self) -> f64 {
        self.w
    }

    /// The full height in m.
    pub fn height(&self) -> f64 {
        self.h
    }

    /// The world space corners, cached at construction.
    pub fn corners(&self) -> &[Point2d; 4] {
        &self.corners
    }

    /// Returns true if the world point lies inside the rectangle,
    /// within [CONTAINMENT_EPSILON] of the boundary.
    pub fn contains_point(&self, point: Point2d) -> bool {
        let local = project_local(point, self.centre(), self.axis_x, self.axis_y);
        Interval::disc(0.0, 0.5 * self.w + CONTAINMENT_EPSILON).contains(local.x)
            && Interval::disc(0.0, 0.5 * self.h + CONTAINMENT_EPSILON).contains(local.y)
    }

    /// Tests a batch of world points for containment.
    /// The output is index-aligned with the input.
    pub fn contains_points(&self, points: &[Point2d]) -> Vec<bool> {
        points.iter().map(|p| self.contains_point(*p)).collect()
    }

    /// Estimates the fraction of this rectangle's area that lies inside
    /// `other`, by testing a regular `grid_size` x `grid_size` sample grid
    /// spanning the full extent, end points included. Resolution (and cost)
    /// grows with the square of `grid_size`; a `grid_size` of 1 degenerates
    /// to a containment test of the centre point alone.
    ///
    /// Deterministic: the same pair of rectangles always yields the same
    /// proportion.
    ///
    /// # Panics
    /// Panics if `grid_size` is zero.
    pub fn proportion_in(&self, other: &OrientedRect, grid_size: usize) -> f64 {
        assert!(grid_size >= 1, "grid_size must be at least 1");

        let steps = |extent: f64| -> SmallVec<[f64; 8]> {
            if grid_size == 1 {
                smallvec![0.0]
            } else {
                let spacing = extent / (grid_size - 1) as f64;
                (0..grid_size)
                    .map(|i| -0.5 * extent + i as f64 * spacing)
                    .collect()
            }
        };
        let xs = steps(self.w);
        let ys = steps(self.h);

        let centre = self.centre();
        let inside = iproduct!(xs.iter(), ys.iter())
            .filter(|(&dx, &dy)| other.contains_point(centre + dx * self.axis_x + dy * self.axis_y))
            .count();
        inside as f64 / (grid_size * grid_size) as f64
    }
}

impl Convex for OrientedRect {
    fn corners(&self) -> &[Point2d] {
        &self.corners
    }
}
