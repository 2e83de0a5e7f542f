pub use cgmath;
pub use collision::{is_collision, Convex};
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use debug::{debug_line, debug_rect};
pub use error::{GeometryError, Result};
pub use kinematics::{Bicycle, CarState};
pub use lidar::{Lidar, LidarScan, PARALLEL_EPSILON};
pub use rect::{OrientedRect, CONTAINMENT_EPSILON};
pub use util::Interval;

mod collision;
mod debug;
mod error;
mod kinematics;
mod lidar;
pub mod math;
mod rect;
mod util;
