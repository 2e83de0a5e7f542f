//! Kinematic bicycle model integration.

use crate::error::{GeometryError, Result};
use crate::math::wrap_angle;

/// The instantaneous state of the car.
///
/// `theta` is always the heading; the steering lock is a control input
/// passed to [Bicycle::update] and is never part of the state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarState {
    /// Position x coordinate in m.
    pub x: f64,
    /// Position y coordinate in m.
    pub y: f64,
    /// Heading in radians, kept in `[0, 2π)` by [Bicycle::update].
    pub theta: f64,
    /// Forward speed in m/s.
    pub v: f64,
}

impl CarState {
    /// Creates a car state.
    pub fn new(x: f64, y: f64, theta: f64, v: f64) -> Self {
        Self { x, y, theta, v }
    }
}

/// An explicit-Euler integrator for the kinematic bicycle model.
///
/// The model treats each wheel pair as a single wheel, relating the
/// heading rate to the speed, the wheelbase and the steering angle.
/// The integrator is stateless apart from its fixed configuration: the
/// same state and inputs always produce the same next state. No limits
/// are placed on speed, acceleration or steering; callers enforce
/// physical bounds such as maximum steering lock.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bicycle {
    /// Distance between the front and rear axles in m.
    length: f64,
    /// Integration timestep in s.
    dt: f64,
}

impl Bicycle {
    /// Creates an integrator with the given wheelbase and timestep.
    ///
    /// Fails with [GeometryError::InvalidParameter] unless both are
    /// positive.
    pub fn new(length: f64, dt: f64) -> Result<Self> {
        if length <= 0.0 {
            return Err(GeometryError::InvalidParameter {
                name: "length",
                value: length,
            });
        }
        if dt <= 0.0 {
            return Err(GeometryError::InvalidParameter {
                name: "dt",
                value: dt,
            });
        }
        Ok(Self { length, dt })
    }

    /// The wheelbase in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The timestep in s.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Advances the state by one timestep under the given acceleration
    /// and steering angle (radians). The returned heading is wrapped to
    /// `[0, 2π)`.
    pub fn update(&self, state: &CarState, acceleration: f64, steering: f64) -> CarState {
        let x_dot = state.v * state.theta.cos();
        let y_dot = state.v * state.theta.sin();
        let theta_dot = (state.v / self.length) * steering.tan();
        let v_dot = acceleration;

        CarState {
            x: state.x + x_dot * self.dt,
            y: state.y + y_dot * self.dt,
            theta: wrap_angle(state.theta + theta_dot * self.dt),
            v: state.v + v_dot * self.dt,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{FRAC_PI_4, TAU};

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(matches!(
            Bicycle::new(0.0, 0.1),
            Err(GeometryError::InvalidParameter { name: "length", .. })
        ));
        assert!(matches!(
            Bicycle::new(2.0, -0.1),
            Err(GeometryError::InvalidParameter { name: "dt", .. })
        ));
        assert!(Bicycle::new(2.0, 0.1).is_ok());
    }

    #[test]
    fn coasting_moves_straight_ahead() {
        let model = Bicycle::new(2.0, 0.1).unwrap();
        let next = model.update(&CarState::new(0.0, 0.0, 0.0, 1.0), 0.0, 0.0);
        assert_approx_eq!(next.x, 0.1);
        assert_approx_eq!(next.y, 0.0);
        assert_approx_eq!(next.theta, 0.0);
        assert_approx_eq!(next.v, 1.0);
    }

    #[test]
    fn steering_turns_the_heading() {
        let model = Bicycle::new(2.0, 0.1).unwrap();
        let next = model.update(&CarState::new(0.0, 0.0, 0.0, 1.0), 0.0, FRAC_PI_4);
        // theta_dot = (v / length) * tan(pi/4) = 0.5
        assert_approx_eq!(next.theta, 0.05);
        // The position derivative uses the heading before the update.
        assert_approx_eq!(next.x, 0.1);
        assert_approx_eq!(next.y, 0.0);
    }

    #[test]
    fn acceleration_changes_speed() {
        let model = Bicycle::new(2.0, 0.1).unwrap();
        let next = model.update(&CarState::new(0.0, 0.0, 0.0, 1.0), 2.0, 0.0);
        assert_approx_eq!(next.v, 1.2);
    }

    #[test]
    fn heading_wraps_into_range() {
        let model = Bicycle::new(2.0, 0.1).unwrap();
        // Steering hard right from zero heading goes slightly negative,
        // which must wrap to just under a full turn.
        let next = model.update(&CarState::new(0.0, 0.0, 0.0, 1.0), 0.0, -FRAC_PI_4);
        assert_approx_eq!(next.theta, TAU - 0.05);

        let mut state = CarState::new(0.0, 0.0, 0.0, 2.0);
        for _ in 0..500 {
            state = model.update(&state, 0.0, FRAC_PI_4);
            assert!((0.0..TAU).contains(&state.theta));
        }
    }

    #[test]
    fn update_is_deterministic() {
        let model = Bicycle::new(2.5, 0.01).unwrap();
        let state = CarState::new(1.0, -2.0, 0.7, 3.0);
        assert_eq!(
            model.update(&state, 0.5, 0.1),
            model.update(&state, 0.5, 0.1)
        );
    }

    #[test]
    fn reversing_moves_backwards() {
        let model = Bicycle::new(2.0, 0.1).unwrap();
        let next = model.update(&CarState::new(0.0, 0.0, 0.0, -1.0), 0.0, 0.0);
        assert_approx_eq!(next.x, -0.1);
    }
}
