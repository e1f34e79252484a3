//! Stepped rotation animation.
//!
//! A tween is a bounded sequence of discrete steps fired on a periodic
//! timer. Time is fed in explicitly through [`RotationTween::advance`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Angle added by one click-to-rotate request, in degrees.
pub const ROTATION_STEP_DEGREES: f64 = 45.0;

/// Step count and total duration of a rotation tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweenProfile {
    pub steps: u32,
    pub duration: Duration,
}

impl TweenProfile {
    /// Jump straight to the target.
    pub const INSTANT: TweenProfile = TweenProfile {
        steps: 1,
        duration: Duration::ZERO,
    };

    pub fn new(steps: u32, duration: Duration) -> Self {
        Self {
            steps: steps.max(1),
            duration,
        }
    }

    /// `steps` steps, one every `interval`.
    pub fn per_frame(steps: u32, interval: Duration) -> Self {
        Self::new(steps, interval * steps.max(1))
    }

    pub fn step_interval(&self) -> Duration {
        self.duration / self.steps.max(1)
    }

    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

impl Default for TweenProfile {
    fn default() -> Self {
        Self::INSTANT
    }
}

/// Interpolated rotation from one angle to another.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationTween {
    from: f64,
    to: f64,
    profile: TweenProfile,
    elapsed: Duration,
    step: u32,
}

impl RotationTween {
    pub fn new(from: f64, to: f64, profile: TweenProfile) -> Self {
        Self {
            from,
            to,
            profile,
            elapsed: Duration::ZERO,
            step: 0,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.profile.steps
    }

    /// Angle after the steps fired so far. The last step is exactly the target.
    pub fn current(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let increment = (self.to - self.from) / f64::from(self.profile.steps);
        self.from + increment * f64::from(self.step)
    }

    /// Advance the clock. Returns the new angle if at least one step fired.
    pub fn advance(&mut self, dt: Duration) -> Option<f64> {
        if self.is_finished() {
            return None;
        }
        self.elapsed += dt;
        let interval = self.profile.step_interval();
        let due = if interval.is_zero() {
            self.profile.steps
        } else {
            let fired = self.elapsed.as_nanos() / interval.as_nanos();
            u32::try_from(fired).unwrap_or(u32::MAX).min(self.profile.steps)
        };
        if due > self.step {
            self.step = due;
            Some(self.current())
        } else {
            None
        }
    }
}

/// Click-to-rotate state: the logical angle plus the tween showing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spinner {
    logical: f64,
    displayed: f64,
    profile: TweenProfile,
    tween: Option<RotationTween>,
}

impl Spinner {
    pub fn new(initial: f64, profile: TweenProfile) -> Self {
        Self {
            logical: initial,
            displayed: initial,
            profile,
            tween: None,
        }
    }

    /// Angle every request so far adds up to.
    pub fn logical(&self) -> f64 {
        self.logical
    }

    /// Angle currently on screen.
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Request another `degrees` of rotation. A running tween is discarded and
    /// a new one starts from the displayed angle.
    ///
    /// Returns the displayed angle if it changed immediately (instant profiles).
    pub fn request(&mut self, degrees: f64) -> Option<f64> {
        self.logical += degrees;
        let mut tween = RotationTween::new(self.displayed, self.logical, self.profile);
        if self.profile.is_instant() {
            self.displayed = tween.advance(Duration::ZERO).unwrap_or(self.logical);
            self.tween = None;
            return Some(self.displayed);
        }
        self.tween = Some(tween);
        None
    }

    /// Advance a running tween. Returns the new displayed angle if it moved.
    pub fn tick(&mut self, dt: Duration) -> Option<f64> {
        let tween = self.tween.as_mut()?;
        let angle = tween.advance(dt);
        if tween.is_finished() {
            self.tween = None;
        }
        if let Some(angle) = angle {
            self.displayed = angle;
        }
        angle
    }
}
