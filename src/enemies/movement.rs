//! Enemy movement policies.
//!
//! Every policy is a function of the current time and a handful of values
//! captured at spawn, so motion is deterministic and replayable. The only
//! exception is the eased path, which draws its next waypoint from the
//! injected random source when a leg completes.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use super::error::DefinitionError;
use crate::core::{ease_out, lerp_points};
use crate::world::SafeArea;

/// Where an enemy should be this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSample {
    pub position: Vec3,
    /// Cosmetic rotation about the vertical axis, in degrees
    pub yaw_degrees: f32,
}

impl MoveSample {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }
}

/// Straight down at constant speed. The base enemy movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Descent {
    pub origin: Vec3,
    pub birth_time: f32,
    /// Units per second
    pub speed: f32,
}

impl Descent {
    pub fn new(origin: Vec3, birth_time: f32, speed: f32) -> Self {
        Self {
            origin,
            birth_time,
            speed,
        }
    }

    pub fn position_at(&self, now: f32) -> Vec3 {
        let age = now - self.birth_time;
        Vec3::new(self.origin.x, self.origin.y - self.speed * age, self.origin.z)
    }
}

/// Sideways sine wave on top of a straight descent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    /// Initial x, captured once at spawn
    x0: f32,
    /// Seconds for a full sine wave
    wave_frequency: f32,
    /// Sine wave amplitude in world units
    wave_width: f32,
    /// Maximum yaw in degrees, reached at the wave's extremes
    wave_rot_y: f32,
    descent: Descent,
}

impl Oscillation {
    pub fn new(
        descent: Descent,
        wave_frequency: f32,
        wave_width: f32,
        wave_rot_y: f32,
    ) -> Result<Self, DefinitionError> {
        if !(wave_frequency.is_finite() && wave_frequency > 0.0) {
            return Err(DefinitionError::InvalidWaveFrequency(wave_frequency));
        }

        Ok(Self {
            x0: descent.origin.x,
            wave_frequency,
            wave_width,
            wave_rot_y,
            descent,
        })
    }

    pub fn x0(&self) -> f32 {
        self.x0
    }

    pub fn sample(&self, now: f32) -> MoveSample {
        let age = now - self.descent.birth_time;
        let theta = TAU * age / self.wave_frequency;
        let sin = theta.sin();

        let mut position = self.descent.position_at(now);
        position.x = self.x0 + self.wave_width * sin;

        MoveSample {
            position,
            yaw_degrees: sin * self.wave_rot_y,
        }
    }
}

/// Eased point-to-point travel that picks a fresh on-screen waypoint
/// whenever a leg finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasedPath {
    p0: Vec3,
    p1: Vec3,
    time_start: f32,
    /// Seconds per leg
    duration: f32,
}

impl EasedPath {
    /// Start at `spawn` and immediately pick the first destination.
    pub fn new(
        spawn: Vec3,
        now: f32,
        duration: f32,
        area: SafeArea,
        rng: &mut impl Rng,
    ) -> Result<Self, DefinitionError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(DefinitionError::InvalidDuration(duration));
        }

        let mut path = Self {
            p0: spawn,
            p1: spawn,
            time_start: now,
            duration,
        };
        path.retarget(now, area, rng);
        Ok(path)
    }

    pub fn waypoints(&self) -> (Vec3, Vec3) {
        (self.p0, self.p1)
    }

    pub fn time_start(&self) -> f32 {
        self.time_start
    }

    /// Begin a new leg from the old destination to a random point in `area`.
    pub fn retarget(&mut self, now: f32, area: SafeArea, rng: &mut impl Rng) {
        self.p0 = self.p1;
        self.p1 = Vec3::new(
            symmetric_range(rng, area.half_width),
            symmetric_range(rng, area.half_height),
            self.p1.z,
        );
        self.time_start = now;
    }

    /// Leg progress, unclamped. Reaches 1 when the leg is complete.
    pub fn progress(&self, now: f32) -> f32 {
        (now - self.time_start) / self.duration
    }

    /// Position on the current leg, without retargeting.
    pub fn position_at(&self, now: f32) -> Vec3 {
        let u = ease_out(self.progress(now).clamp(0.0, 1.0));
        lerp_points(self.p0, self.p1, u)
    }

    pub fn sample(&mut self, now: f32, area: SafeArea, rng: &mut impl Rng) -> MoveSample {
        if self.progress(now) >= 1.0 {
            self.retarget(now, area, rng);
        }

        MoveSample {
            position: self.position_at(now),
            yaw_degrees: 0.0,
        }
    }
}

fn symmetric_range(rng: &mut impl Rng, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}

/// The movement policy of an enemy, chosen when it spawns.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    Descend(Descent),
    Oscillate(Oscillation),
    Eased(EasedPath),
}

impl Movement {
    /// Advance to `now`. `area` and `rng` are only consulted by policies that
    /// pick new destinations.
    pub fn sample(&mut self, now: f32, area: SafeArea, rng: &mut impl Rng) -> MoveSample {
        match self {
            Self::Descend(descent) => MoveSample {
                position: descent.position_at(now),
                yaw_degrees: 0.0,
            },
            Self::Oscillate(oscillation) => oscillation.sample(now),
            Self::Eased(path) => path.sample(now, area, rng),
        }
    }
}
