//! Playfield extents and per-entity on-screen checks.

use bevy::prelude::*;

use crate::core::GameConfig;

/// Half extents of the visible play area, centred on the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct PlayfieldBounds {
    pub cam_width: f32,
    pub cam_height: f32,
}

impl Default for PlayfieldBounds {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl PlayfieldBounds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            cam_width: config.cam_width,
            cam_height: config.cam_height,
        }
    }

    /// Rectangle an entity of the given radius can occupy while fully visible.
    pub fn safe_area(&self, radius: f32) -> SafeArea {
        SafeArea {
            half_width: (self.cam_width - radius).max(0.0),
            half_height: (self.cam_height - radius).max(0.0),
        }
    }
}

/// Centred rectangle, given by its half extents. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SafeArea {
    pub half_width: f32,
    pub half_height: f32,
}

impl SafeArea {
    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_width && point.y.abs() <= self.half_height
    }
}

/// Result of checking a position against the playfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundsState {
    /// Entirely inside the visible area
    pub on_screen: bool,
    /// Entirely below the bottom edge
    pub off_down: bool,
}

/// Bounds-check capability attached to every enemy.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BoundsCheck {
    pub radius: f32,
    pub is_on_screen: bool,
    pub off_down: bool,
}

impl BoundsCheck {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            is_on_screen: false,
            off_down: false,
        }
    }

    pub fn evaluate(&self, position: Vec3, bounds: &PlayfieldBounds) -> BoundsState {
        BoundsState {
            on_screen: bounds.safe_area(self.radius).contains(position),
            off_down: position.y < -(bounds.cam_height + self.radius),
        }
    }

    pub fn apply(&mut self, state: BoundsState) {
        self.is_on_screen = state.on_screen;
        self.off_down = state.off_down;
    }
}

/// Refresh every bounds check from the entity's current position.
pub fn update_bounds_checks(
    bounds: Res<PlayfieldBounds>,
    mut query: Query<(&Transform, &mut BoundsCheck)>,
) {
    for (transform, mut check) in query.iter_mut() {
        let state = check.evaluate(transform.translation, &bounds);
        check.apply(state);
    }
}
