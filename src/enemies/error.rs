//! Error types for enemy definitions and impact resolution.

use bevy::prelude::Entity;
use thiserror::Error;

/// An enemy definition that cannot be turned into a working enemy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DefinitionError {
    /// Oscillation period must be finite and positive.
    #[error("Invalid wave frequency {0}: must be a positive number of seconds")]
    InvalidWaveFrequency(f32),

    /// Interpolation leg duration must be finite and positive.
    #[error("Invalid movement duration {0}: must be a positive number of seconds")]
    InvalidDuration(f32),

    /// A parted hull needs at least one part.
    #[error("Parted hull has no parts")]
    NoParts,

    /// Two parts share a name.
    #[error("Duplicate part name '{0}'")]
    DuplicatePart(String),

    /// A part lists a protector that does not exist.
    #[error("Part '{part}' is protected by unknown part '{protector}'")]
    UnknownProtector { part: String, protector: String },

    /// A part lists itself as a protector.
    #[error("Part '{0}' protects itself")]
    SelfProtected(String),

    /// Protection dependencies loop back on themselves.
    #[error("Protection cycle through part '{0}'")]
    ProtectionCycle(String),

    /// Starting health is NaN or infinite.
    #[error("Part '{part}' has invalid health {health}")]
    InvalidHealth { part: String, health: f32 },
}

/// An impact that could not be attributed to any part.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ImpactError {
    /// Neither contact surface matches a part of the struck enemy.
    #[error("No part matches contact surfaces {0:?} or {1:?}")]
    PartNotFound(Entity, Entity),
}

/// Errors that can occur when loading enemy definition files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The file parsed but describes an unusable enemy.
    #[error("Invalid definition in '{path}': {source}")]
    InvalidDefinition {
        path: String,
        #[source]
        source: DefinitionError,
    },
}
