//! Field parameter types.
//!
//! Contains every tunable constant of the particle field, grouped the way
//! they are consumed: spawn, motion profiles, and the two colour tones.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading or validating field parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid parameters: {0}")]
    Invalid(String),
}

/// Which motion profile a session runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionProfile {
    /// Continuous animation, density scaled with viewport area.
    #[default]
    Normal,
    /// One static frame, fixed low particle count, slow and short links.
    Reduced,
}

impl MotionProfile {
    pub fn from_preference(prefers_reduced_motion: bool) -> Self {
        if prefers_reduced_motion {
            Self::Reduced
        } else {
            Self::Normal
        }
    }

    /// Whether this profile keeps scheduling frames after the first one.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

// ============================================================================
// Motion profiles
// ============================================================================

/// Parameters that differ between normal and reduced motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionParams {
    /// Fixed particle count. `None` derives the count from viewport area.
    pub fixed_count: Option<usize>,
    /// Maximum absolute velocity per axis, in px/frame.
    pub max_speed: f32,
    /// Distance below which two particles are linked, in px.
    pub link_distance: f32,
}

impl MotionParams {
    pub fn normal() -> Self {
        Self {
            fixed_count: None,
            max_speed: 0.2,
            link_distance: 110.0,
        }
    }

    pub fn reduced() -> Self {
        Self {
            fixed_count: Some(40),
            max_speed: 0.05,
            link_distance: 60.0,
        }
    }

    /// Squared link threshold, compared against squared pair distances.
    #[inline]
    pub fn link_distance_sq(&self) -> f32 {
        self.link_distance * self.link_distance
    }
}

// ============================================================================
// Colour tones
// ============================================================================

/// HSL tone shared by all discs or all links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneParams {
    /// Saturation in percent (0 - 100).
    pub saturation: f32,
    /// Lightness in percent (0 - 100).
    pub lightness: f32,
    /// Divisor applied to the x coordinate before it offsets the hue.
    pub hue_spread: f32,
}

// ============================================================================
// Field
// ============================================================================

/// All parameters of the particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Viewport area (px²) per particle under normal motion.
    pub area_per_particle: f32,
    /// Inflation of the viewport bound before a particle wraps, in px.
    pub edge_margin: f32,
    /// Hue advance per frame, in degrees.
    pub hue_step: f32,
    /// Radius range (min, max) in px.
    pub radius_range: (f32, f32),
    /// Disc opacity (0.0 - 1.0).
    pub particle_alpha: f32,
    /// Disc colour tone.
    pub particle_tone: ToneParams,
    /// Link colour tone. The hue offset uses the sum of both x coordinates.
    pub link_tone: ToneParams,
    /// Link stroke width in px.
    pub link_width: f32,
    /// Opacity lost by a link at the threshold distance (0.0 - 1.0).
    pub link_fade: f32,
    pub normal: MotionParams,
    pub reduced: MotionParams,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            area_per_particle: 22_000.0,
            edge_margin: 20.0,
            hue_step: 0.5,
            radius_range: (0.5, 2.0),
            particle_alpha: 0.8,
            particle_tone: ToneParams {
                saturation: 80.0,
                lightness: 70.0,
                hue_spread: 5.0,
            },
            link_tone: ToneParams {
                saturation: 80.0,
                lightness: 60.0,
                hue_spread: 10.0,
            },
            link_width: 0.8,
            link_fade: 0.7,
            normal: MotionParams::normal(),
            reduced: MotionParams::reduced(),
        }
    }
}

impl FieldParams {
    /// Motion parameters for the given profile.
    pub fn motion(&self, profile: MotionProfile) -> &MotionParams {
        match profile {
            MotionProfile::Normal => &self.normal,
            MotionProfile::Reduced => &self.reduced,
        }
    }

    /// Reject parameter sets that would make spawn or draw misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.area_per_particle > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "area_per_particle must be positive, got {}",
                self.area_per_particle
            )));
        }
        if !(self.edge_margin >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "edge_margin must not be negative, got {}",
                self.edge_margin
            )));
        }
        let (min_r, max_r) = self.radius_range;
        if !(min_r >= 0.0 && min_r <= max_r) {
            return Err(ConfigError::Invalid(format!(
                "radius_range must satisfy 0 <= min <= max, got ({}, {})",
                min_r, max_r
            )));
        }
        if !(0.0..=1.0).contains(&self.particle_alpha) {
            return Err(ConfigError::Invalid(format!(
                "particle_alpha must be within 0..=1, got {}",
                self.particle_alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.link_fade) {
            return Err(ConfigError::Invalid(format!(
                "link_fade must be within 0..=1, got {}",
                self.link_fade
            )));
        }
        for tone in [&self.particle_tone, &self.link_tone] {
            if !(tone.hue_spread.is_finite() && tone.hue_spread != 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "hue_spread must be finite and non-zero, got {}",
                    tone.hue_spread
                )));
            }
        }
        for (name, motion) in [("normal", &self.normal), ("reduced", &self.reduced)] {
            if !(motion.max_speed.is_finite() && motion.max_speed >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} max_speed must be finite and not negative",
                    name
                )));
            }
            if !(motion.link_distance.is_finite() && motion.link_distance > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} link_distance must be finite and positive",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate parameters from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
