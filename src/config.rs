//! Tuning constants for movement, physics and the death sequence.
//!
//! Compiled defaults match the demo as designed; `assets/tuning.json` may
//! override any subset of fields for quick iteration without a rebuild.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

/// Path checked at startup for overrides
const TUNING_PATH: &str = "assets/tuning.json";

/// All gameplay numbers in one place.
///
/// World space is y-down, so upward impulses are negative.
#[derive(Resource, Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed while a direction is held (units/sec)
    pub walk_speed: f32,
    /// Downward acceleration (units/sec^2)
    pub gravity: f32,
    /// Vertical velocity set when a grounded jump fires
    pub jump_velocity: f32,
    /// Vertical velocity set by the death transition (the little hop)
    pub death_escape_velocity: f32,
    /// Falling past this y kills the character
    pub death_threshold_y: f32,
    /// Delay between death and scene restart
    pub restart_delay_ms: u64,
    /// Volume for the death audio cue
    pub death_cue_volume: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: 100.0,
            gravity: 300.0,
            jump_velocity: -300.0,
            death_escape_velocity: -350.0,
            death_threshold_y: 244.0,
            restart_delay_ms: 2000,
            death_cue_volume: 0.2,
        }
    }
}

/// Replace the compiled defaults with `assets/tuning.json` if present.
pub fn load_tuning(mut tuning: ResMut<Tuning>) {
    match read_tuning(Path::new(TUNING_PATH)) {
        Ok(Some(loaded)) => {
            *tuning = loaded;
            info!("Tuning loaded from {}", TUNING_PATH);
        }
        Ok(None) => {
            info!("No {} - using built-in tuning", TUNING_PATH);
        }
        Err(err) => {
            warn!("Failed to read {} ({}) - using built-in tuning", TUNING_PATH, err);
        }
    }
}

/// Ok(None) when the file simply doesn't exist.
fn read_tuning(path: &Path) -> Result<Option<Tuning>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let tuning = serde_json::from_str(&text)?;
    Ok(Some(tuning))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_demo_constants() {
        let t = Tuning::default();
        assert_eq!(t.walk_speed, 100.0);
        assert_eq!(t.jump_velocity, -300.0);
        assert_eq!(t.death_threshold_y, 244.0);
        assert_eq!(t.restart_delay_ms, 2000);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"walk_speed": 140.0}"#).unwrap();
        assert_eq!(t.walk_speed, 140.0);
        assert_eq!(t.gravity, 300.0);
        assert_eq!(t.restart_delay_ms, 2000);
    }
}
