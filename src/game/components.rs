//! Core components for the one scene we have.
//!
//! Simulation state lives in world space (y-down, origin top-left, like the
//! tile art expects); `sync_transforms` maps it to Bevy's y-up render space
//! every frame.

use bevy::prelude::*;

// ============================================================================
// SIMULATION STATE
// ============================================================================

/// Position in world space, y-down. For the player this is the feet midpoint.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct WorldPos(pub Vec2);

/// Velocity in world space, y-down (negative y is up)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Vel(pub Vec2);

/// Half extents of the collision box, around the feet-midpoint anchor
#[derive(Component, Debug, Clone, Copy)]
pub struct Body {
    pub half: Vec2,
}

impl Body {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }
}

/// Physics-reported contact with a supporting surface; gates jumping
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Grounded(pub bool);

// ============================================================================
// PLAYER
// ============================================================================

/// Player marker component
#[derive(Component)]
pub struct Player;

/// Terminal state for a life. Inserted exactly once by the death transition;
/// every alive-only system filters `Without<Dead>`, so a dead character is
/// never steered, clamped or re-killed. Only the scene restart removes it
/// (by despawning the whole character).
#[derive(Component)]
pub struct Dead;

// ============================================================================
// SCENERY
// ============================================================================

/// Static ground tile; its rect is what the player lands on
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundTile {
    /// Top-left corner in world space
    pub min: Vec2,
    pub size: Vec2,
}

impl GroundTile {
    /// y of the walkable top surface
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Horizontal overlap with a box centered on `x` with half-width `half_w`
    pub fn overlaps_x(&self, x: f32, half_w: f32) -> bool {
        x + half_w > self.min.x && x - half_w < self.min.x + self.size.x
    }
}

/// Non-interactive scene dressing (clouds)
#[derive(Component)]
pub struct Decor;

// ============================================================================
// VISUAL EFFECTS
// ============================================================================

/// Death particle burst
#[derive(Component)]
pub struct DeathParticle {
    pub velocity: Vec2,
    pub lifetime: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_tile_overlap() {
        let tile = GroundTile {
            min: Vec2::new(64.0, 228.0),
            size: Vec2::new(64.0, 16.0),
        };
        assert_eq!(tile.top(), 228.0);

        assert!(tile.overlaps_x(96.0, 8.0)); // over the middle
        assert!(tile.overlaps_x(60.0, 8.0)); // straddling the left edge
        assert!(!tile.overlaps_x(40.0, 8.0)); // fully left of it
        assert!(!tile.overlaps_x(140.0, 8.0)); // fully right of it
    }
}
