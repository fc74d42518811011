//! Arcade physics: gravity, integration, landing on tiles, bounds clamp.
//!
//! The actual math lives in pure helpers so it can be tested without an ECS
//! world; the systems are thin wrappers that feed them component state.
//!
//! Everything runs in world space (y-down). `sync_transforms` is the single
//! place where world space turns into Bevy render space.

use bevy::prelude::*;

use crate::config::Tuning;

use super::components::{Body, Dead, GroundTile, Grounded, Player, Vel, WorldPos};
use super::{WORLD_HEIGHT, WORLD_WIDTH};

// ============================================================================
// PURE HELPERS
// ============================================================================

/// One Euler step: gravity into velocity, velocity into position.
pub fn step_kinematics(pos: Vec2, vel: Vec2, gravity: f32, dt: f32) -> (Vec2, Vec2) {
    let vel = Vec2::new(vel.x, vel.y + gravity * dt);
    let pos = pos + vel * dt;
    (pos, vel)
}

/// Land a falling box (center `pos`, half extents `half`) on tile tops.
///
/// A landing happens when the feet cross a tile's top surface between frames
/// while moving downward; the feet snap to the surface and vertical velocity
/// zeroes. Returns the corrected (pos, vel) and whether a contact resolved.
/// Walking off a tile simply stops producing contacts, which clears grounded.
pub fn land_on_tiles(
    prev_feet: f32,
    mut pos: Vec2,
    mut vel: Vec2,
    half: Vec2,
    tiles: &[GroundTile],
) -> (Vec2, Vec2, bool) {
    let mut grounded = false;

    if vel.y >= 0.0 {
        let feet = pos.y + half.y;
        for tile in tiles {
            if !tile.overlaps_x(pos.x, half.x) {
                continue;
            }
            if prev_feet <= tile.top() && feet >= tile.top() {
                pos.y = tile.top() - half.y;
                vel.y = 0.0;
                grounded = true;
            }
        }
    }

    (pos, vel, grounded)
}

/// Keep a box inside the world rectangle.
///
/// The bottom edge stops the feet exactly at `WORLD_HEIGHT`, which is also
/// the fall-out threshold: a character clamped to the bottom of a gap is one
/// the death check will catch the same frame.
pub fn clamp_to_bounds(pos: Vec2, half: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(half.x, WORLD_WIDTH - half.x),
        pos.y.clamp(half.y, WORLD_HEIGHT - half.y),
    )
}

// ============================================================================
// SYSTEMS
// ============================================================================

/// Integrate the player under gravity and resolve landings against the
/// ground tiles.
///
/// Gravity applies dead or alive - the death hop arcs back down under the
/// same gravity. Dead characters keep integrating (they fall out of the
/// world) but never land: tile contact resolution is alive-only.
pub fn integrate_and_land(
    time: Res<Time>,
    tuning: Res<Tuning>,
    tiles: Query<&GroundTile>,
    mut query: Query<(&mut WorldPos, &mut Vel, &Body, &mut Grounded, Option<&Dead>), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut pos, mut vel, body, mut grounded, dead) in query.iter_mut() {
        let prev_feet = pos.0.y + body.half.y;
        let (new_pos, new_vel) = step_kinematics(pos.0, vel.0, tuning.gravity, dt);
        pos.0 = new_pos;
        vel.0 = new_vel;

        if dead.is_some() {
            grounded.0 = false;
            continue;
        }

        let tile_list: Vec<GroundTile> = tiles.iter().copied().collect();
        let (new_pos, new_vel, on_ground) =
            land_on_tiles(prev_feet, pos.0, vel.0, body.half, &tile_list);
        pos.0 = new_pos;
        vel.0 = new_vel;
        grounded.0 = on_ground;
    }
}

/// World-bounds clamp. Disabled for the dead so the death hop can leave the
/// world and reach the fall-out threshold.
pub fn clamp_player_to_bounds(
    mut query: Query<(&mut WorldPos, &Body), (With<Player>, Without<Dead>)>,
) {
    for (mut pos, body) in query.iter_mut() {
        pos.0 = clamp_to_bounds(pos.0, body.half);
    }
}

/// Map world space (y-down) to Bevy render space (y-up), preserving each
/// sprite's z layer.
pub fn sync_transforms(mut query: Query<(&WorldPos, &mut Transform)>) {
    for (pos, mut transform) in query.iter_mut() {
        transform.translation.x = pos.0.x;
        transform.translation.y = -pos.0.y;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_tile(x: f32, w: f32) -> GroundTile {
        GroundTile {
            min: Vec2::new(x, 228.0),
            size: Vec2::new(w, 16.0),
        }
    }

    #[test]
    fn test_step_kinematics_applies_gravity_first() {
        // dt chosen exactly representable so the asserts are exact
        let (pos, vel) = step_kinematics(Vec2::ZERO, Vec2::ZERO, 300.0, 0.5);
        assert_eq!(vel, Vec2::new(0.0, 150.0));
        assert_eq!(pos, Vec2::new(0.0, 75.0));
    }

    #[test]
    fn test_landing_snaps_feet_and_zeroes_fall() {
        let tiles = [floor_tile(0.0, 256.0)];
        let half = Vec2::new(9.0, 8.0);

        // Feet were at 220 last frame, integration carried them to 236
        let pos = Vec2::new(50.0, 236.0 - half.y);
        let vel = Vec2::new(0.0, 160.0);
        let (pos, vel, grounded) = land_on_tiles(220.0, pos, vel, half, &tiles);

        assert!(grounded);
        assert_eq!(pos.y + half.y, 228.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_no_landing_over_a_gap() {
        // Tiles either side of a gap at x 256..320
        let tiles = [floor_tile(0.0, 256.0), floor_tile(320.0, 256.0)];
        let half = Vec2::new(9.0, 8.0);

        let pos = Vec2::new(288.0, 236.0 - half.y);
        let vel = Vec2::new(0.0, 160.0);
        let (_, vel, grounded) = land_on_tiles(220.0, pos, vel, half, &tiles);

        assert!(!grounded);
        assert_eq!(vel.y, 160.0);
    }

    #[test]
    fn test_no_landing_while_moving_up() {
        // Jumping up through a tile's plane must not snap down onto it
        let tiles = [floor_tile(0.0, 256.0)];
        let half = Vec2::new(9.0, 8.0);

        let pos = Vec2::new(50.0, 226.0 - half.y);
        let vel = Vec2::new(0.0, -300.0);
        let (_, vel, grounded) = land_on_tiles(230.0, pos, vel, half, &tiles);

        assert!(!grounded);
        assert_eq!(vel.y, -300.0);
    }

    #[test]
    fn test_resting_contact_stays_grounded() {
        let tiles = [floor_tile(0.0, 256.0)];
        let half = Vec2::new(9.0, 8.0);

        // Already resting on the surface with zero velocity
        let pos = Vec2::new(50.0, 228.0 - half.y);
        let (pos2, _, grounded) = land_on_tiles(228.0, pos, Vec2::ZERO, half, &tiles);

        assert!(grounded);
        assert_eq!(pos2, pos);
    }

    #[test]
    fn test_clamp_keeps_box_inside_world() {
        let half = Vec2::new(9.0, 8.0);
        assert_eq!(clamp_to_bounds(Vec2::new(-50.0, 100.0), half).x, half.x);
        assert_eq!(
            clamp_to_bounds(Vec2::new(WORLD_WIDTH + 50.0, 100.0), half).x,
            WORLD_WIDTH - half.x
        );

        let inside = Vec2::new(300.0, 100.0);
        assert_eq!(clamp_to_bounds(inside, half), inside);
    }

    #[test]
    fn test_clamp_bottom_leaves_feet_at_threshold() {
        let half = Vec2::new(9.0, 8.0);
        let clamped = clamp_to_bounds(Vec2::new(300.0, 500.0), half);
        assert_eq!(clamped.y + half.y, WORLD_HEIGHT);
    }
}
