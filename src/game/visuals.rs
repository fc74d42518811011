//! Visual effects - camera follow and death particles

use bevy::prelude::*;

use super::components::{DeathParticle, Player, WorldPos};
use super::{VIEW_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};

// ============================================================================
// CAMERA FOLLOW
// ============================================================================

/// Camera smoothly tracks the player's x, clamped so the viewport never
/// shows past the world bounds. Vertical framing is fixed: the world is
/// exactly one viewport tall.
pub fn camera_follow(
    time: Res<Time>,
    player_query: Query<&WorldPos, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player_pos) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    let min_x = VIEW_WIDTH / 2.0;
    let max_x = WORLD_WIDTH - VIEW_WIDTH / 2.0;
    let target = player_pos.0.x.clamp(min_x, max_x);

    // Smooth lerp with damping
    let lerp_speed = 5.0;
    let current = camera_transform.translation.x;
    let new_x = current + (target - current) * (lerp_speed * time.delta_secs()).min(1.0);

    camera_transform.translation.x = new_x.clamp(min_x, max_x);
    camera_transform.translation.y = -WORLD_HEIGHT / 2.0;
}

// ============================================================================
// DEATH PARTICLES
// ============================================================================

/// Update death particles (move, fade, shrink), world space
pub fn update_death_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathParticle, &mut WorldPos, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut pos, mut sprite) in query.iter_mut() {
        pos.0 += particle.velocity * dt;

        // Slow down
        particle.velocity *= 0.95;

        // Tick lifetime
        particle.lifetime -= dt;

        if particle.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        // Fade and shrink
        let progress = 1.0 - (particle.lifetime / 0.8).min(1.0);
        sprite.color = sprite.color.with_alpha(1.0 - progress);

        if let Some(size) = &mut sprite.custom_size {
            *size *= 0.98;
        }
    }
}
