//! Player spawning and the per-frame controller system.

use bevy::prelude::*;

use crate::config::Tuning;

use super::animation::SpriteAnimation;
use super::components::{Body, Dead, Grounded, Player, Vel, WorldPos};
use super::controller::{self, Facing, InputSnapshot};
use super::touch::TouchLatches;

/// Spawn point, world space (feet midpoint)
const SPAWN: Vec2 = Vec2::new(50.0, 100.0);

/// Collision box, world units
const PLAYER_SIZE: (f32, f32) = (18.0, 16.0);

// ============================================================================
// SPAWNING
// ============================================================================

/// Spawn the player high over the first tile; gravity drops them onto it.
pub fn spawn_player(commands: &mut Commands) {
    let body = Body::new(PLAYER_SIZE.0, PLAYER_SIZE.1);

    commands.spawn((
        Player,
        Name::new("Player"),
        Sprite {
            color: Color::srgb(0.2, 0.35, 0.85),
            custom_size: Some(body.half * 2.0),
            ..default()
        },
        Transform::from_translation(Vec3::new(SPAWN.x, -SPAWN.y, 10.0)),
        WorldPos(SPAWN),
        Vel::default(),
        body,
        Grounded(false),
        Facing::Right,
        SpriteAnimation::default(),
    ));

    info!("Player spawned at {:?}", SPAWN);
}

// ============================================================================
// CONTROLLER SYSTEM
// ============================================================================

/// Snapshot the held controls and apply the resolved steering.
///
/// Runs only for living characters: the `Without<Dead>` filter is the
/// terminal-state guarantee, so a dead character keeps its death velocity
/// and animation untouched until the scene restarts.
pub fn player_controller(
    keyboard: Res<ButtonInput<KeyCode>>,
    latches: Res<TouchLatches>,
    tuning: Res<Tuning>,
    mut query: Query<
        (
            &mut Vel,
            &mut Facing,
            &mut Sprite,
            &mut SpriteAnimation,
            &Grounded,
        ),
        (With<Player>, Without<Dead>),
    >,
) {
    let Ok((mut vel, mut facing, mut sprite, mut anim, grounded)) = query.get_single_mut() else {
        return;
    };

    let input = InputSnapshot {
        left: keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD),
        up: keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::KeyW),
        touch_left: latches.left,
        touch_right: latches.right,
    };

    let steering = controller::resolve(input, grounded.0, tuning.walk_speed);

    vel.0.x = steering.velocity_x;
    if steering.jump {
        vel.0.y = tuning.jump_velocity;
    }
    if let Some(new_facing) = steering.facing {
        *facing = new_facing;
        sprite.flip_x = new_facing == Facing::Left;
    }
    anim.play(steering.animation);
}
