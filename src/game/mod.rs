//! Game module - one scene, one character.
//!
//! Flow per fixed tick: touch latches -> controller -> physics -> death
//! check, all chained. The scene is destroyed and rebuilt wholesale on
//! restart via the `OnExit`/`OnEnter` pair, never patched in place.

use bevy::prelude::*;

use crate::AppState;

pub mod animation;
pub mod components;
pub mod controller;
pub mod death;
pub mod physics;
pub mod player;
pub mod touch;
pub mod visuals;

pub use components::*;
pub use controller::{Facing, InputSnapshot, Steering};
pub use death::PlayerDeathEvent;
pub use touch::TouchLatches;

// ============================================================================
// WORLD CONSTANTS
// ============================================================================

/// World rectangle, world units (y-down). Wider than the viewport so the
/// camera has somewhere to scroll.
pub const WORLD_WIDTH: f32 = 1024.0;
pub const WORLD_HEIGHT: f32 = 244.0;

/// Horizontal extent of the camera viewport, world units
pub const VIEW_WIDTH: f32 = 256.0;

/// Walkable surface height for the floor tiles
const GROUND_TOP: f32 = 228.0;

/// Floor tile footprint
const TILE_SIZE: Vec2 = Vec2::new(64.0, 16.0);

/// The pit: no floor between these x coordinates
const GAP_X: (f32, f32) = (448.0, 512.0);

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<TouchLatches>()
            // Events
            .add_event::<PlayerDeathEvent>()
            // Scene setup/cleanup
            .add_systems(OnEnter(AppState::Playing), setup_scene)
            .add_systems(OnExit(AppState::Playing), cleanup_scene)
            // One-frame bounce back into Playing
            .add_systems(OnEnter(AppState::Restarting), death::finish_restart)
            // Core gameplay (fixed timestep for consistency)
            .add_systems(
                FixedUpdate,
                (
                    touch::update_touch_latches,
                    player::player_controller,
                    physics::integrate_and_land,
                    physics::clamp_player_to_bounds,
                    death::detect_fall_out,
                    death::handle_player_death,
                    death::tick_restart_timer,
                )
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            )
            // Visual updates (variable timestep)
            .add_systems(
                Update,
                (
                    animation::animate_sprites,
                    visuals::update_death_particles,
                    physics::sync_transforms,
                    visuals::camera_follow,
                )
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

// ============================================================================
// SCENE SETUP
// ============================================================================

fn setup_scene(mut commands: Commands, mut latches: ResMut<TouchLatches>) {
    info!("Setting up scene");

    *latches = TouchLatches::default();

    spawn_floor(&mut commands);
    spawn_clouds(&mut commands);
    player::spawn_player(&mut commands);
}

/// Lay floor tiles along the bottom of the world, leaving the pit open.
fn spawn_floor(commands: &mut Commands) {
    let mut x = 0.0;
    while x < WORLD_WIDTH {
        let in_gap = x >= GAP_X.0 && x < GAP_X.1;
        if !in_gap {
            spawn_tile(commands, Vec2::new(x, GROUND_TOP));
        }
        x += TILE_SIZE.x;
    }
}

fn spawn_tile(commands: &mut Commands, min: Vec2) {
    let center = min + TILE_SIZE / 2.0;

    commands.spawn((
        GroundTile {
            min,
            size: TILE_SIZE,
        },
        Sprite {
            color: Color::srgb(0.72, 0.44, 0.18),
            custom_size: Some(TILE_SIZE),
            ..default()
        },
        Transform::from_translation(Vec3::new(center.x, -center.y, 0.0)),
    ));
}

/// A few clouds, purely decorative
fn spawn_clouds(commands: &mut Commands) {
    let clouds = [
        Vec2::new(110.0, 50.0),
        Vec2::new(420.0, 35.0),
        Vec2::new(700.0, 60.0),
        Vec2::new(930.0, 42.0),
    ];

    for center in clouds {
        commands.spawn((
            Decor,
            Sprite {
                color: Color::srgba(1.0, 1.0, 1.0, 0.9),
                custom_size: Some(Vec2::new(48.0, 14.0)),
                ..default()
            },
            Transform::from_translation(Vec3::new(center.x, -center.y, -10.0)),
        ));
    }
}

fn cleanup_scene(
    mut commands: Commands,
    entities: Query<
        Entity,
        Or<(
            With<Player>,
            With<GroundTile>,
            With<Decor>,
            With<DeathParticle>,
        )>,
    >,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<death::RestartTimer>();
    info!("Scene cleaned up");
}
