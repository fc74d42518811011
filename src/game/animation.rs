//! Animation state and playback.
//!
//! The demo ships no texture atlas, so "animation" is procedural: each key
//! drives a distinct look on the untextured sprite (walk bobs, jump
//! stretches, death tints and flips). What matters for the controller
//! contract is the key state machine: `play` is idempotent, so the controller
//! can re-assert the current key every frame without restarting it.

use bevy::prelude::*;

use super::components::Body;

/// Walk bob frequency (Hz)
const WALK_BOB_RATE: f32 = 6.0;

/// Animation keys the controller can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimKey {
    #[default]
    Idle,
    Walk,
    Jump,
    Dead,
}

/// Current animation key plus time spent in it
#[derive(Component, Debug, Default)]
pub struct SpriteAnimation {
    key: AnimKey,
    elapsed: f32,
}

impl SpriteAnimation {
    pub fn key(&self) -> AnimKey {
        self.key
    }

    /// Switch to `key`, restarting playback only on an actual change.
    /// Re-asserting the active key is a no-op (the engine de-duplicates).
    pub fn play(&mut self, key: AnimKey) {
        if self.key != key {
            self.key = key;
            self.elapsed = 0.0;
        }
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

/// Apply the active key's look to the sprite.
pub fn animate_sprites(
    time: Res<Time>,
    mut query: Query<(&mut SpriteAnimation, &mut Sprite, &Body)>,
) {
    let dt = time.delta_secs();

    for (mut anim, mut sprite, body) in query.iter_mut() {
        anim.advance(dt);

        let base = body.half * 2.0;
        match anim.key() {
            AnimKey::Idle => {
                sprite.custom_size = Some(base);
                sprite.flip_y = false;
            }
            AnimKey::Walk => {
                // Small vertical bob while walking
                let bob = (anim.elapsed * WALK_BOB_RATE * std::f32::consts::TAU).sin();
                sprite.custom_size = Some(Vec2::new(base.x, base.y + bob));
                sprite.flip_y = false;
            }
            AnimKey::Jump => {
                sprite.custom_size = Some(Vec2::new(base.x * 0.9, base.y * 1.1));
                sprite.flip_y = false;
            }
            AnimKey::Dead => {
                // Knocked out: flipped and washed red
                sprite.custom_size = Some(base);
                sprite.flip_y = true;
                sprite.color = Color::srgb(0.9, 0.3, 0.25);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_is_idempotent_for_active_key() {
        let mut anim = SpriteAnimation::default();
        anim.play(AnimKey::Walk);
        anim.advance(0.4);

        // Re-asserting the same key must not restart playback
        anim.play(AnimKey::Walk);
        assert_eq!(anim.key(), AnimKey::Walk);
        assert_eq!(anim.elapsed, 0.4);
    }

    #[test]
    fn test_play_restarts_on_key_change() {
        let mut anim = SpriteAnimation::default();
        anim.play(AnimKey::Walk);
        anim.advance(0.4);

        anim.play(AnimKey::Idle);
        assert_eq!(anim.key(), AnimKey::Idle);
        assert_eq!(anim.elapsed, 0.0);
    }

    #[test]
    fn test_default_key_is_idle() {
        assert_eq!(SpriteAnimation::default().key(), AnimKey::Idle);
    }
}
