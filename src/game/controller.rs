//! Character input resolution
//!
//! The controller is a pure function: an immutable per-frame snapshot of the
//! held controls plus the grounded flag goes in, a steering command comes
//! out. Nothing here touches the ECS; the player system applies the result.
//!
//! While alive, the horizontal and vertical facets (Idle/Walking vs Jumping)
//! are evaluated independently every frame. Dead is terminal and is not
//! modeled here at all: dead characters never reach `resolve`, which the
//! ECS guarantees with a `Without<Dead>` filter on the player system.

use bevy::prelude::*;

use super::animation::AnimKey;

// ============================================================================
// INPUT SNAPSHOT
// ============================================================================

/// Held controls for a single frame.
///
/// Keyboard booleans are "is this key currently down"; the touch booleans are
/// latches held true between pointer-down and pointer-up on a screen half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub touch_left: bool,
    pub touch_right: bool,
}

// ============================================================================
// STEERING
// ============================================================================

/// Which way the character faces; sticks until a new direction resolves
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Per-frame controller output, applied by the player system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    /// Commanded horizontal velocity
    pub velocity_x: f32,
    /// New facing, or None to keep the current one
    pub facing: Option<Facing>,
    /// Animation to assert this frame (re-asserting the active key is a no-op)
    pub animation: AnimKey,
    /// Whether the jump impulse fires this frame
    pub jump: bool,
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve one frame of input into a steering command.
///
/// Horizontal order matters: keyboard resolves first, then the touch latches
/// are checked unconditionally and overwrite the keyboard result. Touch
/// therefore wins when both are active; keyboard is not "else" relative to
/// touch.
///
/// Jump fires only when `up` is held in a grounded frame. There is no jump
/// buffering: an airborne `up` does nothing this frame and is not queued.
pub fn resolve(input: InputSnapshot, grounded: bool, walk_speed: f32) -> Steering {
    let mut velocity_x = 0.0;
    let mut facing = None;

    if input.left {
        velocity_x = -walk_speed;
        facing = Some(Facing::Left);
    } else if input.right {
        velocity_x = walk_speed;
        facing = Some(Facing::Right);
    }

    // Touch latches overwrite whatever the keyboard resolved
    if input.touch_left {
        velocity_x = -walk_speed;
        facing = Some(Facing::Left);
    } else if input.touch_right {
        velocity_x = walk_speed;
        facing = Some(Facing::Right);
    }

    let jump = input.up && grounded;

    let animation = if jump {
        AnimKey::Jump
    } else if velocity_x != 0.0 {
        AnimKey::Walk
    } else {
        AnimKey::Idle
    };

    Steering {
        velocity_x,
        facing,
        animation,
        jump,
    }
}

/// Fall-out-of-world predicate, y-down: true once the character's feet reach
/// the threshold at the bottom of the world.
#[inline]
pub fn fell_out(y: f32, threshold: f32) -> bool {
    y >= threshold
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 100.0;

    fn keys(left: bool, right: bool, up: bool) -> InputSnapshot {
        InputSnapshot {
            left,
            right,
            up,
            ..default()
        }
    }

    #[test]
    fn test_neutral_is_idle() {
        let s = resolve(InputSnapshot::default(), true, SPEED);
        assert_eq!(s.velocity_x, 0.0);
        assert_eq!(s.facing, None);
        assert_eq!(s.animation, AnimKey::Idle);
        assert!(!s.jump);
    }

    #[test]
    fn test_left_walks_left() {
        let s = resolve(keys(true, false, false), true, SPEED);
        assert_eq!(s.velocity_x, -SPEED);
        assert_eq!(s.facing, Some(Facing::Left));
        assert_eq!(s.animation, AnimKey::Walk);
    }

    #[test]
    fn test_right_walks_right() {
        let s = resolve(keys(false, true, false), false, SPEED);
        assert_eq!(s.velocity_x, SPEED);
        assert_eq!(s.facing, Some(Facing::Right));
        assert_eq!(s.animation, AnimKey::Walk);
    }

    #[test]
    fn test_left_wins_over_right_on_keyboard() {
        // Keyboard left is checked before keyboard right
        let s = resolve(keys(true, true, false), true, SPEED);
        assert_eq!(s.velocity_x, -SPEED);
        assert_eq!(s.facing, Some(Facing::Left));
    }

    #[test]
    fn test_touch_left_overrides_keyboard_right() {
        let input = InputSnapshot {
            right: true,
            touch_left: true,
            ..default()
        };
        let s = resolve(input, true, SPEED);
        assert_eq!(s.velocity_x, -SPEED);
        assert_eq!(s.facing, Some(Facing::Left));
    }

    #[test]
    fn test_touch_right_overrides_keyboard_left() {
        let input = InputSnapshot {
            left: true,
            touch_right: true,
            ..default()
        };
        let s = resolve(input, true, SPEED);
        assert_eq!(s.velocity_x, SPEED);
        assert_eq!(s.facing, Some(Facing::Right));
    }

    #[test]
    fn test_touch_left_wins_over_touch_right() {
        let input = InputSnapshot {
            touch_left: true,
            touch_right: true,
            ..default()
        };
        let s = resolve(input, true, SPEED);
        assert_eq!(s.velocity_x, -SPEED);
    }

    #[test]
    fn test_jump_requires_grounded() {
        let up = keys(false, false, true);

        let grounded = resolve(up, true, SPEED);
        assert!(grounded.jump);
        assert_eq!(grounded.animation, AnimKey::Jump);

        // Airborne up is dropped, not buffered
        let airborne = resolve(up, false, SPEED);
        assert!(!airborne.jump);
        assert_eq!(airborne.animation, AnimKey::Idle);
    }

    #[test]
    fn test_jump_animation_overrides_walk() {
        let s = resolve(keys(false, true, true), true, SPEED);
        assert!(s.jump);
        assert_eq!(s.velocity_x, SPEED);
        assert_eq!(s.animation, AnimKey::Jump);
    }

    #[test]
    fn test_no_input_keeps_prior_facing() {
        // facing None means "keep whatever you had"
        let s = resolve(InputSnapshot::default(), false, SPEED);
        assert_eq!(s.facing, None);
    }

    #[test]
    fn test_fell_out_threshold() {
        // Spec example: threshold 244, one unit above lives, at it dies
        assert!(!fell_out(243.0, 244.0));
        assert!(fell_out(244.0, 244.0));
        assert!(fell_out(300.0, 244.0));
    }
}
