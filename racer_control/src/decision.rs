//! Gesture decision engine: tracked hands → discrete action + steering angle.
//!
//! The two-hand "steering wheel" reads the tilt of the line from the left
//! wrist to the right wrist. Raising the left hand (right hand lower in image
//! coordinates, where y grows downward) yields a positive angle, i.e. a right
//! turn.

use std::fmt;

use crate::hand::{HandObservation, Handedness};

// ════════════════════════════════════════════════════════════════════════════
// Actions
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Forward,
    Reverse,
    Brake,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnAction {
    Left,
    Right,
    Straight,
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveAction::Forward => "forward",
            MoveAction::Reverse => "reverse",
            MoveAction::Brake   => "brake",
            MoveAction::Stop    => "stop",
        })
    }
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TurnAction::Left     => "left",
            TurnAction::Right    => "right",
            TurnAction::Straight => "straight",
        })
    }
}

/// Output of [`decide`] for one frame.
///
/// `steering_angle_deg` is overwritten by the smoothing stage before the
/// action reaches the key controller and overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionState {
    pub movement:           MoveAction,
    pub turn:               TurnAction,
    pub steering_angle_deg: f32,
    pub debug_text:         String,
}

impl ActionState {
    fn idle(movement: MoveAction, debug_text: &str) -> Self {
        ActionState {
            movement,
            turn:               TurnAction::Straight,
            steering_angle_deg: 0.0,
            debug_text:         debug_text.to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DecisionParams
// ════════════════════════════════════════════════════════════════════════════

/// Tuning for [`decide`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionParams {
    /// Hands closer than this (pixels) brake.
    pub brake_distance_px: f32,
    /// Slope threshold of the discrete tilt classifier. Carried for config
    /// compatibility; the continuous angle path does not read it.
    pub tilt_threshold:    f32,
    pub steering_gain:     f32,
    pub max_steering_deg:  f32,
    /// Steering within `±turn_deadband_deg` is straight.
    pub turn_deadband_deg: f32,
}

impl Default for DecisionParams {
    fn default() -> Self {
        DecisionParams {
            brake_distance_px: 100.0,
            tilt_threshold:    0.3,
            steering_gain:     0.9,
            max_steering_deg:  60.0,
            turn_deadband_deg: 12.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// decide
// ════════════════════════════════════════════════════════════════════════════

/// Classify this frame's hands into a move/turn action and steering angle.
///
/// Total over every input: more than two hands are treated as the first two,
/// and unlabelled or duplicate-labelled pairs fall back to positional order
/// (first = left, second = right).
pub fn decide(hands: &[HandObservation], params: &DecisionParams) -> ActionState {
    let action = match hands {
        [] => ActionState::idle(MoveAction::Stop, "Stop | No hands"),
        [_] => ActionState::idle(MoveAction::Reverse, "Reverse | Single hand"),
        [a, b, ..] => decide_two_hands(a, b, params),
    };
    tracing::trace!(
        hands = hands.len(),
        movement = %action.movement,
        turn = %action.turn,
        steering = action.steering_angle_deg,
        "decision"
    );
    action
}

fn decide_two_hands(
    a: &HandObservation,
    b: &HandObservation,
    params: &DecisionParams,
) -> ActionState {
    let pair = [a, b];
    let left  = pair.iter().find(|h| h.label == Handedness::Left);
    let right = pair.iter().find(|h| h.label == Handedness::Right);
    let (left, right) = match (left, right) {
        (Some(l), Some(r)) => (l.position, r.position),
        _ => (a.position, b.position),
    };

    let dx = right.0 as f32 - left.0 as f32;
    let dy = right.1 as f32 - left.1 as f32;
    let distance = dx.hypot(dy);

    if distance < params.brake_distance_px {
        return ActionState::idle(MoveAction::Brake, &format!("Brake | Steer 0.0° | Dist {:.0}", distance));
    }

    let tilt_deg = steering_wheel_angle(left, right);
    let max = params.max_steering_deg.abs();
    let steering = (tilt_deg * params.steering_gain).clamp(-max, max);

    let turn = if steering > params.turn_deadband_deg {
        TurnAction::Right
    } else if steering < -params.turn_deadband_deg {
        TurnAction::Left
    } else {
        TurnAction::Straight
    };

    ActionState {
        movement:           MoveAction::Forward,
        turn,
        steering_angle_deg: steering,
        debug_text:         format!(
            "Tilt {:.1}° | Steer {:.1}° | Dist {:.0}",
            tilt_deg, steering, distance
        ),
    }
}

/// Angle in degrees of the vector `from → to`, normalised to `(-180, 180]`.
pub fn steering_wheel_angle(from: (i32, i32), to: (i32, i32)) -> f32 {
    let dx = to.0 as f32 - from.0 as f32;
    let dy = to.1 as f32 - from.1 as f32;
    let mut deg = dy.atan2(dx).to_degrees();
    if deg > 180.0 {
        deg -= 360.0;
    } else if deg <= -180.0 {
        deg += 360.0;
    }
    deg
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(x: i32, y: i32, label: Handedness) -> HandObservation {
        HandObservation::new(x, y, label)
    }

    fn params() -> DecisionParams {
        DecisionParams::default()
    }

    #[test]
    fn no_hands_stops() {
        let a = decide(&[], &params());
        assert_eq!(a.movement, MoveAction::Stop);
        assert_eq!(a.turn, TurnAction::Straight);
        assert_eq!(a.steering_angle_deg, 0.0);
    }

    #[test]
    fn single_hand_reverses_without_steering() {
        for label in [Handedness::Left, Handedness::Right, Handedness::Unknown] {
            let a = decide(&[hand(10, 400, label)], &params());
            assert_eq!(a.movement, MoveAction::Reverse);
            assert_eq!(a.turn, TurnAction::Straight);
            assert_eq!(a.steering_angle_deg, 0.0);
        }
    }

    #[test]
    fn level_hands_drive_straight() {
        let a = decide(
            &[hand(0, 0, Handedness::Left), hand(200, 0, Handedness::Right)],
            &params(),
        );
        assert_eq!(a.movement, MoveAction::Forward);
        assert_eq!(a.turn, TurnAction::Straight);
        assert!(a.steering_angle_deg.abs() < 1e-6);
    }

    #[test]
    fn close_hands_brake_regardless_of_height() {
        for dy in [0, 20, -30] {
            let a = decide(
                &[hand(0, 0, Handedness::Left), hand(50, dy, Handedness::Right)],
                &params(),
            );
            assert_eq!(a.movement, MoveAction::Brake);
            assert_eq!(a.turn, TurnAction::Straight);
            assert_eq!(a.steering_angle_deg, 0.0);
            assert!(a.debug_text.contains("Brake"));
            assert!(a.debug_text.contains("Steer 0.0°"));
            assert!(a.debug_text.contains("Dist"));
        }
    }

    #[test]
    fn brake_distance_boundary_is_not_braking() {
        let a = decide(
            &[hand(0, 0, Handedness::Left), hand(100, 0, Handedness::Right)],
            &params(),
        );
        assert_eq!(a.movement, MoveAction::Forward);
    }

    #[test]
    fn tilted_hands_turn_right() {
        let a = decide(
            &[hand(0, 0, Handedness::Left), hand(200, 100, Handedness::Right)],
            &params(),
        );
        assert_eq!(a.movement, MoveAction::Forward);
        assert_eq!(a.turn, TurnAction::Right);
        // atan2(100, 200) ≈ 26.565°, × 0.9 ≈ 23.909°
        assert!((a.steering_angle_deg - 23.909).abs() < 0.01, "{}", a.steering_angle_deg);
        assert!(a.debug_text.contains("26.6"));
        assert!(a.debug_text.contains("23.9"));
        assert!(a.debug_text.contains("224"));
    }

    #[test]
    fn tilted_the_other_way_turns_left() {
        let a = decide(
            &[hand(0, 100, Handedness::Left), hand(200, 0, Handedness::Right)],
            &params(),
        );
        assert_eq!(a.turn, TurnAction::Left);
        assert!(a.steering_angle_deg < -12.0);
    }

    #[test]
    fn steering_is_clamped() {
        // Nearly vertical pair: tilt ≈ 84°, × 0.9 > 60
        let a = decide(
            &[hand(0, 0, Handedness::Left), hand(20, 200, Handedness::Right)],
            &params(),
        );
        assert_eq!(a.steering_angle_deg, 60.0);
        assert_eq!(a.turn, TurnAction::Right);
    }

    #[test]
    fn deadband_boundary_is_straight() {
        // Zero deadband with a level pair puts the angle exactly on the edge.
        let p = DecisionParams { turn_deadband_deg: 0.0, ..params() };
        let a = decide(
            &[hand(0, 0, Handedness::Left), hand(200, 0, Handedness::Right)],
            &p,
        );
        assert_eq!(a.steering_angle_deg, 0.0);
        assert_eq!(a.turn, TurnAction::Straight);
    }

    #[test]
    fn labels_override_observation_order() {
        // Right hand listed first: labels decide the vector direction.
        let a = decide(
            &[hand(200, 100, Handedness::Right), hand(0, 0, Handedness::Left)],
            &params(),
        );
        assert_eq!(a.turn, TurnAction::Right);
    }

    #[test]
    fn ambiguous_labels_fall_back_to_order() {
        let a = decide(
            &[hand(0, 0, Handedness::Left), hand(200, 100, Handedness::Left)],
            &params(),
        );
        assert_eq!(a.turn, TurnAction::Right);
        let b = decide(
            &[hand(200, 100, Handedness::Unknown), hand(0, 0, Handedness::Right)],
            &params(),
        );
        // positional: left = (200,100), right = (0,0) → vector points up-left
        assert_eq!(b.movement, MoveAction::Forward);
        assert_eq!(b.steering_angle_deg, -60.0);
    }

    #[test]
    fn extra_hands_use_first_two() {
        let hands = [
            hand(0, 0, Handedness::Left),
            hand(200, 0, Handedness::Right),
            hand(5, 5, Handedness::Unknown),
            hand(900, 900, Handedness::Right),
        ];
        let a = decide(&hands, &params());
        assert_eq!(a.movement, MoveAction::Forward);
        assert_eq!(a.turn, TurnAction::Straight);
    }

    #[test]
    fn extreme_positions_do_not_overflow() {
        let a = decide(
            &[hand(i32::MIN, 0, Handedness::Left), hand(i32::MAX, 0, Handedness::Right)],
            &params(),
        );
        assert_eq!(a.movement, MoveAction::Forward);
        assert_eq!(a.turn, TurnAction::Straight);

        let b = decide(
            &[hand(0, i32::MIN, Handedness::Left), hand(0, i32::MAX, Handedness::Right)],
            &params(),
        );
        assert_eq!(b.steering_angle_deg, 60.0);
        assert!((steering_wheel_angle((i32::MAX, 0), (i32::MIN, 0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_angle_is_normalised() {
        assert!((steering_wheel_angle((0, 0), (-10, 0)) - 180.0).abs() < 1e-4);
        assert!((steering_wheel_angle((0, 0), (0, 10)) - 90.0).abs() < 1e-4);
        assert!((steering_wheel_angle((0, 0), (0, -10)) + 90.0).abs() < 1e-4);
    }
}
