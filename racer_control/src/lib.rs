//! # racer_control
//!
//! Turns tracked hands into driving input, one frame at a time.
//!
//! ## Pipeline
//!
//! ```text
//! hands ──► decide() ──► SmoothingFilter (angle only) ──► KeyStateController
//!                                                    └──► overlay (racer_overlay)
//! ```
//!
//! ## Gesture → Action mapping
//!
//! | Hands | Condition | Move | Turn |
//! |---|---|---|---|
//! | 0 | — | Stop | Straight |
//! | 1 | — | Reverse | Straight |
//! | 2 | distance < brake distance | Brake | Straight |
//! | 2 | otherwise | Forward | by steering angle vs. deadband |
//!
//! The steering angle is the tilt of the left→right hand vector, scaled by
//! the steering gain and clamped to `±max_steering_deg`.
//!
//! Nothing in this crate fails on malformed input: odd hand counts, missing
//! handedness labels and absent landmarks all resolve to defined fallbacks.

pub mod hand;
pub mod decision;
pub mod smoothing;
pub mod grip;
pub mod keys;

pub use hand::{HandLandmarks, HandObservation, Handedness, Landmark};
pub use decision::{decide, ActionState, DecisionParams, MoveAction, TurnAction};
pub use smoothing::SmoothingFilter;
pub use grip::{Grip, GripEstimator};
pub use keys::{DriveKey, KeyBackend, KeyError, KeySet, KeyStateController};
