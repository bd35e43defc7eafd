//! Pinch ("grip") detection from thumb-tip and index-tip landmarks.

use crate::hand::{HandLandmarks, HandObservation};

/// Grip state of one hand for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grip {
    pub gripping: bool,
    /// 1.0 when the tips touch, falling to 0.0 at twice the threshold.
    pub strength: f32,
}

impl Grip {
    pub const NONE: Grip = Grip { gripping: false, strength: 0.0 };
}

/// Stateless pinch estimator with a pixel threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GripEstimator {
    threshold_px: f32,
}

impl GripEstimator {
    /// Negative or NaN thresholds are clamped to 0.
    pub fn new(threshold_px: f32) -> Self {
        let threshold_px = if threshold_px.is_nan() { 0.0 } else { threshold_px.max(0.0) };
        GripEstimator { threshold_px }
    }

    pub fn threshold_px(&self) -> f32 { self.threshold_px }

    /// Estimate the grip of `hand` in a `frame_width × frame_height` frame.
    ///
    /// Hands without landmarks, or whose landmark set lacks the thumb or
    /// index tip, report [`Grip::NONE`].
    pub fn estimate(&self, hand: &HandObservation, frame_width: u32, frame_height: u32) -> Grip {
        let Some(lms) = hand.landmarks.as_ref() else {
            return Grip::NONE;
        };
        let (Some(thumb), Some(index)) = (
            lms.get(HandLandmarks::THUMB_TIP),
            lms.get(HandLandmarks::INDEX_FINGER_TIP),
        ) else {
            return Grip::NONE;
        };

        let (tx, ty) = thumb.to_px(frame_width, frame_height);
        let (ix, iy) = index.to_px(frame_width, frame_height);
        let dist = (tx as f32 - ix as f32).hypot(ty as f32 - iy as f32);

        let strength = if self.threshold_px > 0.0 {
            (1.0 - dist / (2.0 * self.threshold_px)).clamp(0.0, 1.0)
        } else if dist == 0.0 {
            1.0
        } else {
            0.0
        };

        Grip { gripping: dist <= self.threshold_px, strength }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
