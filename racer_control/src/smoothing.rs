//! Exponential smoothing for scalar signals (steering angle, FPS readout).

/// Single-value exponential smoother.
///
/// The first sample is adopted as-is, so there is no warm-up lag. After that
/// `value = alpha * sample + (1 - alpha) * value`: `alpha = 1` passes samples
/// through, `alpha = 0` holds the first sample forever.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingFilter {
    alpha: f32,
    value: Option<f32>,
}

impl SmoothingFilter {
    pub fn new(alpha: f32) -> Self {
        SmoothingFilter { alpha: clamp_alpha(alpha), value: None }
    }

    /// Start from `initial` instead of adopting the first sample.
    pub fn with_initial(alpha: f32, initial: f32) -> Self {
        SmoothingFilter { alpha: clamp_alpha(alpha), value: Some(initial) }
    }

    pub fn update(&mut self, sample: f32) -> f32 {
        let next = match self.value {
            None       => sample,
            Some(prev) => self.alpha * sample + (1.0 - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }

    pub fn alpha(&self) -> f32 { self.alpha }

    /// Retune in place; the running value is kept.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }

    pub fn value(&self) -> Option<f32> { self.value }

    /// Forget the running value; the next sample is adopted as-is.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// NaN is treated as pass-through.
fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_passes_through() {
        let mut f = SmoothingFilter::new(0.2);
        assert_eq!(f.update(10.0), 10.0);
        assert!((f.update(20.0) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(SmoothingFilter::new(3.0).alpha(), 1.0);
        assert_eq!(SmoothingFilter::new(-0.5).alpha(), 0.0);
        assert_eq!(SmoothingFilter::new(f32::NAN).alpha(), 1.0);
        let mut f = SmoothingFilter::new(0.5);
        f.set_alpha(7.0);
        assert_eq!(f.alpha(), 1.0);
    }

    #[test]
    fn alpha_one_is_pass_through() {
        let mut f = SmoothingFilter::new(1.0);
        for s in [3.0, -8.0, 42.5] {
            assert_eq!(f.update(s), s);
        }
    }

    #[test]
    fn alpha_zero_freezes_first_sample() {
        let mut f = SmoothingFilter::new(0.0);
        f.update(5.0);
        for s in [100.0, -100.0, 0.0] {
            assert_eq!(f.update(s), 5.0);
        }
    }

    #[test]
    fn output_stays_within_input_range() {
        let mut f = SmoothingFilter::new(0.18);
        let samples = [12.0, -40.0, 55.0, 3.0, -60.0, 60.0, 0.0];
        for s in samples {
            let v = f.update(s);
            assert!((-60.0..=60.0).contains(&v));
        }
    }

    #[test]
    fn with_initial_blends_from_start() {
        let mut f = SmoothingFilter::with_initial(0.5, 0.0);
        assert_eq!(f.update(10.0), 5.0);
    }

    #[test]
    fn reset_forgets_value() {
        let mut f = SmoothingFilter::new(0.2);
        f.update(10.0);
        f.reset();
        assert_eq!(f.value(), None);
        assert_eq!(f.update(-3.0), -3.0);
    }
}
