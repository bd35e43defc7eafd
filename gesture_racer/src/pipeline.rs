//! One frame of the racer: hands in, held keys and a draw list out.
//!
//! ```text
//! hands ─► decide ─► angle filter ─► KeyStateController
//!                                └─► OverlayState (+ grip per hand) ─► DrawList
//! ```
//!
//! Runtime commands (tuning, theme, debug) take effect on the next tick.

use std::time::Duration;

use racer_control::{
    decide, ActionState, GripEstimator, HandObservation, KeyBackend, KeyStateController,
    SmoothingFilter,
};
use racer_overlay::{
    next_dark_theme, next_theme, theme_by_name, DrawList, FrameInput, HandFeedback, OverlayState,
    Theme,
};

use crate::config::{AppConfig, Tunables};

/// Alpha of the frame-rate readout filter.
const FPS_ALPHA: f32 = 0.2;

const GAIN_STEP:      f32 = 0.1;
const DEADBAND_STEP:  f32 = 2.0;
const SMOOTHING_STEP: f32 = 0.02;

/// A keyboard command from the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    CycleTheme,
    CycleDarkTheme,
    GainDown,
    GainUp,
    DeadbandWider,
    DeadbandNarrower,
    SmootherAngle,
    SnappierAngle,
    ToggleDebug,
    ResetTuning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What one tick produced.
#[derive(Debug)]
pub struct FrameOutput {
    /// Smoothed action, as sent to the keys and drawn.
    pub action: ActionState,
    pub draw:   DrawList,
}

// ════════════════════════════════════════════════════════════════════════════
// Pipeline
// ════════════════════════════════════════════════════════════════════════════

pub struct Pipeline<B: KeyBackend> {
    config:       AppConfig,
    tunables:     Tunables,
    angle_filter: SmoothingFilter,
    fps_filter:   SmoothingFilter,
    keys:         KeyStateController<B>,
    grip:         GripEstimator,
    overlay:      OverlayState,
    show_debug:   bool,
}

impl<B: KeyBackend> Pipeline<B> {
    pub fn new(config: AppConfig, backend: B) -> Self {
        let theme = theme_by_name(&config.theme_name);
        Pipeline {
            tunables:     Tunables::from_config(&config),
            angle_filter: SmoothingFilter::with_initial(config.smoothing_alpha_angle, 0.0),
            fps_filter:   SmoothingFilter::with_initial(FPS_ALPHA, 0.0),
            keys:         KeyStateController::new(backend),
            grip:         GripEstimator::new(config.grip_threshold_px),
            overlay:      OverlayState::new(theme, config.overlay_config()),
            show_debug:   config.show_debug,
            config,
        }
    }

    /// Run one frame.
    pub fn tick(&mut self, hands: &[HandObservation]) -> FrameOutput {
        let params = self.tunables.apply_to(self.config.decision_params());
        let mut action = decide(hands, &params);
        action.steering_angle_deg = self.angle_filter.update(action.steering_angle_deg);

        self.keys.apply_actions(action.movement, action.turn);

        let (w, h) = (self.config.frame_width, self.config.frame_height);
        let feedback: Vec<HandFeedback<'_>> = hands
            .iter()
            .map(|hand| HandFeedback { hand, grip: self.grip.estimate(hand, w, h) })
            .collect();
        let chips = if self.show_debug { self.tuning_chips() } else { Vec::new() };

        let draw = self.overlay.tick(&FrameInput {
            action:      &action,
            hands:       &feedback,
            width:       w,
            height:      h,
            show_debug:  self.show_debug,
            extra_chips: &chips,
        });

        FrameOutput { action, draw }
    }

    /// Apply a keyboard command.
    pub fn apply(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::Quit => return Flow::Quit,
            Command::CycleTheme     => self.set_theme(next_theme(self.overlay.theme())),
            Command::CycleDarkTheme => self.set_theme(next_dark_theme(self.overlay.theme())),
            Command::GainDown => {
                let g = self.tunables.adjust_gain(-GAIN_STEP);
                tracing::info!(gain = g, "steering gain");
            }
            Command::GainUp => {
                let g = self.tunables.adjust_gain(GAIN_STEP);
                tracing::info!(gain = g, "steering gain");
            }
            Command::DeadbandWider => {
                let d = self.tunables.adjust_deadband(DEADBAND_STEP);
                tracing::info!(deadband = d, "turn deadband");
            }
            Command::DeadbandNarrower => {
                let d = self.tunables.adjust_deadband(-DEADBAND_STEP);
                tracing::info!(deadband = d, "turn deadband");
            }
            Command::SmootherAngle => {
                let a = self.tunables.adjust_smoothing(-SMOOTHING_STEP);
                self.angle_filter.set_alpha(a);
                tracing::info!(alpha = a, "angle smoothing");
            }
            Command::SnappierAngle => {
                let a = self.tunables.adjust_smoothing(SMOOTHING_STEP);
                self.angle_filter.set_alpha(a);
                tracing::info!(alpha = a, "angle smoothing");
            }
            Command::ToggleDebug => {
                self.show_debug = !self.show_debug;
                tracing::info!(visible = self.show_debug, "debug overlay");
            }
            Command::ResetTuning => {
                self.tunables.reset();
                self.angle_filter.set_alpha(self.tunables.smoothing_alpha);
                tracing::info!(
                    gain = self.tunables.steering_gain,
                    deadband = self.tunables.turn_deadband_deg,
                    alpha = self.tunables.smoothing_alpha,
                    "tuning reset"
                );
            }
        }
        Flow::Continue
    }

    /// Feed the wall-clock time between two presented frames.
    pub fn observe_frame_interval(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32().max(1e-6);
        self.fps_filter.update(1.0 / secs);
    }

    pub fn fps(&self) -> f32 {
        self.fps_filter.value().unwrap_or(0.0)
    }

    /// Release every held key. Call before tearing anything else down.
    pub fn shutdown(&mut self) {
        self.keys.release_all();
    }

    pub fn keys(&self) -> &KeyStateController<B> { &self.keys }

    pub fn tunables(&self) -> &Tunables { &self.tunables }

    pub fn overlay(&self) -> &OverlayState { &self.overlay }

    pub fn show_debug(&self) -> bool { self.show_debug }

    pub fn config(&self) -> &AppConfig { &self.config }

    fn tuning_chips(&self) -> Vec<String> {
        vec![
            format!("Gain: {:.2}", self.tunables.steering_gain),
            format!("Deadband: {:.0}°", self.tunables.turn_deadband_deg),
            format!("Smooth: {:.2}", self.tunables.smoothing_alpha),
            format!("Theme: {}", self.overlay.theme().name),
            format!("FPS: {:.0}", self.fps()),
        ]
    }

    /// Swap themes by recreating the overlay, which also clears trails and
    /// particles.
    fn set_theme(&mut self, theme: &'static Theme) {
        tracing::info!(theme = theme.name, "theme");
        self.overlay = OverlayState::new(theme, self.config.overlay_config());
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use racer_control::{DriveKey, Handedness, KeyError, MoveAction, TurnAction};

    #[derive(Clone, Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<(bool, DriveKey)>>>,
    }

    impl Recorder {
        fn presses(&self) -> usize { self.log.borrow().iter().filter(|(down, _)| *down).count() }
        fn releases(&self) -> usize { self.log.borrow().iter().filter(|(down, _)| !*down).count() }
    }

    impl KeyBackend for Recorder {
        fn press(&mut self, key: DriveKey) -> Result<(), KeyError> {
            self.log.borrow_mut().push((true, key));
            Ok(())
        }
        fn release(&mut self, key: DriveKey) -> Result<(), KeyError> {
            self.log.borrow_mut().push((false, key));
            Ok(())
        }
    }

    fn pipeline() -> (Pipeline<Recorder>, Recorder) {
        let rec = Recorder::default();
        (Pipeline::new(AppConfig::default(), rec.clone()), rec)
    }

    fn pair(dy: i32) -> Vec<HandObservation> {
        vec![
            HandObservation::new(300, 360, Handedness::Left),
            HandObservation::new(600, 360 + dy, Handedness::Right),
        ]
    }

    #[test]
    fn level_hands_drive_forward() {
        let (mut p, _) = pipeline();
        let out = p.tick(&pair(0));
        assert_eq!(out.action.movement, MoveAction::Forward);
        assert_eq!(out.action.turn, TurnAction::Straight);
        assert!(p.keys().is_held(DriveKey::Forward));
        assert!(out.draw.is_back_to_front());
    }

    #[test]
    fn steering_angle_is_smoothed_from_zero() {
        let (mut p, _) = pipeline();
        let raw = decide(&pair(150), &AppConfig::default().decision_params()).steering_angle_deg;
        let out = p.tick(&pair(150));
        assert!((out.action.steering_angle_deg - 0.18 * raw).abs() < 1e-4);
        // turn comes from the raw angle
        assert_eq!(out.action.turn, TurnAction::Right);
    }

    #[test]
    fn no_hands_releases_everything() {
        let (mut p, rec) = pipeline();
        p.tick(&pair(150));
        p.tick(&[]);
        assert!(p.keys().held().is_empty());
        assert_eq!(rec.presses(), rec.releases());
    }

    #[test]
    fn shutdown_releases_once() {
        let (mut p, rec) = pipeline();
        p.tick(&pair(150));
        p.shutdown();
        let releases = rec.releases();
        p.shutdown();
        assert_eq!(rec.releases(), releases);
        assert_eq!(rec.presses(), releases);
    }

    #[test]
    fn gain_change_applies_next_tick() {
        let (mut p, _) = pipeline();
        // 150/300 → 26.57° raw tilt
        assert_eq!(p.tick(&pair(150)).action.turn, TurnAction::Right);
        for _ in 0..7 {
            p.apply(Command::GainDown);
        }
        assert_eq!(p.tunables().steering_gain, 0.2);
        // 26.57 · 0.2 = 5.3° is inside the deadband
        assert_eq!(p.tick(&pair(150)).action.turn, TurnAction::Straight);
    }

    #[test]
    fn reset_restores_filter_alpha() {
        let (mut p, _) = pipeline();
        p.apply(Command::SnappierAngle);
        p.apply(Command::DeadbandWider);
        assert_eq!(p.tunables().smoothing_alpha, 0.2);
        p.apply(Command::ResetTuning);
        assert_eq!(p.tunables().smoothing_alpha, 0.18);
        assert_eq!(p.tunables().turn_deadband_deg, 12.0);
    }

    #[test]
    fn theme_cycle_recreates_overlay() {
        let (mut p, _) = pipeline();
        for _ in 0..3 {
            p.tick(&pair(0));
        }
        assert_eq!(p.overlay().frame_no(), 3);
        assert_eq!(p.overlay().theme().name, "holo_flux");

        p.apply(Command::CycleTheme);
        assert_eq!(p.overlay().theme().name, "dark_stealth");
        assert_eq!(p.overlay().frame_no(), 0);
        assert!(p.overlay().trails().is_empty());

        p.apply(Command::CycleDarkTheme);
        assert_eq!(p.overlay().theme().name, "dark_crimson");
    }

    #[test]
    fn debug_toggle_hides_tuning_chips() {
        let (mut p, _) = pipeline();
        assert!(p.tick(&pair(0)).draw.texts().iter().any(|t| t.starts_with("Gain:")));
        p.apply(Command::ToggleDebug);
        assert!(!p.tick(&pair(0)).draw.texts().iter().any(|t| t.starts_with("Gain:")));
    }

    #[test]
    fn quit_command_stops() {
        let (mut p, _) = pipeline();
        assert_eq!(p.apply(Command::Quit), Flow::Quit);
        assert_eq!(p.apply(Command::GainUp), Flow::Continue);
    }

    #[test]
    fn fps_readout_is_smoothed() {
        let (mut p, _) = pipeline();
        p.observe_frame_interval(Duration::from_millis(20));
        assert!((p.fps() - 10.0).abs() < 1e-3);
        p.observe_frame_interval(Duration::from_millis(20));
        assert!((p.fps() - 18.0).abs() < 1e-3);
    }
}
