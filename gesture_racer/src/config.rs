//! Application configuration and live-tunable parameters.
//!
//! [`AppConfig`] is read once at startup (TOML, every key optional) and then
//! sanitised into range. [`Tunables`] holds the subset the keyboard can nudge
//! while driving; `reset` restores them to the configured values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use racer_control::{DecisionParams, DriveKey};
use racer_overlay::OverlayConfig;

use crate::error::ConfigError;

pub const GAIN_RANGE:      (f32, f32) = (0.2, 3.0);
pub const DEADBAND_RANGE:  (f32, f32) = (2.0, 40.0);
pub const SMOOTHING_RANGE: (f32, f32) = (0.02, 1.0);

pub const FRAME_DIM_RANGE:   (u32, u32)     = (64, 4096);
pub const TRAIL_LEN_RANGE:   (usize, usize) = (1, 256);
pub const PARTICLE_MAX_CAP:  usize          = 2000;

// ════════════════════════════════════════════════════════════════════════════
// MovementKeys
// ════════════════════════════════════════════════════════════════════════════

/// Key symbols the driving keys are mapped onto.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementKeys {
    pub forward: String,
    pub left:    String,
    pub back:    String,
    pub right:   String,
}

impl Default for MovementKeys {
    fn default() -> Self {
        MovementKeys {
            forward: "w".into(),
            left:    "a".into(),
            back:    "s".into(),
            right:   "d".into(),
        }
    }
}

impl MovementKeys {
    pub fn symbol(&self, key: DriveKey) -> &str {
        match key {
            DriveKey::Forward => &self.forward,
            DriveKey::Left    => &self.left,
            DriveKey::Back    => &self.back,
            DriveKey::Right   => &self.right,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // ── frame & tracking ──────────────────────────────────────────────────
    pub frame_width:           u32,
    pub frame_height:          u32,
    pub max_num_hands:         usize,
    /// Present a mirror view (what a selfie camera shows).
    pub frame_flip:            bool,

    // ── gesture thresholds ────────────────────────────────────────────────
    pub brake_distance_px:     f32,
    pub turn_tilt_threshold:   f32,
    pub steering_gain:         f32,
    pub max_steering_deg:      f32,
    pub turn_deadband_deg:     f32,
    pub smoothing_alpha_angle: f32,

    // ── output ────────────────────────────────────────────────────────────
    pub movement_keys:         MovementKeys,

    // ── HUD ───────────────────────────────────────────────────────────────
    pub show_debug:            bool,
    pub theme_name:            String,
    pub ui_intensity:          f32,
    pub particle_max:          usize,
    pub trail_length:          usize,
    pub grid_alpha:            f32,
    pub scanlines_alpha:       f32,
    pub hex_alpha:             f32,
    pub handle_enabled:        bool,
    pub grip_threshold_px:     f32,
    pub target_fps:            u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            frame_width:           960,
            frame_height:          720,
            max_num_hands:         2,
            frame_flip:            true,
            brake_distance_px:     100.0,
            turn_tilt_threshold:   0.3,
            steering_gain:         0.9,
            max_steering_deg:      60.0,
            turn_deadband_deg:     12.0,
            smoothing_alpha_angle: 0.18,
            movement_keys:         MovementKeys::default(),
            show_debug:            true,
            theme_name:            "holo_flux".into(),
            ui_intensity:          0.6,
            particle_max:          80,
            trail_length:          8,
            grid_alpha:            0.05,
            scanlines_alpha:       0.06,
            hex_alpha:             0.05,
            handle_enabled:        true,
            grip_threshold_px:     28.0,
            target_fps:            30,
        }
    }
}

impl AppConfig {
    /// Read and sanitise a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let cfg = Self::from_toml_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Parse TOML; missing keys take their defaults. The result is sanitised.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let cfg: AppConfig = toml::from_str(text)?;
        Ok(cfg.sanitized())
    }

    /// Clamp every value into its valid range. Non-finite floats fall back
    /// to the default.
    pub fn sanitized(self) -> Self {
        let d = AppConfig::default();
        let clamp = |v: f32, fallback: f32, lo: f32, hi: f32| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let nonneg = |v: f32, fallback: f32| if v.is_finite() { v.max(0.0) } else { fallback };

        AppConfig {
            frame_width:           self.frame_width.clamp(FRAME_DIM_RANGE.0, FRAME_DIM_RANGE.1),
            frame_height:          self.frame_height.clamp(FRAME_DIM_RANGE.0, FRAME_DIM_RANGE.1),
            max_num_hands:         self.max_num_hands.min(2),
            brake_distance_px:     nonneg(self.brake_distance_px, d.brake_distance_px),
            turn_tilt_threshold:   nonneg(self.turn_tilt_threshold, d.turn_tilt_threshold),
            steering_gain:         clamp(self.steering_gain, d.steering_gain, GAIN_RANGE.0, GAIN_RANGE.1),
            max_steering_deg:      clamp(self.max_steering_deg, d.max_steering_deg, 1.0, 180.0),
            turn_deadband_deg:     clamp(self.turn_deadband_deg, d.turn_deadband_deg, DEADBAND_RANGE.0, DEADBAND_RANGE.1),
            smoothing_alpha_angle: clamp(self.smoothing_alpha_angle, d.smoothing_alpha_angle, 0.0, 1.0),
            ui_intensity:          clamp(self.ui_intensity, d.ui_intensity, 0.0, 1.0),
            grid_alpha:            clamp(self.grid_alpha, d.grid_alpha, 0.0, 1.0),
            scanlines_alpha:       clamp(self.scanlines_alpha, d.scanlines_alpha, 0.0, 1.0),
            hex_alpha:             clamp(self.hex_alpha, d.hex_alpha, 0.0, 1.0),
            grip_threshold_px:     positive(self.grip_threshold_px, d.grip_threshold_px),
            target_fps:            self.target_fps.clamp(1, 240),
            particle_max:          self.particle_max.min(PARTICLE_MAX_CAP),
            trail_length:          self.trail_length.clamp(TRAIL_LEN_RANGE.0, TRAIL_LEN_RANGE.1),
            ..self
        }
    }

    pub fn decision_params(&self) -> DecisionParams {
        DecisionParams {
            brake_distance_px: self.brake_distance_px,
            tilt_threshold:    self.turn_tilt_threshold,
            steering_gain:     self.steering_gain,
            max_steering_deg:  self.max_steering_deg,
            turn_deadband_deg: self.turn_deadband_deg,
        }
    }

    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            alpha_scale:      self.ui_intensity,
            trail_len:        self.trail_length,
            particle_max:     self.particle_max,
            grid_alpha:       self.grid_alpha,
            scan_alpha:       self.scanlines_alpha,
            hex_alpha:        self.hex_alpha,
            max_steering_deg: self.max_steering_deg,
            draw_handles:     self.handle_enabled,
            ..OverlayConfig::default()
        }
    }

    /// The effective configuration as TOML, every key spelled out.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tunables
// ════════════════════════════════════════════════════════════════════════════

/// Parameters adjustable at runtime. Every adjustment is clamped to its range
/// and rounded to two decimals so repeated steps land on clean values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tunables {
    pub steering_gain:     f32,
    pub turn_deadband_deg: f32,
    pub smoothing_alpha:   f32,
    configured:            (f32, f32, f32),
}

impl Tunables {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let configured = (cfg.steering_gain, cfg.turn_deadband_deg, cfg.smoothing_alpha_angle);
        Tunables {
            steering_gain:     configured.0,
            turn_deadband_deg: configured.1,
            smoothing_alpha:   configured.2,
            configured,
        }
    }

    pub fn adjust_gain(&mut self, delta: f32) -> f32 {
        self.steering_gain = step(self.steering_gain, delta, GAIN_RANGE);
        self.steering_gain
    }

    pub fn adjust_deadband(&mut self, delta: f32) -> f32 {
        self.turn_deadband_deg = step(self.turn_deadband_deg, delta, DEADBAND_RANGE);
        self.turn_deadband_deg
    }

    pub fn adjust_smoothing(&mut self, delta: f32) -> f32 {
        self.smoothing_alpha = step(self.smoothing_alpha, delta, SMOOTHING_RANGE);
        self.smoothing_alpha
    }

    pub fn reset(&mut self) {
        (self.steering_gain, self.turn_deadband_deg, self.smoothing_alpha) = self.configured;
    }

    /// `base` with gain and deadband replaced by the live values.
    pub fn apply_to(&self, base: DecisionParams) -> DecisionParams {
        DecisionParams {
            steering_gain:     self.steering_gain,
            turn_deadband_deg: self.turn_deadband_deg,
            ..base
        }
    }
}

fn step(value: f32, delta: f32, (lo, hi): (f32, f32)) -> f32 {
    (((value + delta) * 100.0).round() / 100.0).clamp(lo, hi)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
