//! Per-frame overlay state machine.
//!
//! [`OverlayState::tick`] advances the frame counter, steps particles and
//! trails, and lays the whole HUD out as a [`DrawList`]. Animation phases
//! (palette cycling, pulse, tick rotation) are functions of the frame
//! counter, never of wall-clock time, so identical input sequences give
//! identical output.

use std::f32::consts::FRAC_PI_2;

use racer_control::{ActionState, Grip, HandObservation, Handedness};

use crate::draw::{DrawCmd, DrawList, Layer, Point};
use crate::font;
use crate::particles::ParticleField;
use crate::theme::{Rgb, Theme};
use crate::trails::TrailMap;

pub const TITLE: &str = "Gesture Racer";

pub const FOOTER: [&str; 4] = [
    "Right Turn: Move RIGHT hand DOWN",
    "Left Turn: Move LEFT hand DOWN",
    "Brake: Bring hands CLOSE together",
    "Press 'q' to quit | Press 't' to cycle theme",
];

const LEFT_MARKER:    Rgb = Rgb::new(255, 0, 0);
const RIGHT_MARKER:   Rgb = Rgb::new(0, 0, 255);
const UNKNOWN_MARKER: Rgb = Rgb::new(255, 255, 0);
const DEBUG_TEXT:     Rgb = Rgb::new(0, 255, 255);
const CENTER_LINE:    Rgb = Rgb::new(60, 60, 60);

const TEXT_SCALE:  u32 = 2;
const TITLE_SCALE: u32 = 4;

// ════════════════════════════════════════════════════════════════════════════
// Inputs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Global opacity multiplier for translucent layers, `[0, 1]`.
    pub alpha_scale:      f32,
    pub trail_len:        usize,
    pub particle_max:     usize,
    pub grid_alpha:       f32,
    pub scan_alpha:       f32,
    pub hex_alpha:        f32,
    /// Steering angle that maps to full intensity.
    pub max_steering_deg: f32,
    pub draw_handles:     bool,
    pub wheel_radius:     i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            alpha_scale:      0.6,
            trail_len:        8,
            particle_max:     80,
            grid_alpha:       0.05,
            scan_alpha:       0.06,
            hex_alpha:        0.05,
            max_steering_deg: 60.0,
            draw_handles:     true,
            wheel_radius:     100,
        }
    }
}

/// A tracked hand together with this frame's grip estimate.
#[derive(Clone, Copy, Debug)]
pub struct HandFeedback<'a> {
    pub hand: &'a HandObservation,
    pub grip: Grip,
}

/// Everything one overlay frame is drawn from.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Smoothed action.
    pub action:      &'a ActionState,
    pub hands:       &'a [HandFeedback<'a>],
    pub width:       u32,
    pub height:      u32,
    pub show_debug:  bool,
    /// Chips appended after the status chips.
    pub extra_chips: &'a [String],
}

// ════════════════════════════════════════════════════════════════════════════
// OverlayState
// ════════════════════════════════════════════════════════════════════════════

/// Animated overlay state. Recreate it to reset (theme swap, restart).
#[derive(Clone, Debug)]
pub struct OverlayState {
    theme:     &'static Theme,
    config:    OverlayConfig,
    frame_no:  u64,
    trails:    TrailMap,
    particles: ParticleField,
}

impl OverlayState {
    pub fn new(theme: &'static Theme, mut config: OverlayConfig) -> Self {
        config.alpha_scale = if config.alpha_scale.is_nan() { 0.0 } else { config.alpha_scale.clamp(0.0, 1.0) };
        tracing::debug!(theme = theme.name, "overlay created");
        OverlayState {
            theme,
            trails:    TrailMap::new(config.trail_len),
            particles: ParticleField::new(config.particle_max),
            frame_no:  0,
            config,
        }
    }

    pub fn theme(&self) -> &'static Theme { self.theme }

    pub fn config(&self) -> &OverlayConfig { &self.config }

    pub fn frame_no(&self) -> u64 { self.frame_no }

    pub fn particles(&self) -> &ParticleField { &self.particles }

    pub fn trails(&self) -> &TrailMap { &self.trails }

    /// `|angle| / max_steering_deg`, clamped to `[0, 1]`.
    pub fn intensity(&self, steering_angle_deg: f32) -> f32 {
        let max = self.config.max_steering_deg.abs();
        if !(max > 0.0) || !steering_angle_deg.is_finite() {
            return 0.0;
        }
        (steering_angle_deg.abs() / max).min(1.0)
    }

    /// Advance one frame and lay out the HUD, back to front.
    pub fn tick(&mut self, input: &FrameInput<'_>) -> DrawList {
        self.frame_no = self.frame_no.wrapping_add(1);

        let w = input.width as i32;
        let h = input.height as i32;
        let center = (w / 2, h / 2);
        let angle = if input.action.steering_angle_deg.is_finite() { input.action.steering_angle_deg } else { 0.0 };
        let intensity = self.intensity(angle);

        self.particles.spawn_burst(center, intensity, self.frame_no, self.theme);
        self.particles.step();

        let mut out = DrawList::new();
        self.background(&mut out, angle);
        self.panels(&mut out, input, w);
        self.wheel(&mut out, center, h, angle, intensity, w);
        self.particle_layer(&mut out);
        self.hands(&mut out, input.hands, (w, h), center, angle, intensity);
        self.reticle(&mut out, center);
        self.text(&mut out, input, w, h);

        tracing::trace!(
            frame = self.frame_no,
            particles = self.particles.len(),
            commands = out.len(),
            "overlay tick"
        );
        out
    }

    fn palette(&self, offset: u64) -> Rgb {
        self.theme.palette_color(self.frame_no.wrapping_add(offset))
    }

    fn alpha(&self, a: f32) -> f32 {
        (a * self.config.alpha_scale).clamp(0.0, 1.0)
    }

    // ── background ──────────────────────────────────────────────────────────

    fn background(&self, out: &mut DrawList, angle: f32) {
        let t = self.theme;
        out.push(Layer::Background, DrawCmd::Fill { color: t.panel.scaled(0.5) });
        out.push(Layer::Background, DrawCmd::Grid {
            spacing: 80,
            color:   t.text_muted,
            alpha:   self.alpha(self.config.grid_alpha),
        });
        out.push(Layer::Background, DrawCmd::HexGrid {
            cell:   70,
            offset: (angle as i32, 0),
            color:  t.wheel,
            alpha:  self.alpha(self.config.hex_alpha),
        });
        out.push(Layer::Background, DrawCmd::Scanlines {
            spacing: 6,
            color:   t.panel.scaled(0.6),
            alpha:   self.alpha(self.config.scan_alpha),
        });
    }

    // ── panels & chips ──────────────────────────────────────────────────────

    fn panels(&self, out: &mut DrawList, input: &FrameInput<'_>, w: i32) {
        let t = self.theme;
        out.push(Layer::Panels, DrawCmd::Rect {
            x: 0, y: 0, w, h: 60,
            color: t.panel, thickness: 0, alpha: self.alpha(0.35),
        });
        out.push(Layer::Panels, DrawCmd::Text {
            pos: (20, 20), text: TITLE.to_string(), color: t.accent, scale: TITLE_SCALE,
        });
        for to in [(120, 10), (10, 50)] {
            out.push(Layer::Panels, DrawCmd::Line {
                from: (10, 10), to, color: t.accent, thickness: 2, alpha: 1.0,
            });
        }

        let status = [
            "Mode: Steering Wheel".to_string(),
            format!("Hands: {}", input.hands.len()),
            format!("Move: {}", input.action.movement),
            format!("Turn: {}", input.action.turn),
        ];
        let mut y = 70;
        for text in status.iter().chain(input.extra_chips) {
            self.chip(out, 20, y, text);
            y += 35;
        }
    }

    fn chip(&self, out: &mut DrawList, x: i32, y: i32, text: &str) {
        const PAD_X: i32 = 12;
        const PAD_Y: i32 = 8;
        let tw = font::text_width(text, TEXT_SCALE) as i32;
        let th = font::text_height(TEXT_SCALE) as i32;
        out.push(Layer::Panels, DrawCmd::Pill {
            x, y, w: tw + 2 * PAD_X, h: th + 2 * PAD_Y,
            color: self.theme.panel, alpha: self.alpha(0.45),
        });
        out.push(Layer::Panels, DrawCmd::Text {
            pos: (x + PAD_X, y + PAD_Y), text: text.to_string(),
            color: self.theme.text_main, scale: TEXT_SCALE,
        });
    }

    // ── wheel ───────────────────────────────────────────────────────────────

    fn wheel(&self, out: &mut DrawList, c: Point, h: i32, angle: f32, intensity: f32, w: i32) {
        let t = self.theme;
        let r = self.config.wheel_radius;

        out.push(Layer::Wheel, DrawCmd::Circle { center: c, radius: r, color: t.wheel, thickness: 2, alpha: 1.0 });
        out.push(Layer::Wheel, DrawCmd::Line {
            from: (c.0, 0), to: (c.0, h), color: CENTER_LINE, thickness: 1, alpha: 1.0,
        });

        if angle.abs() > 1.0 {
            let a = angle.to_radians();
            let end = (c.0 + (r as f32 * a.sin()) as i32, c.1 - (r as f32 * a.cos()) as i32);
            for (i, thickness) in [6, 4, 2].into_iter().enumerate() {
                out.push(Layer::Wheel, DrawCmd::Line {
                    from: c, to: end, color: self.palette(i as u64), thickness, alpha: 1.0,
                });
            }
        }

        for i in 0..4 {
            let color = t.palette_color(i as u64);
            let radius = r + 20 + i * 10;
            for (start_deg, end_deg) in [(30.0, 150.0), (210.0, 330.0)] {
                out.push(Layer::Wheel, DrawCmd::Arc { center: c, radius, start_deg, end_deg, color, alpha: 1.0 });
            }
        }

        let pulse = (8.0 + 6.0 * (self.frame_no as f64 * 0.08).sin().abs()) as u32;
        out.push(Layer::Wheel, DrawCmd::Circle {
            center: c, radius: r + 8,
            color: t.palette_color(self.frame_no / 2), thickness: pulse, alpha: 1.0,
        });

        const TICKS: u32 = 24;
        let offset_deg = (self.frame_no % 360) as f32 * 1.2;
        for i in 0..TICKS {
            let a = (offset_deg + i as f32 * (360.0 / TICKS as f32)).to_radians();
            let at = |radius: i32| {
                (c.0 + (radius as f32 * a.cos()) as i32, c.1 + (radius as f32 * a.sin()) as i32)
            };
            out.push(Layer::Wheel, DrawCmd::Line {
                from: at(r + 8), to: at(r + 24),
                color: t.palette_color(i as u64), thickness: 1, alpha: self.alpha(0.25),
            });
        }

        // intensity bar
        const BAR_W: i32 = 220;
        const SEG_W: i32 = 40;
        let left = w - 260;
        let right = w - 40;
        let filled = (BAR_W as f32 * intensity) as i32;
        let mut i = 0;
        while i < filled {
            let x = left + i;
            out.push(Layer::Wheel, DrawCmd::Rect {
                x, y: 22, w: (x + SEG_W).min(right) - x, h: 18,
                color: self.palette((i / SEG_W) as u64), thickness: 0, alpha: self.alpha(0.4),
            });
            i += SEG_W;
        }
        out.push(Layer::Wheel, DrawCmd::Rect {
            x: left, y: 22, w: BAR_W, h: 18, color: t.panel, thickness: 2, alpha: 1.0,
        });
        out.push(Layer::Wheel, DrawCmd::Text {
            pos: (w - 330, 26), text: "Steer".to_string(), color: t.text_muted, scale: TEXT_SCALE,
        });
    }

    // ── particles ───────────────────────────────────────────────────────────

    fn particle_layer(&self, out: &mut DrawList) {
        let alpha = self.alpha(0.18);
        for p in self.particles.iter() {
            out.push(Layer::Particles, DrawCmd::Circle {
                center: p.position(), radius: p.size(), color: p.color, thickness: 0, alpha,
            });
        }
    }

    // ── hands ───────────────────────────────────────────────────────────────

    fn hands(&mut self, out: &mut DrawList, hands: &[HandFeedback<'_>], frame: Point, c: Point, angle: f32, intensity: f32) {
        let trail_alpha = self.alpha(0.2);
        for fb in hands {
            let hand = fb.hand;
            let pos = near_frame(hand.position, frame);
            let color = match hand.label {
                Handedness::Left    => LEFT_MARKER,
                Handedness::Right   => RIGHT_MARKER,
                Handedness::Unknown => UNKNOWN_MARKER,
            };
            out.push(Layer::Hands, DrawCmd::Circle { center: pos, radius: 12, color, thickness: 0, alpha: 1.0 });
            out.push(Layer::Hands, DrawCmd::Text {
                pos: (pos.0 - 20, pos.1 - 24), text: hand.label.as_str().to_string(), color, scale: TEXT_SCALE,
            });

            let trail = self.trails.record(hand.label, pos);
            for (i, (a, b)) in trail.segments().enumerate() {
                let i = i + 1;
                out.push(Layer::Hands, DrawCmd::Line {
                    from: a, to: b,
                    color: self.theme.palette_color(i as u64),
                    thickness: 4u32.saturating_sub(i as u32 / 3).max(1),
                    alpha: trail_alpha,
                });
            }

            if self.config.draw_handles {
                let side = if hand.label == Handedness::Right { 0.6 } else { -0.6 };
                let delta = angle.to_radians() * side;
                self.handle(out, pos, c, intensity.max(fb.grip.strength), delta);
                if fb.grip.gripping {
                    out.push(Layer::Hands, DrawCmd::Text {
                        pos: (pos.0 + 18, pos.1 - 24), text: "Grip".to_string(),
                        color: self.palette(0), scale: TEXT_SCALE,
                    });
                }
            }
        }

        if let [a, b] = hands {
            for (i, thickness) in [6, 3, 1].into_iter().enumerate() {
                out.push(Layer::Hands, DrawCmd::Line {
                    from: near_frame(a.hand.position, frame), to: near_frame(b.hand.position, frame),
                    color: self.palette(i as u64), thickness, alpha: 1.0,
                });
            }
        }
    }

    /// Wrist ring plus a radial handle pointing away from the wheel centre,
    /// rotated by `delta` radians and lengthened by `strength`.
    fn handle(&self, out: &mut DrawList, pos: Point, c: Point, strength: f32, delta: f32) {
        const RING: i32 = 16;
        let reach = (18.0 + 20.0 * strength.clamp(0.0, 1.0)) as i32;
        let a = (pos.1 as f32 - c.1 as f32).atan2(pos.0 as f32 - c.0 as f32) + delta;
        let polar = |radius: i32, ang: f32| {
            (
                pos.0.saturating_add((radius as f32 * ang.cos()) as i32),
                pos.1.saturating_add((radius as f32 * ang.sin()) as i32),
            )
        };

        for (i, thickness) in [4, 2].into_iter().enumerate() {
            out.push(Layer::Hands, DrawCmd::Circle {
                center: pos, radius: RING + 2 * i as i32,
                color: self.palette(i as u64), thickness, alpha: 0.45,
            });
        }

        let start = polar(RING + 2, a);
        let end = polar(RING + reach, a);
        for (i, thickness) in [6, 4, 2].into_iter().enumerate() {
            out.push(Layer::Hands, DrawCmd::Line {
                from: start, to: end, color: self.palette(i as u64), thickness, alpha: 0.35,
            });
        }

        let spoke = ((8.0 * (0.5 + strength)) as i32).max(6);
        for side in [-0.35_f32, 0.35] {
            let aa = a + side;
            let p = polar(RING + reach - 8, aa);
            let q = (
                p.0.saturating_add((spoke as f32 * (aa + FRAC_PI_2).cos()) as i32),
                p.1.saturating_add((spoke as f32 * (aa + FRAC_PI_2).sin()) as i32),
            );
            out.push(Layer::Hands, DrawCmd::Line {
                from: p, to: q, color: self.palette(3), thickness: 2, alpha: 0.35,
            });
        }
    }

    // ── reticle & text ──────────────────────────────────────────────────────

    fn reticle(&self, out: &mut DrawList, c: Point) {
        let accent = self.theme.accent;
        out.push(Layer::Reticle, DrawCmd::Circle { center: c, radius: 4, color: accent, thickness: 0, alpha: 1.0 });
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            out.push(Layer::Reticle, DrawCmd::Line {
                from: (c.0 + 12 * dx, c.1 + 12 * dy),
                to:   (c.0 + 24 * dx, c.1 + 24 * dy),
                color: accent, thickness: 2, alpha: 1.0,
            });
        }
    }

    fn text(&self, out: &mut DrawList, input: &FrameInput<'_>, w: i32, h: i32) {
        for (i, line) in FOOTER.iter().enumerate() {
            out.push(Layer::Text, DrawCmd::Text {
                pos: (20, h - 90 + 22 * i as i32), text: line.to_string(),
                color: self.theme.text_muted, scale: TEXT_SCALE,
            });
        }
        if input.show_debug && !input.action.debug_text.is_empty() {
            out.push(Layer::Text, DrawCmd::Text {
                pos: (w - 330, 48), text: input.action.debug_text.clone(),
                color: DEBUG_TEXT, scale: TEXT_SCALE,
            });
        }
    }
}

/// Clamp a tracked position to one frame's width/height beyond each edge.
fn near_frame(pos: Point, (w, h): Point) -> Point {
    let (w, h) = (w.max(1), h.max(1));
    (pos.0.clamp(-w, 2 * w), pos.1.clamp(-h, 2 * h))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{MAX_SPAWN_PER_TICK, PARTICLE_LIFE};
    use crate::theme::{DARK_CRIMSON, HOLO_FLUX};
    use racer_control::{MoveAction, TurnAction};

    fn action(angle: f32) -> ActionState {
        ActionState {
            movement:           MoveAction::Forward,
            turn:               TurnAction::Straight,
            steering_angle_deg: angle,
            debug_text:         "Tilt 0.0° | Steer 0.0° | Dist 200".into(),
        }
    }

    fn tick(ov: &mut OverlayState, act: &ActionState, hands: &[HandFeedback<'_>], debug: bool) -> DrawList {
        ov.tick(&FrameInput {
            action: act, hands, width: 960, height: 720, show_debug: debug, extra_chips: &[],
        })
    }

    #[test]
    fn layers_are_back_to_front() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let l = HandObservation::new(300, 400, Handedness::Left);
        let r = HandObservation::new(600, 300, Handedness::Right);
        let hands = [
            HandFeedback { hand: &l, grip: Grip::NONE },
            HandFeedback { hand: &r, grip: Grip { gripping: true, strength: 0.8 } },
        ];
        let list = tick(&mut ov, &action(40.0), &hands, true);
        assert!(list.is_back_to_front());
        for layer in [Layer::Background, Layer::Panels, Layer::Wheel, Layer::Particles,
                      Layer::Hands, Layer::Reticle, Layer::Text] {
            assert!(list.in_layer(layer).count() > 0, "{:?} empty", layer);
        }
        assert!(list.texts().contains(&"Grip"));
        assert!(list.texts().contains(&"Move: forward"));
    }

    #[test]
    fn frame_counter_advances() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let act = action(0.0);
        for _ in 0..5 {
            tick(&mut ov, &act, &[], false);
        }
        assert_eq!(ov.frame_no(), 5);
    }

    #[test]
    fn trails_follow_observed_hands() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig { trail_len: 3, ..OverlayConfig::default() });
        let act = action(0.0);
        for x in 0..6 {
            let l = HandObservation::new(x * 10, 0, Handedness::Left);
            tick(&mut ov, &act, &[HandFeedback { hand: &l, grip: Grip::NONE }], false);
        }
        let trail = ov.trails().get(Handedness::Left).map(|t| t.points().copied().collect::<Vec<_>>());
        assert_eq!(trail, Some(vec![(30, 0), (40, 0), (50, 0)]));
        assert!(ov.trails().get(Handedness::Right).is_none());
    }

    #[test]
    fn extreme_hand_positions_stay_near_frame() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let l = HandObservation::new(i32::MIN, i32::MAX, Handedness::Left);
        let r = HandObservation::new(i32::MAX, i32::MIN, Handedness::Right);
        let hands = [
            HandFeedback { hand: &l, grip: Grip::NONE },
            HandFeedback { hand: &r, grip: Grip { gripping: true, strength: 1.0 } },
        ];
        let list = tick(&mut ov, &action(60.0), &hands, true);
        assert!(list.is_back_to_front());
        let trail = ov.trails().get(Handedness::Left).map(|t| t.points().copied().collect::<Vec<_>>());
        assert_eq!(trail, Some(vec![(-960, 1440)]));
    }

    #[test]
    fn particles_bounded_and_drain() {
        let cfg = OverlayConfig::default();
        let cap = cfg.particle_max;
        let mut ov = OverlayState::new(&HOLO_FLUX, cfg);
        let hard = action(60.0);
        for _ in 0..100 {
            tick(&mut ov, &hard, &[], false);
            assert!(ov.particles().len() <= cap + MAX_SPAWN_PER_TICK - 1);
        }
        assert!(!ov.particles().is_empty());
        let calm = action(0.0);
        for _ in 0..PARTICLE_LIFE {
            tick(&mut ov, &calm, &[], false);
        }
        assert!(ov.particles().is_empty());
    }

    #[test]
    fn no_particles_below_threshold() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let gentle = action(6.0);
        for _ in 0..10 {
            tick(&mut ov, &gentle, &[], false);
        }
        assert!(ov.particles().is_empty());
    }

    #[test]
    fn intensity_clamps() {
        let ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        assert_eq!(ov.intensity(30.0), 0.5);
        assert_eq!(ov.intensity(-90.0), 1.0);
        assert_eq!(ov.intensity(f32::NAN), 0.0);
        let flat = OverlayState::new(&HOLO_FLUX, OverlayConfig { max_steering_deg: 0.0, ..OverlayConfig::default() });
        assert_eq!(flat.intensity(30.0), 0.0);
    }

    #[test]
    fn debug_text_only_when_visible() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let act = action(0.0);
        let shown = tick(&mut ov, &act, &[], true);
        let hidden = tick(&mut ov, &act, &[], false);
        assert!(shown.texts().contains(&act.debug_text.as_str()));
        assert!(!hidden.texts().contains(&act.debug_text.as_str()));
    }

    #[test]
    fn extra_chips_follow_status_chips() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let act = action(0.0);
        let extra = vec!["Gain: 0.90".to_string()];
        let list = ov.tick(&FrameInput {
            action: &act, hands: &[], width: 960, height: 720, show_debug: false, extra_chips: &extra,
        });
        let texts = list.texts();
        let turn = texts.iter().position(|t| *t == "Turn: straight");
        let gain = texts.iter().position(|t| *t == "Gain: 0.90");
        assert!(matches!((turn, gain), (Some(t), Some(g)) if g == t + 1));
    }

    #[test]
    fn colours_come_from_theme() {
        let mut ov = OverlayState::new(&DARK_CRIMSON, OverlayConfig::default());
        let list = tick(&mut ov, &action(0.0), &[], false);
        let reticle_colours: Vec<Rgb> = list
            .in_layer(Layer::Reticle)
            .filter_map(|c| match c {
                DrawCmd::Line { color, .. } | DrawCmd::Circle { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(reticle_colours.len(), 5);
        assert!(reticle_colours.iter().all(|c| *c == DARK_CRIMSON.accent));
    }

    #[test]
    fn indicator_only_past_one_degree() {
        let mut ov = OverlayState::new(&HOLO_FLUX, OverlayConfig::default());
        let wheel_lines = |l: &DrawList| {
            l.in_layer(Layer::Wheel).filter(|c| matches!(c, DrawCmd::Line { thickness: 6, .. })).count()
        };
        let straight = tick(&mut ov, &action(0.5), &[], false);
        let turned = tick(&mut ov, &action(20.0), &[], false);
        assert_eq!(wheel_lines(&straight), 0);
        assert_eq!(wheel_lines(&turned), 1);
    }
}
