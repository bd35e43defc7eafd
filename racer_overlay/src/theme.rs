//! Colour themes.
//!
//! Themes are immutable data. Each carries a palette that the overlay indexes
//! cyclically by frame number, so colours drift continuously while driving.

// ════════════════════════════════════════════════════════════════════════════
// Rgb
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Packed opaque ARGB (0xAARRGGBB, A = 0xFF).
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn from_argb(argb: u32) -> Self {
        Rgb::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Multiply every channel by `k` (saturating).
    pub fn scaled(self, k: f32) -> Self {
        let s = |c: u8| (c as f32 * k).clamp(0.0, 255.0) as u8;
        Rgb::new(s(self.r), s(self.g), s(self.b))
    }

    /// Linear blend: `t = 0` → `self`, `t = 1` → `other`.
    pub fn blend(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Theme
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name:            &'static str,
    pub panel:           Rgb,
    pub accent:          Rgb,
    pub text_main:       Rgb,
    pub text_muted:      Rgb,
    pub wheel:           Rgb,
    pub wheel_indicator: Rgb,
    /// Cyclic palette; empty falls back to `wheel_indicator`.
    pub palette:         &'static [Rgb],
}

impl Theme {
    pub fn palette_color(&self, idx: u64) -> Rgb {
        if self.palette.is_empty() {
            return self.wheel_indicator;
        }
        self.palette[(idx % self.palette.len() as u64) as usize]
    }
}

// ── built-in themes ─────────────────────────────────────────────────────────

pub const NEO_GREEN: Theme = Theme {
    name:            "neo_green",
    panel:           Rgb::new(25, 25, 25),
    accent:          Rgb::new(0, 230, 0),
    text_main:       Rgb::new(235, 255, 235),
    text_muted:      Rgb::new(160, 200, 160),
    wheel:           Rgb::new(70, 70, 70),
    wheel_indicator: Rgb::new(120, 255, 0),
    palette:         &[Rgb::new(120, 255, 0), Rgb::new(255, 180, 0), Rgb::new(0, 200, 255)],
};

pub const OCEAN_BLUE: Theme = Theme {
    name:            "ocean_blue",
    panel:           Rgb::new(70, 35, 28),
    accent:          Rgb::new(255, 200, 0),
    text_main:       Rgb::new(255, 240, 230),
    text_muted:      Rgb::new(240, 190, 170),
    wheel:           Rgb::new(150, 90, 80),
    wheel_indicator: Rgb::new(255, 200, 0),
    palette:         &[Rgb::new(255, 200, 0), Rgb::new(0, 120, 255), Rgb::new(180, 255, 0)],
};

pub const SUNSET_ORANGE: Theme = Theme {
    name:            "sunset_orange",
    panel:           Rgb::new(60, 40, 40),
    accent:          Rgb::new(0, 120, 255),
    text_main:       Rgb::new(230, 240, 255),
    text_muted:      Rgb::new(180, 200, 220),
    wheel:           Rgb::new(110, 85, 85),
    wheel_indicator: Rgb::new(40, 140, 255),
    palette:         &[Rgb::new(40, 140, 255), Rgb::new(255, 200, 0), Rgb::new(0, 255, 120)],
};

pub const CYBER_PURPLE: Theme = Theme {
    name:            "cyber_purple",
    panel:           Rgb::new(45, 20, 30),
    accent:          Rgb::new(255, 50, 200),
    text_main:       Rgb::new(255, 235, 245),
    text_muted:      Rgb::new(220, 180, 200),
    wheel:           Rgb::new(120, 60, 90),
    wheel_indicator: Rgb::new(220, 80, 255),
    palette:         &[
        Rgb::new(220, 80, 255), Rgb::new(255, 200, 0), Rgb::new(0, 200, 255), Rgb::new(160, 255, 0),
    ],
};

pub const HOLO_FLUX: Theme = Theme {
    name:            "holo_flux",
    panel:           Rgb::new(32, 22, 22),
    accent:          Rgb::new(220, 80, 255),
    text_main:       Rgb::new(255, 240, 240),
    text_muted:      Rgb::new(220, 190, 190),
    wheel:           Rgb::new(120, 70, 80),
    wheel_indicator: Rgb::new(220, 80, 255),
    palette:         &[
        Rgb::new(220, 80, 255), Rgb::new(255, 200, 0), Rgb::new(0, 200, 255), Rgb::new(160, 255, 0),
    ],
};

pub const DARK_STEALTH: Theme = Theme {
    name:            "dark_stealth",
    panel:           Rgb::new(24, 18, 18),
    accent:          Rgb::new(180, 200, 0),
    text_main:       Rgb::new(250, 250, 240),
    text_muted:      Rgb::new(200, 200, 180),
    wheel:           Rgb::new(55, 40, 40),
    wheel_indicator: Rgb::new(180, 200, 0),
    palette:         &[Rgb::new(180, 200, 0), Rgb::new(255, 180, 0), Rgb::new(0, 180, 255)],
};

pub const DARK_CRIMSON: Theme = Theme {
    name:            "dark_crimson",
    panel:           Rgb::new(20, 20, 20),
    accent:          Rgb::new(220, 0, 0),
    text_main:       Rgb::new(240, 240, 240),
    text_muted:      Rgb::new(180, 180, 180),
    wheel:           Rgb::new(50, 50, 50),
    wheel_indicator: Rgb::new(255, 0, 0),
    palette:         &[Rgb::new(255, 0, 0), Rgb::new(255, 180, 0), Rgb::new(0, 200, 255)],
};

pub const DARK_CYAN: Theme = Theme {
    name:            "dark_cyan",
    panel:           Rgb::new(24, 20, 16),
    accent:          Rgb::new(0, 180, 255),
    text_main:       Rgb::new(240, 240, 230),
    text_muted:      Rgb::new(200, 190, 170),
    wheel:           Rgb::new(55, 50, 45),
    wheel_indicator: Rgb::new(0, 180, 255),
    palette:         &[Rgb::new(0, 180, 255), Rgb::new(255, 200, 0), Rgb::new(160, 255, 0)],
};

/// Every built-in theme in cycling order.
pub const THEMES: [&Theme; 8] = [
    &NEO_GREEN, &OCEAN_BLUE, &SUNSET_ORANGE, &CYBER_PURPLE,
    &HOLO_FLUX, &DARK_STEALTH, &DARK_CRIMSON, &DARK_CYAN,
];

pub const DARK_THEMES: [&Theme; 3] = [&DARK_STEALTH, &DARK_CRIMSON, &DARK_CYAN];

pub const DEFAULT_THEME: &Theme = &NEO_GREEN;

// ════════════════════════════════════════════════════════════════════════════
// Lookup & cycling
// ════════════════════════════════════════════════════════════════════════════

/// Theme by (case-insensitive) name; unknown names get [`DEFAULT_THEME`].
pub fn theme_by_name(name: &str) -> &'static Theme {
    match THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim())) {
        Some(t) => *t,
        None => {
            tracing::warn!(theme = name, fallback = DEFAULT_THEME.name, "unknown theme");
            DEFAULT_THEME
        }
    }
}

/// The theme after `current` in [`THEMES`], wrapping around.
pub fn next_theme(current: &Theme) -> &'static Theme {
    let idx = THEMES.iter().position(|t| t.name == current.name).unwrap_or(0);
    THEMES[(idx + 1) % THEMES.len()]
}

/// The dark theme after `current`; from a non-dark theme, the first dark one.
pub fn next_dark_theme(current: &Theme) -> &'static Theme {
    match DARK_THEMES.iter().position(|t| t.name == current.name) {
        Some(idx) => DARK_THEMES[(idx + 1) % DARK_THEMES.len()],
        None      => DARK_THEMES[0],
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_is_opaque() {
        for t in THEMES {
            assert_eq!(t.accent.to_argb() >> 24, 0xFF, "{} accent", t.name);
        }
        assert_eq!(Rgb::from_argb(Rgb::new(1, 2, 3).to_argb()), Rgb::new(1, 2, 3));
    }

    #[test]
    fn lookup_is_case_insensitive_with_fallback() {
        assert_eq!(theme_by_name("HOLO_FLUX").name, "holo_flux");
        assert_eq!(theme_by_name("no_such_theme").name, "neo_green");
        assert_eq!(theme_by_name("").name, "neo_green");
    }

    #[test]
    fn palette_cycles() {
        let t = &HOLO_FLUX;
        assert_eq!(t.palette_color(0), t.palette_color(4));
        assert_ne!(t.palette_color(0), t.palette_color(1));
        assert_eq!(t.palette_color(u64::MAX), t.palette[(u64::MAX % 4) as usize]);
    }

    #[test]
    fn empty_palette_falls_back_to_indicator() {
        let t = Theme { palette: &[], ..NEO_GREEN };
        assert_eq!(t.palette_color(7), NEO_GREEN.wheel_indicator);
    }

    #[test]
    fn cycling_wraps() {
        let mut t: &Theme = &NEO_GREEN;
        for _ in 0..THEMES.len() {
            t = next_theme(t);
        }
        assert_eq!(t.name, "neo_green");
        assert_eq!(next_theme(&DARK_CYAN).name, "neo_green");
    }

    #[test]
    fn dark_cycling_stays_dark() {
        assert_eq!(next_dark_theme(&HOLO_FLUX).name, "dark_stealth");
        assert_eq!(next_dark_theme(&DARK_STEALTH).name, "dark_crimson");
        assert_eq!(next_dark_theme(&DARK_CYAN).name, "dark_stealth");
        let dark = next_dark_theme(&OCEAN_BLUE);
        assert!(DARK_THEMES.iter().any(|t| t.name == dark.name));
    }

    #[test]
    fn scale_and_blend() {
        assert_eq!(Rgb::new(100, 200, 50).scaled(0.5), Rgb::new(50, 100, 25));
        assert_eq!(Rgb::new(200, 200, 200).scaled(2.0), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::new(0, 0, 0).blend(Rgb::new(200, 100, 50), 0.5), Rgb::new(100, 50, 25));
    }
}
