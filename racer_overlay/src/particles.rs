//! Burst particles emitted from the wheel centre while steering hard.

use crate::draw::Point;
use crate::theme::{Rgb, Theme};

/// Ticks a particle lives.
pub const PARTICLE_LIFE: u32 = 18;
/// Largest burst a single tick can emit (`floor(4 + 8·1.0)`).
pub const MAX_SPAWN_PER_TICK: usize = 12;
/// Bursts only fire above this intensity.
pub const SPAWN_THRESHOLD: f32 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x:     f32,
    pub y:     f32,
    pub vx:    f32,
    pub vy:    f32,
    pub life:  u32,
    pub color: Rgb,
}

impl Particle {
    /// Dot radius, shrinking from 4 px to 1 px as the particle ages.
    pub fn size(&self) -> i32 {
        ((4 * self.life) / PARTICLE_LIFE).max(1) as i32
    }

    pub fn position(&self) -> Point {
        (self.x as i32, self.y as i32)
    }
}

/// Unordered particle bag with a soft capacity.
///
/// The capacity gates spawning only: a burst starting just under the cap may
/// overshoot it by up to `MAX_SPAWN_PER_TICK - 1`.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    capacity:  usize,
}

impl ParticleField {
    pub fn new(capacity: usize) -> Self {
        ParticleField { particles: Vec::new(), capacity }
    }

    /// Emit `floor(4 + 8·intensity)` particles evenly around `center` when
    /// `intensity > 0.1` and the field is under capacity. Returns the number
    /// spawned.
    pub fn spawn_burst(&mut self, center: Point, intensity: f32, frame_no: u64, theme: &Theme) -> usize {
        let intensity = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
        if intensity <= SPAWN_THRESHOLD || self.particles.len() >= self.capacity {
            return 0;
        }

        let count = ((4.0 + 8.0 * intensity).floor() as usize).min(MAX_SPAWN_PER_TICK);
        let speed = 2.0 + 3.0 * intensity;
        for i in 0..count {
            let ang = (i as f32 * 360.0 / count as f32).to_radians();
            self.particles.push(Particle {
                x:     center.0 as f32,
                y:     center.1 as f32,
                vx:    speed * ang.cos(),
                vy:    speed * ang.sin(),
                life:  PARTICLE_LIFE,
                color: theme.palette_color(frame_no.wrapping_add(i as u64)),
            });
        }
        count
    }

    /// Advance every particle by its velocity, age it one tick and drop the
    /// dead ones.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize { self.particles.len() }

    pub fn is_empty(&self) -> bool { self.particles.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::HOLO_FLUX;

    #[test]
    fn burst_size_follows_intensity() {
        let mut f = ParticleField::new(80);
        assert_eq!(f.spawn_burst((0, 0), 0.1, 0, &HOLO_FLUX), 0);
        assert_eq!(f.spawn_burst((0, 0), 0.5, 0, &HOLO_FLUX), 8);
        assert_eq!(f.spawn_burst((0, 0), 1.0, 0, &HOLO_FLUX), 12);
        assert_eq!(f.spawn_burst((0, 0), 7.0, 0, &HOLO_FLUX), 12);
        assert_eq!(f.len(), 32);
    }

    #[test]
    fn burst_is_spread_evenly() {
        let mut f = ParticleField::new(80);
        f.spawn_burst((100, 100), 0.5, 0, &HOLO_FLUX);
        let sum_vx: f32 = f.iter().map(|p| p.vx).sum();
        let sum_vy: f32 = f.iter().map(|p| p.vy).sum();
        assert!(sum_vx.abs() < 1e-3 && sum_vy.abs() < 1e-3);
        for p in f.iter() {
            assert!((p.vx.hypot(p.vy) - 3.5).abs() < 1e-4);
        }
    }

    #[test]
    fn count_stays_within_soft_cap() {
        let cap = 80;
        let mut f = ParticleField::new(cap);
        for frame in 0..500 {
            f.spawn_burst((0, 0), 1.0, frame, &HOLO_FLUX);
            assert!(f.len() <= cap + MAX_SPAWN_PER_TICK - 1, "frame {}: {}", frame, f.len());
            f.step();
        }
    }

    #[test]
    fn drains_within_life_after_intensity_drops() {
        let mut f = ParticleField::new(80);
        for frame in 0..30 {
            f.spawn_burst((0, 0), 0.9, frame, &HOLO_FLUX);
            f.step();
        }
        assert!(!f.is_empty());
        for frame in 30..30 + PARTICLE_LIFE as u64 {
            f.spawn_burst((0, 0), 0.0, frame, &HOLO_FLUX);
            f.step();
        }
        assert!(f.is_empty());
    }

    #[test]
    fn size_shrinks_with_age() {
        let p = Particle { x: 0.0, y: 0.0, vx: 0.0, vy: 0.0, life: PARTICLE_LIFE, color: Rgb::new(0, 0, 0) };
        assert_eq!(p.size(), 4);
        assert_eq!(Particle { life: 1, ..p }.size(), 1);
    }
}
