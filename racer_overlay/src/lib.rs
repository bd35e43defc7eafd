//! # racer_overlay
//!
//! Visual feedback for the gesture racer.
//!
//! [`OverlayState`] is the only stateful piece: it carries a frame counter,
//! per-hand trails and a particle bag from one tick to the next, and turns
//! each frame's smoothed action into a back-to-front [`DrawList`]. Everything
//! else (panels, chips, wheel, reticle, text) is rebuilt every frame.
//!
//! [`Canvas`] rasterises a draw list into a packed ARGB buffer suitable for a
//! `minifb` window.
//!
//! ## Layers (back to front)
//!
//! | Layer | Contents |
//! |---|---|
//! | Background | fill, grid, parallax hex grid, scanlines |
//! | Panels | title bar, status/tuning chips |
//! | Wheel | wheel ring, glow indicator, arcs, pulse, rotating ticks, intensity bar |
//! | Particles | burst particles |
//! | Hands | trails, markers, wrist handles, grip labels, two-hand glow line |
//! | Reticle | centre reticle |
//! | Text | footer help, debug line |

pub mod theme;
pub mod font;
pub mod draw;
pub mod particles;
pub mod trails;
pub mod overlay;
pub mod raster;

pub use theme::{next_dark_theme, next_theme, theme_by_name, Rgb, Theme, THEMES};
pub use draw::{DrawCmd, DrawList, Layer, Point};
pub use particles::{Particle, ParticleField, MAX_SPAWN_PER_TICK, PARTICLE_LIFE};
pub use trails::{TrailBuffer, TrailMap};
pub use overlay::{FrameInput, HandFeedback, OverlayConfig, OverlayState};
pub use raster::Canvas;
