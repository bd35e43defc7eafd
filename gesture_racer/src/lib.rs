//! # gesture_racer
//!
//! Steer a racing game with two hands held like a steering wheel. Tracked
//! hands become held driving keys (`W`/`A`/`S`/`D` by default) and an
//! animated HUD drawn in a software-rendered window.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Move | Turn |
//! |---|---|---|
//! | No hands | Stop | — |
//! | One hand | Reverse | — |
//! | Two hands close together | Brake | — |
//! | Two hands apart, level | Forward | Straight |
//! | Two hands apart, right hand lower | Forward | Right |
//! | Two hands apart, left hand lower | Forward | Left |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation**: arrow keys, `N` and `Space` drive synthetic
//!   hands; key presses are logged.
//! * `leap` — **Hardware tracking**: polls a LeapMotion controller via LeapC.
//! * `uinput` — **Key injection**: a Linux virtual keyboard holds the keys.
//!
//! ### Window keys
//!
//! | Key | Action |
//! |---|---|
//! | `Q` / `Esc` | Quit |
//! | `T` / `D` | Cycle theme / dark theme |
//! | `-` / `=` | Steering gain |
//! | `[` / `]` | Turn deadband |
//! | `,` / `.` | Angle smoothing |
//! | `H` | Debug overlay |
//! | `R` | Reset tuning |

pub mod error;
pub mod config;
pub mod tracker;
pub mod keyboard;
pub mod pipeline;
pub mod window;
pub mod app;

pub use app::{run, RunOptions};
pub use config::{AppConfig, MovementKeys, Tunables};
pub use error::{ConfigError, RacerError, TrackerError};
pub use keyboard::KeyBackendKind;
pub use tracker::TrackerKind;
