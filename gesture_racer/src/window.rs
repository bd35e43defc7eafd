//! `minifb` window: presents the rendered HUD and turns key presses into
//! commands and simulator input.
//!
//! | Key | Effect |
//! |---|---|
//! | `Q` / `Esc` | Quit |
//! | `T` / `D` | Cycle theme / dark theme |
//! | `-` / `=` `+` | Steering gain down / up |
//! | `[` / `]` | Deadband wider / narrower |
//! | `,` / `.` | Smoother / snappier angle |
//! | `H` | Toggle debug overlay |
//! | `R` | Reset tuning |
//! | `N` | Sim: cycle 0/1/2 hands |
//! | `↑` / `↓` | Sim: hands wider / narrower |
//! | `←` / `→` | Sim: tilt wheel left / right |
//! | `Space` (held) | Sim: pinch |

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use racer_overlay::Canvas;

use crate::error::RacerError;
use crate::pipeline::Command;
use crate::tracker::{SimInput, SimKey};

pub const TITLE: &str = "Gesture Racer";

/// One input event from the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowEvent {
    Command(Command),
    Sim(SimInput),
}

const COMMAND_KEYS: [(Key, Command); 14] = [
    (Key::Q,            Command::Quit),
    (Key::Escape,       Command::Quit),
    (Key::T,            Command::CycleTheme),
    (Key::D,            Command::CycleDarkTheme),
    (Key::Minus,        Command::GainDown),
    (Key::NumPadMinus,  Command::GainDown),
    (Key::Equal,        Command::GainUp),
    (Key::NumPadPlus,   Command::GainUp),
    (Key::LeftBracket,  Command::DeadbandWider),
    (Key::RightBracket, Command::DeadbandNarrower),
    (Key::Comma,        Command::SmootherAngle),
    (Key::Period,       Command::SnappierAngle),
    (Key::H,            Command::ToggleDebug),
    (Key::R,            Command::ResetTuning),
];

/// Sim keys that repeat while held.
const SIM_KEYS: [(Key, SimKey); 4] = [
    (Key::Up,    SimKey::Wider),
    (Key::Down,  SimKey::Narrower),
    (Key::Left,  SimKey::TiltLeft),
    (Key::Right, SimKey::TiltRight),
];

pub struct RacerWindow {
    window: Window,
}

impl RacerWindow {
    pub fn new(width: usize, height: usize, target_fps: usize) -> Result<Self, RacerError> {
        let mut window = Window::new(
            TITLE,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| RacerError::Window(e.to_string()))?;

        window.set_target_fps(target_fps);
        tracing::info!(width, height, target_fps, "window opened");

        Ok(RacerWindow { window })
    }

    /// Returns false once the window has been closed.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Key events since the last frame.
    pub fn poll(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() {
            return events;
        }

        for (key, cmd) in COMMAND_KEYS {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                events.push(WindowEvent::Command(cmd));
            }
        }

        if self.window.is_key_pressed(Key::N, KeyRepeat::No) {
            events.push(WindowEvent::Sim(SimInput::KeyDown(SimKey::CycleHands)));
        }
        for (key, sim) in SIM_KEYS {
            if self.window.is_key_pressed(key, KeyRepeat::Yes) {
                events.push(WindowEvent::Sim(SimInput::KeyDown(sim)));
            }
        }
        if self.window.is_key_pressed(Key::Space, KeyRepeat::No) {
            events.push(WindowEvent::Sim(SimInput::KeyDown(SimKey::Pinch)));
        }
        if self.window.is_key_released(Key::Space) {
            events.push(WindowEvent::Sim(SimInput::KeyUp(SimKey::Pinch)));
        }

        events
    }

    /// Show `canvas` and pump the window's event loop.
    pub fn present(&mut self, canvas: &Canvas) -> Result<(), RacerError> {
        self.window
            .update_with_buffer(canvas.buffer(), canvas.width(), canvas.height())
            .map_err(|e| RacerError::Window(e.to_string()))
    }
}
