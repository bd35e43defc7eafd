//! Key-injection backends.
//!
//! The logging backend is always available and is the default. The uinput
//! backend (feature `uinput`, Linux) creates a virtual keyboard and emits
//! real key events for the configured symbols; if it cannot be opened the
//! driver falls back to logging with a warning.

use racer_control::{DriveKey, KeyBackend, KeyError};

use crate::config::MovementKeys;

/// Which key backend to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum KeyBackendKind {
    /// Log presses and releases only.
    Log,
    /// Virtual keyboard via /dev/uinput (needs the `uinput` feature).
    Uinput,
}

/// Open the requested backend, falling back to [`LoggingKeyBackend`].
pub fn open_key_backend(kind: KeyBackendKind, keys: &MovementKeys) -> Box<dyn KeyBackend> {
    match kind {
        KeyBackendKind::Log => {
            tracing::info!("key backend: log");
            Box::new(LoggingKeyBackend::new(keys.clone()))
        }
        KeyBackendKind::Uinput => match open_uinput(keys) {
            Ok(backend) => {
                tracing::info!("key backend: uinput");
                backend
            }
            Err(e) => {
                tracing::warn!(error = %e, "uinput unavailable; logging key events instead");
                Box::new(LoggingKeyBackend::new(keys.clone()))
            }
        },
    }
}

#[cfg(feature = "uinput")]
fn open_uinput(keys: &MovementKeys) -> Result<Box<dyn KeyBackend>, KeyError> {
    Ok(Box::new(UinputKeyBackend::open(keys)?))
}

#[cfg(not(feature = "uinput"))]
fn open_uinput(_keys: &MovementKeys) -> Result<Box<dyn KeyBackend>, KeyError> {
    Err(KeyError::Unavailable("built without the `uinput` feature".into()))
}

// ════════════════════════════════════════════════════════════════════════════
// LoggingKeyBackend
// ════════════════════════════════════════════════════════════════════════════

/// Records presses and releases through `tracing`. Never fails.
#[derive(Clone, Debug)]
pub struct LoggingKeyBackend {
    keys: MovementKeys,
}

impl LoggingKeyBackend {
    pub fn new(keys: MovementKeys) -> Self {
        LoggingKeyBackend { keys }
    }
}

impl KeyBackend for LoggingKeyBackend {
    fn press(&mut self, key: DriveKey) -> Result<(), KeyError> {
        tracing::info!(%key, symbol = self.keys.symbol(key), "key down");
        Ok(())
    }

    fn release(&mut self, key: DriveKey) -> Result<(), KeyError> {
        tracing::info!(%key, symbol = self.keys.symbol(key), "key up");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UinputKeyBackend — Linux virtual keyboard (feature = "uinput")
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "uinput")]
pub use uinput::UinputKeyBackend;

#[cfg(feature = "uinput")]
mod uinput {
    use evdev::uinput::VirtualDevice;
    use evdev::{AttributeSet, EventType, InputEvent, KeyCode};

    use racer_control::{DriveKey, KeyBackend, KeyError};

    use crate::config::MovementKeys;

    /// Virtual keyboard holding the four driving keys.
    pub struct UinputKeyBackend {
        device: VirtualDevice,
        codes:  [KeyCode; 4],
    }

    impl UinputKeyBackend {
        pub fn open(keys: &MovementKeys) -> Result<Self, KeyError> {
            let mut codes = [KeyCode::KEY_RESERVED; 4];
            let mut set = AttributeSet::<KeyCode>::new();
            for (slot, key) in codes.iter_mut().zip(DriveKey::ALL) {
                let symbol = keys.symbol(key);
                *slot = key_code(symbol)
                    .ok_or_else(|| KeyError::Rejected(format!("no key code for symbol {:?}", symbol)))?;
                set.insert(*slot);
            }

            let device = VirtualDevice::builder()
                .map_err(|e| KeyError::Unavailable(format!("uinput builder: {}", e)))?
                .name("gesture_racer virtual keyboard")
                .with_keys(&set)
                .map_err(|e| KeyError::Unavailable(format!("uinput keys: {}", e)))?
                .build()
                .map_err(|e| KeyError::Unavailable(format!("uinput device: {}", e)))?;

            Ok(UinputKeyBackend { device, codes })
        }

        fn send(&mut self, key: DriveKey, value: i32, action: &'static str) -> Result<(), KeyError> {
            let code = self.codes[key as usize];
            self.device
                .emit(&[InputEvent::new(EventType::KEY.0, code.0, value)])
                .map_err(|source| KeyError::Io { action, key, source })
        }
    }

    impl KeyBackend for UinputKeyBackend {
        fn press(&mut self, key: DriveKey) -> Result<(), KeyError> {
            self.send(key, 1, "press")
        }

        fn release(&mut self, key: DriveKey) -> Result<(), KeyError> {
            self.send(key, 0, "release")
        }
    }

    /// Key code for a symbol: a letter, a digit, an arrow name or `space`.
    pub fn key_code(symbol: &str) -> Option<KeyCode> {
        let code = match symbol.trim().to_ascii_lowercase().as_str() {
            "a" => KeyCode::KEY_A, "b" => KeyCode::KEY_B, "c" => KeyCode::KEY_C,
            "d" => KeyCode::KEY_D, "e" => KeyCode::KEY_E, "f" => KeyCode::KEY_F,
            "g" => KeyCode::KEY_G, "h" => KeyCode::KEY_H, "i" => KeyCode::KEY_I,
            "j" => KeyCode::KEY_J, "k" => KeyCode::KEY_K, "l" => KeyCode::KEY_L,
            "m" => KeyCode::KEY_M, "n" => KeyCode::KEY_N, "o" => KeyCode::KEY_O,
            "p" => KeyCode::KEY_P, "q" => KeyCode::KEY_Q, "r" => KeyCode::KEY_R,
            "s" => KeyCode::KEY_S, "t" => KeyCode::KEY_T, "u" => KeyCode::KEY_U,
            "v" => KeyCode::KEY_V, "w" => KeyCode::KEY_W, "x" => KeyCode::KEY_X,
            "y" => KeyCode::KEY_Y, "z" => KeyCode::KEY_Z,
            "0" => KeyCode::KEY_0, "1" => KeyCode::KEY_1, "2" => KeyCode::KEY_2,
            "3" => KeyCode::KEY_3, "4" => KeyCode::KEY_4, "5" => KeyCode::KEY_5,
            "6" => KeyCode::KEY_6, "7" => KeyCode::KEY_7, "8" => KeyCode::KEY_8,
            "9" => KeyCode::KEY_9,
            "up"    => KeyCode::KEY_UP,
            "down"  => KeyCode::KEY_DOWN,
            "left"  => KeyCode::KEY_LEFT,
            "right" => KeyCode::KEY_RIGHT,
            "space" => KeyCode::KEY_SPACE,
            _ => return None,
        };
        Some(code)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn symbols_map_to_codes() {
            assert_eq!(key_code("w"), Some(KeyCode::KEY_W));
            assert_eq!(key_code(" Up "), Some(KeyCode::KEY_UP));
            assert_eq!(key_code("f13"), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use racer_control::{KeyStateController, MoveAction, TurnAction};

    #[test]
    fn logging_backend_never_fails() {
        let mut b = LoggingKeyBackend::new(MovementKeys::default());
        for key in DriveKey::ALL {
            assert!(b.press(key).is_ok());
            assert!(b.release(key).is_ok());
        }
    }

    #[test]
    fn log_kind_drives_a_controller() {
        let mut ctl = KeyStateController::new(open_key_backend(KeyBackendKind::Log, &MovementKeys::default()));
        ctl.apply_actions(MoveAction::Forward, TurnAction::Left);
        assert_eq!(ctl.held().len(), 2);
        ctl.release_all();
        assert!(ctl.held().is_empty());
    }

    #[cfg(not(feature = "uinput"))]
    #[test]
    fn uinput_without_feature_falls_back() {
        let mut b = open_key_backend(KeyBackendKind::Uinput, &MovementKeys::default());
        assert!(b.press(DriveKey::Forward).is_ok());
    }
}
