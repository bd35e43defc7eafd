//! Held-key bookkeeping for the four driving keys.
//!
//! [`KeyStateController`] reconciles the set of held keys with the keys a
//! `(move, turn)` action wants, releasing before pressing. Backend failures
//! are logged and otherwise ignored: the held set is updated as if the call
//! went through, and the next frame's reconciliation repairs any drift.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::decision::{MoveAction, TurnAction};

// ════════════════════════════════════════════════════════════════════════════
// DriveKey
// ════════════════════════════════════════════════════════════════════════════

/// Logical driving key. Backends map these onto concrete symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DriveKey {
    Forward,
    Left,
    Back,
    Right,
}

impl DriveKey {
    pub const ALL: [DriveKey; 4] = [DriveKey::Forward, DriveKey::Left, DriveKey::Back, DriveKey::Right];
}

impl fmt::Display for DriveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriveKey::Forward => "forward",
            DriveKey::Left    => "left",
            DriveKey::Back    => "back",
            DriveKey::Right   => "right",
        })
    }
}

pub type KeySet = BTreeSet<DriveKey>;

/// Keys wanted by an action. Never contains both Forward and Back, nor both
/// Left and Right.
pub fn desired_keys(movement: MoveAction, turn: TurnAction) -> KeySet {
    let mut keys = KeySet::new();
    match movement {
        MoveAction::Forward                      => { keys.insert(DriveKey::Forward); }
        MoveAction::Brake | MoveAction::Reverse  => { keys.insert(DriveKey::Back); }
        MoveAction::Stop                         => {}
    }
    match turn {
        TurnAction::Left     => { keys.insert(DriveKey::Left); }
        TurnAction::Right    => { keys.insert(DriveKey::Right); }
        TurnAction::Straight => {}
    }
    keys
}

// ════════════════════════════════════════════════════════════════════════════
// KeyBackend
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("key backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to {action} {key} key: {source}")]
    Io {
        action: &'static str,
        key:    DriveKey,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Rejected(String),
}

/// Something that can hold driving keys down: OS key injection, a virtual
/// input device, a log.
pub trait KeyBackend {
    fn press(&mut self, key: DriveKey) -> Result<(), KeyError>;
    fn release(&mut self, key: DriveKey) -> Result<(), KeyError>;
}

impl<B: KeyBackend + ?Sized> KeyBackend for Box<B> {
    fn press(&mut self, key: DriveKey) -> Result<(), KeyError> {
        (**self).press(key)
    }
    fn release(&mut self, key: DriveKey) -> Result<(), KeyError> {
        (**self).release(key)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyStateController
// ════════════════════════════════════════════════════════════════════════════

/// Owns the held-key set and the backend that realises it.
///
/// Dropping the controller releases every held key.
pub struct KeyStateController<B: KeyBackend> {
    backend: B,
    held:    KeySet,
}

impl<B: KeyBackend> KeyStateController<B> {
    pub fn new(backend: B) -> Self {
        KeyStateController { backend, held: KeySet::new() }
    }

    /// Reconcile held keys with `(movement, turn)`: release stale keys, then
    /// press missing ones.
    pub fn apply_actions(&mut self, movement: MoveAction, turn: TurnAction) {
        let desired = desired_keys(movement, turn);

        let stale: Vec<DriveKey> = self.held.difference(&desired).copied().collect();
        for key in stale {
            self.release_key(key);
            self.held.remove(&key);
        }

        for key in desired {
            if self.held.insert(key) {
                self.press_key(key);
            }
        }
    }

    /// Release every held key and clear the set. Idempotent.
    pub fn release_all(&mut self) {
        let held = std::mem::take(&mut self.held);
        if !held.is_empty() {
            tracing::debug!(count = held.len(), "releasing all held keys");
        }
        for key in held {
            self.release_key(key);
        }
    }

    pub fn held(&self) -> &KeySet { &self.held }

    pub fn is_held(&self, key: DriveKey) -> bool { self.held.contains(&key) }

    fn press_key(&mut self, key: DriveKey) {
        tracing::debug!(%key, "press");
        if let Err(e) = self.backend.press(key) {
            tracing::warn!(%key, error = %e, "key press failed; continuing");
        }
    }

    fn release_key(&mut self, key: DriveKey) {
        tracing::debug!(%key, "release");
        if let Err(e) = self.backend.release(key) {
            tracing::warn!(%key, error = %e, "key release failed; continuing");
        }
    }
}

impl<B: KeyBackend> Drop for KeyStateController<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
