//! Hand trackers: LeapMotion hardware and keyboard simulation.
//!
//! The public interface is [`HandTracker::detect`], called once per frame.
//! The driver doesn't need to know whether the hands came from real hardware
//! or from arrow keys.

use racer_control::{HandLandmarks, HandObservation, Handedness, Landmark};

use crate::config::AppConfig;
use crate::error::TrackerError;

// ════════════════════════════════════════════════════════════════════════════
// HandTracker trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can report this frame's hands.
pub trait HandTracker {
    /// Hands visible this frame, at most `max_num_hands`. An empty result is
    /// "no hands", not an error; `Err` means the source is gone.
    fn detect(&mut self) -> Result<Vec<HandObservation>, TrackerError>;

    /// Keyboard input from the window. Only the simulator listens.
    fn handle_input(&mut self, _input: SimInput) {}

    fn name(&self) -> &'static str;
}

/// Which tracker to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TrackerKind {
    /// Keyboard-driven synthetic hands.
    Sim,
    /// LeapMotion controller (needs the `leap` feature).
    Leap,
}

pub fn open_tracker(kind: TrackerKind, cfg: &AppConfig) -> Result<Box<dyn HandTracker>, TrackerError> {
    let tracker: Box<dyn HandTracker> = match kind {
        TrackerKind::Sim => Box::new(SimTracker::new(cfg)),
        #[cfg(feature = "leap")]
        TrackerKind::Leap => Box::new(LeapTracker::open(cfg)?),
        #[cfg(not(feature = "leap"))]
        TrackerKind::Leap => {
            return Err(TrackerError::Unavailable(
                "built without the `leap` feature (rebuild with --features leap)".into(),
            ))
        }
    };
    tracing::info!(tracker = tracker.name(), "hand tracker ready");
    Ok(tracker)
}

// ════════════════════════════════════════════════════════════════════════════
// SimTracker — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
    KeyUp(SimKey),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    CycleHands,  // N
    Wider,       // Up
    Narrower,    // Down
    TiltLeft,    // Left
    TiltRight,   // Right
    Pinch,       // Space (held)
}

const SPREAD_STEP: i32 = 20;
const TILT_STEP:   i32 = 10;
const MIN_SPREAD:  i32 = 20;
/// Thumb-to-index gap of an open hand, in pixels.
const OPEN_GAP:    (i32, i32) = (60, -20);
const PINCH_GAP:   (i32, i32) = (6, 0);

/// Two synthetic hands centred in the frame.
///
/// `spread` is the horizontal distance between the wrists and `tilt` the
/// vertical drop of the right hand relative to the left, so tilting right
/// lowers the right hand and steers right.
#[derive(Clone, Debug)]
pub struct SimTracker {
    width:      i32,
    height:     i32,
    max_hands:  usize,
    hand_count: usize,
    spread:     i32,
    tilt:       i32,
    pinch:      bool,
}

impl SimTracker {
    pub fn new(cfg: &AppConfig) -> Self {
        let max_hands = cfg.max_num_hands.min(2);
        SimTracker {
            width:      cfg.frame_width as i32,
            height:     cfg.frame_height as i32,
            max_hands,
            hand_count: max_hands,
            spread:     (cfg.frame_width as i32 / 3).max(MIN_SPREAD),
            tilt:       0,
            pinch:      false,
        }
    }

    pub fn hand_count(&self) -> usize { self.hand_count }

    pub fn spread(&self) -> i32 { self.spread }

    pub fn tilt(&self) -> i32 { self.tilt }

    fn max_spread(&self) -> i32 {
        (self.width - 40).max(MIN_SPREAD)
    }

    fn hand(&self, label: Handedness, x: i32, y: i32) -> HandObservation {
        let gap = if self.pinch { PINCH_GAP } else { OPEN_GAP };
        let thumb = (x, y - 40);
        let index = (thumb.0 + gap.0, thumb.1 + gap.1);

        let norm = |(px, py): (i32, i32)| {
            Landmark::new(px as f32 / self.width as f32, py as f32 / self.height as f32)
        };
        let mut lm = HandLandmarks::filled(norm((x, y)));
        lm.set(HandLandmarks::THUMB_TIP, norm(thumb));
        lm.set(HandLandmarks::INDEX_FINGER_TIP, norm(index));
        HandObservation::new(x, y, label).with_landmarks(lm)
    }
}

impl HandTracker for SimTracker {
    fn detect(&mut self) -> Result<Vec<HandObservation>, TrackerError> {
        let (cx, cy) = (self.width / 2, self.height / 2);
        let half = self.spread / 2;
        let left = self.hand(Handedness::Left, cx - half, cy - self.tilt / 2);
        let right = self.hand(Handedness::Right, cx + half, cy + self.tilt / 2);
        Ok(match self.hand_count.min(self.max_hands) {
            0 => Vec::new(),
            1 => vec![right],
            _ => vec![left, right],
        })
    }

    fn handle_input(&mut self, input: SimInput) {
        match input {
            SimInput::KeyDown(SimKey::CycleHands) => {
                self.hand_count = (self.hand_count + 1) % (self.max_hands + 1);
                tracing::info!(hands = self.hand_count, "sim hand count");
            }
            SimInput::KeyDown(SimKey::Wider) => {
                self.spread = (self.spread + SPREAD_STEP).min(self.max_spread());
            }
            SimInput::KeyDown(SimKey::Narrower) => {
                self.spread = (self.spread - SPREAD_STEP).max(MIN_SPREAD);
            }
            SimInput::KeyDown(SimKey::TiltRight) => {
                self.tilt = (self.tilt + TILT_STEP).min(self.height / 2);
            }
            SimInput::KeyDown(SimKey::TiltLeft) => {
                self.tilt = (self.tilt - TILT_STEP).max(-self.height / 2);
            }
            SimInput::KeyDown(SimKey::Pinch) => self.pinch = true,
            SimInput::KeyUp(SimKey::Pinch)   => self.pinch = false,
            SimInput::KeyUp(_) => {}
        }
    }

    fn name(&self) -> &'static str { "sim" }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameWatchdog — staleness of a polled frame source
// ════════════════════════════════════════════════════════════════════════════

/// Counts polls without a tracking frame and consecutive poll failures.
///
/// A source that stays quiet for [`FrameWatchdog::STALE_AFTER`] polls has
/// its last hands dropped; one that fails [`FrameWatchdog::LOST_AFTER`]
/// polls with no frame in between is treated as disconnected.
#[cfg_attr(not(feature = "leap"), allow(dead_code))]
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameWatchdog {
    misses: u32,
    errors: u32,
}

#[cfg_attr(not(feature = "leap"), allow(dead_code))]
impl FrameWatchdog {
    pub(crate) const STALE_AFTER: u32 = 15;
    pub(crate) const LOST_AFTER:  u32 = 50;

    /// A tracking frame arrived.
    pub(crate) fn frame(&mut self) {
        self.misses = 0;
        self.errors = 0;
    }

    /// A poll with no frame. Returns true once the last frame is stale.
    pub(crate) fn miss(&mut self) -> bool {
        self.misses = self.misses.saturating_add(1);
        self.misses >= Self::STALE_AFTER
    }

    /// A failed poll. Returns true once the source counts as lost.
    pub(crate) fn error(&mut self) -> bool {
        self.errors = self.errors.saturating_add(1);
        self.errors >= Self::LOST_AFTER
    }

    pub(crate) fn misses(&self) -> u32 { self.misses }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapTracker — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand tracker backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// # Mapping
///
/// Palm and fingertip positions (millimetres above the device) are mapped
/// into the frame: x across `±LEAP_HALF_SPAN_MM`, height from
/// `LEAP_MIN_HEIGHT_MM` up by `2·LEAP_HALF_SPAN_MM`, higher hands nearer
/// the top. Leap coordinates already look like a mirror view, so x is only
/// flipped when `frame_flip` is off.
#[cfg(feature = "leap")]
pub struct LeapTracker {
    connection: leaprs::Connection,
    width:      u32,
    height:     u32,
    mirror:     bool,
    max_hands:  usize,
    /// Last tracking frame; reused while the device is between frames.
    last:       Vec<HandObservation>,
    watchdog:   FrameWatchdog,
}

#[cfg(feature = "leap")]
const LEAP_HALF_SPAN_MM:  f32 = 200.0;
#[cfg(feature = "leap")]
const LEAP_MIN_HEIGHT_MM: f32 = 100.0;

#[cfg(feature = "leap")]
impl LeapTracker {
    pub fn open(cfg: &AppConfig) -> Result<Self, TrackerError> {
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| TrackerError::Unavailable(format!("LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| TrackerError::Unavailable(format!("LeapMotion device: {:?}", e)))?;

        Ok(LeapTracker {
            connection,
            width:     cfg.frame_width,
            height:    cfg.frame_height,
            mirror:    !cfg.frame_flip,
            max_hands: cfg.max_num_hands,
            last:      Vec::new(),
            watchdog:  FrameWatchdog::default(),
        })
    }

    /// A poll that brought no tracking frame. Held hands expire once the
    /// watchdog calls the frame stale.
    fn missed(&mut self) -> Vec<HandObservation> {
        if self.watchdog.miss() && !self.last.is_empty() {
            tracing::warn!(polls = self.watchdog.misses(), "no tracking frames; dropping held hands");
            self.last.clear();
        }
        self.last.clone()
    }
}

#[cfg(feature = "leap")]
fn leap_to_frame(mirror: bool, x_mm: f32, y_mm: f32) -> Landmark {
    let span = 2.0 * LEAP_HALF_SPAN_MM;
    let mut nx = ((x_mm + LEAP_HALF_SPAN_MM) / span).clamp(0.0, 1.0);
    if mirror {
        nx = 1.0 - nx;
    }
    let ny = (1.0 - (y_mm - LEAP_MIN_HEIGHT_MM) / span).clamp(0.0, 1.0);
    Landmark::new(nx, ny)
}

/// Outcome of one LeapC poll, detached from the connection borrow.
#[cfg(feature = "leap")]
enum LeapPoll {
    Frame(Vec<HandObservation>),
    Miss,
    Failed(String),
    Lost(&'static str),
}

#[cfg(feature = "leap")]
impl HandTracker for LeapTracker {
    fn detect(&mut self) -> Result<Vec<HandObservation>, TrackerError> {
        use leaprs::*;

        let (width, height, mirror, max_hands) = (self.width, self.height, self.mirror, self.max_hands);
        let polled = match self.connection.poll(10) {
            Err(leaprs::Error::Timeout) => LeapPoll::Miss,
            Err(e) => LeapPoll::Failed(format!("{:?}", e)),
            Ok(msg) => {
                let event = msg.event();
                match event {
                    Event::ConnectionLost(_) => LeapPoll::Lost("LeapC service connection lost"),
                    Event::DeviceLost(_)     => LeapPoll::Lost("LeapMotion device unplugged"),
                    Event::Tracking(frame) => {
                        let mut hands = Vec::new();
                        for hand in frame.hands().take(max_hands) {
                            let palm = hand.palm().position();
                            let wrist = leap_to_frame(mirror, palm.x, palm.y);
                            let mut lm = HandLandmarks::filled(wrist);

                            let digits: Vec<_> = hand.digits().collect();
                            if digits.len() >= 2 {
                                let thumb = digits[0].distal().next_joint();
                                let index = digits[1].distal().next_joint();
                                lm.set(HandLandmarks::THUMB_TIP, leap_to_frame(mirror, thumb.x, thumb.y));
                                lm.set(HandLandmarks::INDEX_FINGER_TIP, leap_to_frame(mirror, index.x, index.y));
                            }

                            let label = if hand.hand_type() == HandType::Left {
                                Handedness::Left
                            } else {
                                Handedness::Right
                            };
                            let (x, y) = wrist.to_px(width, height);
                            hands.push(HandObservation::new(x, y, label).with_landmarks(lm));
                        }
                        LeapPoll::Frame(hands)
                    }
                    _ => LeapPoll::Miss,
                }
            }
        };

        match polled {
            LeapPoll::Frame(hands) => {
                self.watchdog.frame();
                self.last = hands;
                Ok(self.last.clone())
            }
            LeapPoll::Miss => Ok(self.missed()),
            LeapPoll::Failed(e) => {
                if self.watchdog.error() {
                    return Err(TrackerError::Disconnected(format!("LeapC poll keeps failing: {}", e)));
                }
                Ok(self.missed())
            }
            LeapPoll::Lost(why) => {
                self.last.clear();
                Err(TrackerError::Disconnected(why.into()))
            }
        }
    }

    fn name(&self) -> &'static str { "leap" }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
