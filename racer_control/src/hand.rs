//! Normalised hand observations as delivered by a tracker each frame.

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

/// Which hand a tracker believes it is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Handedness {
    Left,
    Right,
    Unknown,
}

impl Handedness {
    /// Parse a tracker label. Anything other than `Left`/`Right`
    /// (case-insensitive) is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("left") {
            Handedness::Left
        } else if label.eq_ignore_ascii_case("right") {
            Handedness::Right
        } else {
            Handedness::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left    => "Left",
            Handedness::Right   => "Right",
            Handedness::Unknown => "Unknown",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmarks
// ════════════════════════════════════════════════════════════════════════════

/// One landmark point, normalised to `[0, 1]` in frame space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }

    /// Truncating conversion to integer pixel coordinates.
    pub fn to_px(&self, frame_width: u32, frame_height: u32) -> (i32, i32) {
        (
            (self.x * frame_width as f32) as i32,
            (self.y * frame_height as f32) as i32,
        )
    }
}

/// Indexable landmark set following the 21-point hand model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Landmark>,
}

impl HandLandmarks {
    pub const COUNT:            usize = 21;
    pub const THUMB_TIP:        usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;

    pub fn new(points: Vec<Landmark>) -> Self {
        HandLandmarks { points }
    }

    /// A full 21-point set with every point at `fill`.
    pub fn filled(fill: Landmark) -> Self {
        HandLandmarks { points: vec![fill; Self::COUNT] }
    }

    pub fn get(&self, idx: usize) -> Option<Landmark> {
        self.points.get(idx).copied()
    }

    /// Overwrite point `idx`; ignored when out of range.
    pub fn set(&mut self, idx: usize, lm: Landmark) {
        if let Some(p) = self.points.get_mut(idx) {
            *p = lm;
        }
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

/// A single tracked hand for one frame.
///
/// `position` is the wrist in frame pixels. `landmarks` is `None` when the
/// tracker could not (or does not) provide finger points.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub position:  (i32, i32),
    pub label:     Handedness,
    pub landmarks: Option<HandLandmarks>,
}

impl HandObservation {
    pub fn new(x: i32, y: i32, label: Handedness) -> Self {
        HandObservation { position: (x, y), label, landmarks: None }
    }

    pub fn with_landmarks(mut self, landmarks: HandLandmarks) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    pub fn x(&self) -> i32 { self.position.0 }
    pub fn y(&self) -> i32 { self.position.1 }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_parsing() {
        assert_eq!(Handedness::from_label("Left"),  Handedness::Left);
        assert_eq!(Handedness::from_label("RIGHT"), Handedness::Right);
        assert_eq!(Handedness::from_label(""),      Handedness::Unknown);
        assert_eq!(Handedness::from_label("both"),  Handedness::Unknown);
    }

    #[test]
    fn landmark_to_px_truncates() {
        let lm = Landmark::new(0.5, 0.2599);
        assert_eq!(lm.to_px(640, 480), (320, 124));
    }

    #[test]
    fn landmarks_set_out_of_range_is_ignored() {
        let mut lms = HandLandmarks::filled(Landmark::new(0.1, 0.1));
        lms.set(99, Landmark::new(0.9, 0.9));
        assert_eq!(lms.len(), HandLandmarks::COUNT);
        assert_eq!(lms.get(99), None);
        lms.set(HandLandmarks::THUMB_TIP, Landmark::new(0.9, 0.9));
        assert_eq!(lms.get(4), Some(Landmark::new(0.9, 0.9)));
    }
}
