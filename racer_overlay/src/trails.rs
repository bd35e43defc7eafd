//! Per-hand motion trails.

use std::collections::{HashMap, VecDeque};

use racer_control::Handedness;

use crate::draw::Point;

/// Fixed-capacity FIFO of recent positions, oldest first.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points:   VecDeque<Point>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        TrailBuffer { points: VecDeque::new(), capacity }
    }

    /// Append `p`, evicting from the front beyond capacity.
    pub fn push(&mut self, p: Point) {
        self.points.push_back(p);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Consecutive segments, oldest first.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(a, b)| (*a, *b))
    }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }
}

/// One trail per hand label ever observed.
#[derive(Clone, Debug)]
pub struct TrailMap {
    trails:   HashMap<Handedness, TrailBuffer>,
    capacity: usize,
}

impl TrailMap {
    pub fn new(capacity: usize) -> Self {
        TrailMap { trails: HashMap::new(), capacity }
    }

    pub fn record(&mut self, label: Handedness, p: Point) -> &TrailBuffer {
        let capacity = self.capacity;
        let trail = self.trails.entry(label).or_insert_with(|| TrailBuffer::new(capacity));
        trail.push(p);
        trail
    }

    pub fn get(&self, label: Handedness) -> Option<&TrailBuffer> {
        self.trails.get(&label)
    }

    pub fn len(&self) -> usize { self.trails.len() }

    pub fn is_empty(&self) -> bool { self.trails.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_first() {
        let mut t = TrailBuffer::new(3);
        for i in 0..5 {
            t.push((i, 0));
        }
        assert_eq!(t.points().copied().collect::<Vec<_>>(), vec![(2, 0), (3, 0), (4, 0)]);
        assert_eq!(t.segments().count(), 2);
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let mut t = TrailBuffer::new(0);
        t.push((1, 1));
        assert!(t.is_empty());
        assert_eq!(t.segments().count(), 0);
    }

    #[test]
    fn one_trail_per_label() {
        let mut m = TrailMap::new(4);
        m.record(Handedness::Left, (0, 0));
        m.record(Handedness::Left, (1, 0));
        m.record(Handedness::Right, (9, 9));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(Handedness::Left).map(TrailBuffer::len), Some(2));
        assert!(m.get(Handedness::Unknown).is_none());
    }
}
