//! Draw primitives produced by the overlay and consumed by the rasteriser.

use crate::theme::Rgb;

pub type Point = (i32, i32);

/// Paint order, back to front. Commands in a [`DrawList`] never go back to
/// an earlier layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Panels,
    Wheel,
    Particles,
    Hands,
    Reticle,
    Text,
}

/// One primitive. `alpha` is the blend weight over what is already drawn
/// (1.0 = opaque). A `thickness` of 0 on circles and rectangles means filled.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Fill      { color: Rgb },
    Grid      { spacing: u32, color: Rgb, alpha: f32 },
    HexGrid   { cell: u32, offset: Point, color: Rgb, alpha: f32 },
    Scanlines { spacing: u32, color: Rgb, alpha: f32 },
    Rect      { x: i32, y: i32, w: i32, h: i32, color: Rgb, thickness: u32, alpha: f32 },
    /// Rounded "chip" with semicircular ends.
    Pill      { x: i32, y: i32, w: i32, h: i32, color: Rgb, alpha: f32 },
    Line      { from: Point, to: Point, color: Rgb, thickness: u32, alpha: f32 },
    Circle    { center: Point, radius: i32, color: Rgb, thickness: u32, alpha: f32 },
    /// Arc from `start_deg` to `end_deg`, clockwise in screen coordinates.
    Arc       { center: Point, radius: i32, start_deg: f32, end_deg: f32, color: Rgb, alpha: f32 },
    /// `pos` is the top-left corner of the first glyph.
    Text      { pos: Point, text: String, color: Rgb, scale: u32 },
}

/// Ordered draw commands for one frame.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    items: Vec<(Layer, DrawCmd)>,
}

impl DrawList {
    pub fn new() -> Self {
        DrawList::default()
    }

    pub fn push(&mut self, layer: Layer, cmd: DrawCmd) {
        debug_assert!(
            self.items.last().map_or(true, |(l, _)| *l <= layer),
            "layer {:?} pushed after a later layer",
            layer
        );
        self.items.push((layer, cmd));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Layer, DrawCmd)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Commands drawn on `layer`.
    pub fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCmd> {
        self.items.iter().filter(move |(l, _)| *l == layer).map(|(_, c)| c)
    }

    /// Every text string in the list, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True when layers never decrease along the list.
    pub fn is_back_to_front(&self) -> bool {
        self.items.windows(2).all(|w| w[0].0 <= w[1].0)
    }
}
