use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in absolute pixel coordinates.
///
/// Width and height are non-negative by convention; detection backends and
/// the clusterizer only ever produce rectangles with `width >= 0` and
/// `height >= 0`, possibly zero-area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Bounding box of a group of rectangles: min x/y, max right/bottom.
    ///
    /// Returns `None` for an empty group.
    pub fn union_of(rects: &[Rect]) -> Option<Rect> {
        let first = rects.first()?;
        let mut x1 = first.x;
        let mut y1 = first.y;
        let mut x2 = first.right();
        let mut y2 = first.bottom();
        for r in &rects[1..] {
            x1 = x1.min(r.x);
            y1 = y1.min(r.y);
            x2 = x2.max(r.right());
            y2 = y2.max(r.bottom());
        }
        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }
}
