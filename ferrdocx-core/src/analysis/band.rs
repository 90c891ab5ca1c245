use serde::Serialize;

use super::bbox::Bbox;

/// The vertical slice `[top, bottom)` of a page claimed by one row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Band {
    pub top: f32,
    pub bottom: f32,
}

impl Band {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom
    }

    /// Same band with its bottom pushed down by `extra`.
    pub fn extended(&self, extra: f32) -> Self {
        Self {
            top: self.top,
            bottom: self.bottom + extra,
        }
    }

    pub fn intersects(&self, bbox: &Bbox) -> bool {
        bbox.intersects_y(self.top, self.bottom)
    }

    pub fn overlap(&self, bbox: &Bbox) -> f32 {
        bbox.overlap_y(self.top, self.bottom)
    }
}

/// Computes one band per image, `images` being sorted by top edge.
///
/// Neighbouring bands meet at the midpoint between one image's bottom and
/// the next image's top. The first band opens `top_margin` above its image,
/// the last one closes `bottom_margin` below the page. Boundaries never move
/// back up the page, so overlapping images yield empty bands rather than
/// inverted ones.
pub fn compute_bands(
    images: &[Bbox],
    page_height: f32,
    top_margin: f32,
    bottom_margin: f32,
) -> Vec<Band> {
    let mut bands = Vec::with_capacity(images.len());
    let mut prev_bottom = f32::NEG_INFINITY;

    for (idx, bbox) in images.iter().enumerate() {
        let top = match idx.checked_sub(1).map(|prev| &images[prev]) {
            Some(prev) => (prev.bottom() + bbox.top()) / 2.0,
            None => bbox.top() - top_margin,
        };
        let bottom = match images.get(idx + 1) {
            Some(next) => (bbox.bottom() + next.top()) / 2.0,
            None => page_height + bottom_margin,
        };

        let top = top.max(prev_bottom);
        let bottom = bottom.max(top);
        prev_bottom = bottom;

        bands.push(Band::new(top, bottom));
    }

    bands
}
