use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box on a page, in points.
///
/// The origin is the top-left corner of the page and y grows downward, so
/// `min.y` is the top edge and `max.y` the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    /// The top-left corner.
    pub min: glam::Vec2,
    /// The bottom-right corner.
    pub max: glam::Vec2,
}

impl Bbox {
    /// Creates a bounding box from `(x0, y0, x1, y1)` edges.
    ///
    /// # Example
    /// ```
    /// use ferrdocx_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::from_edges(10.0, 20.0, 50.0, 80.0);
    /// assert_eq!(bbox.top(), 20.0);
    /// assert_eq!(bbox.bottom(), 80.0);
    /// ```
    pub fn from_edges(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: glam::Vec2::new(x0, y0),
            max: glam::Vec2::new(x1, y1),
        }
    }

    /// Converts PDF user-space edges (bottom-left origin, y upward) into a
    /// top-left origin bounding box.
    ///
    /// # Transformation
    /// For each edge, `y_page = page_height - y_pdf`, so the PDF `top` edge
    /// becomes the box's `min.y`.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrdocx_core::analysis::bbox::Bbox;
    /// // PDF rect: left 10, bottom 20, right 50, top 80 on a 100pt high page
    /// let bbox = Bbox::from_pdf_edges(10.0, 20.0, 50.0, 80.0, 100.0);
    /// assert_eq!(bbox.min, Vec2::new(10.0, 20.0));
    /// assert_eq!(bbox.max, Vec2::new(50.0, 80.0));
    /// ```
    pub fn from_pdf_edges(left: f32, bottom: f32, right: f32, top: f32, page_height: f32) -> Self {
        Self::from_edges(left, page_height - top, right, page_height - bottom)
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Calculates the center point of the bounding box.
    pub fn center(&self) -> glam::Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Checks whether the vertical extent of this box intersects the
    /// half-open interval `[top, bottom)`.
    ///
    /// # Example
    /// ```
    /// use ferrdocx_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::from_edges(0.0, 10.0, 5.0, 20.0);
    /// assert!(bbox.intersects_y(15.0, 30.0));
    /// assert!(!bbox.intersects_y(20.0, 30.0));
    /// ```
    pub fn intersects_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y < bottom && self.max.y > top
    }

    /// Length of the overlap between this box's vertical extent and
    /// `[top, bottom)`, or 0.0 when they are disjoint.
    pub fn overlap_y(&self, top: f32, bottom: f32) -> f32 {
        (self.max.y.min(bottom) - self.min.y.max(top)).max(0.0)
    }

    /// Creates a union bounding box that encompasses both this bounding box and another.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrdocx_core::analysis::bbox::Bbox;
    ///
    /// let bbox1 = Bbox::from_edges(0.0, 0.0, 5.0, 5.0);
    /// let bbox2 = Bbox::from_edges(3.0, 3.0, 8.0, 8.0);
    /// let union = bbox1.union(&bbox2);
    ///
    /// assert_eq!(union.min, Vec2::new(0.0, 0.0));
    /// assert_eq!(union.max, Vec2::new(8.0, 8.0));
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Ratio of vertical overlap between two boxes to the shorter height.
    ///
    /// Used to decide whether two text spans sit on the same line. Returns
    /// 0.0 when either box has no height.
    pub fn vertical_overlap_ratio(&self, other: &Self) -> f32 {
        let overlap = self.overlap_y(other.min.y, other.max.y);
        let min_height = self.height().min(other.height());

        if min_height > 0.0 {
            overlap / min_height
        } else {
            0.0
        }
    }

    /// Checks whether the horizontal extents of two boxes overlap.
    pub fn overlaps_x(&self, other: &Self) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}
