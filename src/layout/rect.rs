//! Rect: A floating-point rectangle primitive for layout calculations.

/// A rectangle defined by position and size, in container points.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle covering a whole container.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Zero-sized rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Get the area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` lies entirely within this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this rectangle intersects with another.
    ///
    /// Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Shrink the rectangle by `margin` on every side.
    ///
    /// An axis too small for two margins collapses to zero length at its centre.
    #[inline]
    #[must_use]
    pub fn inset(&self, margin: f64) -> Self {
        let (x, width) = inset_axis(self.x, self.width, margin);
        let (y, height) = inset_axis(self.y, self.height, margin);
        Self::new(x, y, width, height)
    }

    /// Swap the x/y axes.
    #[inline]
    #[must_use]
    pub const fn transpose(&self) -> Self {
        Self::new(self.y, self.x, self.height, self.width)
    }

    /// Split into `count` equal horizontal bands, top to bottom.
    pub fn split_rows(&self, count: usize) -> impl Iterator<Item = Self> + '_ {
        let band = self.height / count as f64;
        (0..count).map(move |i| Self::new(self.x, self.y + band * i as f64, self.width, band))
    }

    /// Split into `count` equal vertical bands, left to right.
    pub fn split_columns(&self, count: usize) -> impl Iterator<Item = Self> + '_ {
        let band = self.width / count as f64;
        (0..count).map(move |i| Self::new(self.x + band * i as f64, self.y, band, self.height))
    }
}

fn inset_axis(origin: f64, length: f64, margin: f64) -> (f64, f64) {
    let shrunk = length - margin * 2.0;
    if shrunk > 0.0 {
        (origin + margin, shrunk)
    } else {
        (origin + length / 2.0, 0.0)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
