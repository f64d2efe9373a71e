use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// A rectangle in pixel coordinates, stored as its four edges.
///
/// `right >= left` and `bottom >= top` for every rectangle that is
/// used as a resize target. Zero-area rectangles may appear while
/// doing intermediate math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Per-edge inset amounts between what the OS reports for a window
/// and the edge the user actually sees.
///
/// Values may be negative when a window draws outside its reported
/// bounds (shadows, bleed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }

    /// Grows the rectangle outward by `padding` on each edge.
    pub fn enlarge(&self, padding: &Padding) -> Rect {
        Rect {
            left: self.left - padding.left,
            top: self.top - padding.top,
            right: self.right + padding.right,
            bottom: self.bottom + padding.bottom,
        }
    }

    /// Pulls each edge inward by `padding`. Inverse of [`Rect::enlarge`].
    pub fn shrink(&self, padding: &Padding) -> Rect {
        self.enlarge(&-*padding)
    }

    /// Translates the rectangle into a coordinate space whose origin is
    /// `origin`.
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect {
            left: self.left - origin.x,
            top: self.top - origin.y,
            right: self.right - origin.x,
            bottom: self.bottom - origin.y,
        }
    }

    /// Euclidean distance between the edge vectors of two rectangles.
    ///
    /// Every edge mismatch counts, so a window of a different size
    /// sharing a corner with `other` is still far from it.
    pub fn distance(&self, other: &Rect) -> f64 {
        let squared: i64 = [
            self.top - other.top,
            self.bottom - other.bottom,
            self.left - other.left,
            self.right - other.right,
        ]
        .iter()
        .map(|d| i64::from(*d) * i64::from(*d))
        .sum();

        (squared as f64).sqrt()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(left: {}, top: {}, right: {}, bottom: {}, {}x{})",
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.width(),
            self.height()
        )
    }
}

impl Padding {
    pub const ZERO: Padding = Padding::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns `true` if every edge is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Adds `amount` to every edge.
    pub fn grow(&self, amount: i32) -> Padding {
        Padding {
            left: self.left + amount,
            top: self.top + amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }

    /// Computes the padding between a window's reported bounds (`outer`)
    /// and its visible bounds (`inner`).
    pub fn between(outer: &Rect, inner: &Rect) -> Padding {
        Padding {
            left: inner.left - outer.left,
            top: inner.top - outer.top,
            right: outer.right - inner.right,
            bottom: outer.bottom - inner.bottom,
        }
    }
}

impl Neg for Padding {
    type Output = Padding;

    fn neg(self) -> Padding {
        Padding {
            left: -self.left,
            top: -self.top,
            right: -self.right,
            bottom: -self.bottom,
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(L:{} T:{} R:{} B:{})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Rect; 4] = [
        Rect::new(0, 0, 1920, 1080),
        Rect::new(-7, 0, 967, 1047),
        Rect::new(100, 200, 100, 200),
        Rect::new(-3000, -20, -1000, 400),
    ];

    const PADDINGS: [Padding; 4] = [
        Padding::ZERO,
        Padding::new(8, 1, 8, 8),
        Padding::new(-4, -4, -4, -4),
        Padding::new(0, 31, -2, 5),
    ];

    #[test]
    fn shrink_undoes_enlarge() {
        for rect in SAMPLES {
            for padding in PADDINGS {
                assert_eq!(rect.enlarge(&padding).shrink(&padding), rect);
                assert_eq!(rect.shrink(&padding).enlarge(&padding), rect);
            }
        }
    }

    #[test]
    fn enlarge_moves_each_edge_outward() {
        // Arrange
        let rect = Rect::new(100, 100, 200, 200);

        // Act
        let result = rect.enlarge(&Padding::new(1, 2, 3, 4));

        // Assert
        assert_eq!(result, Rect::new(99, 98, 203, 204));
    }

    #[test]
    fn relative_to_subtracts_origin_from_both_edge_pairs() {
        // Arrange
        let rect = Rect::new(500, 40, 1000, 840);

        // Act
        let result = rect.relative_to(Point { x: 0, y: 40 });

        // Assert
        assert_eq!(result, Rect::new(500, 0, 1000, 800));
    }

    #[test]
    fn distance_to_self_is_zero() {
        for rect in SAMPLES {
            assert_eq!(rect.distance(&rect), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(a.distance(&b), b.distance(&a));
            }
        }
    }

    #[test]
    fn distance_penalizes_size_difference_at_same_corner() {
        // Arrange: same top-left corner, different size
        let a = Rect::new(0, 0, 500, 800);
        let b = Rect::new(0, 0, 503, 804);

        // Act / Assert
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn padding_between_reported_and_visible_bounds() {
        // Arrange: typical Windows 10 invisible resize borders
        let reported = Rect::new(-7, 0, 967, 1047);
        let visible = Rect::new(0, 0, 960, 1040);

        // Act
        let padding = Padding::between(&reported, &visible);

        // Assert
        assert_eq!(padding, Padding::new(7, 0, 7, 7));
    }
}
