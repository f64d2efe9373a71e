//! The zone catalog and the nearest-rectangle search.
//!
//! Every [`Zone`] maps to a fixed, ordered list of [`ProportionalRect`]s.
//! The order is the cycle a repeated hotkey press walks through: the
//! half-screen variant first, then thirds, then quarters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::rect::Rect;

const THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// A rectangle expressed as fractions of the working area.
///
/// Stored as origin plus extent, so `right = x + width` and
/// `bottom = y + height`. All values lie in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ProportionalRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Converts to absolute screen coordinates inside `area`.
    ///
    /// Each edge is truncated toward zero before the area's origin is
    /// added, so adjacent zones share edges exactly.
    pub fn to_absolute(&self, area: &Rect) -> Rect {
        let width = f64::from(area.width());
        let height = f64::from(area.height());

        Rect::new(
            (width * self.x) as i32 + area.left,
            (height * self.y) as i32 + area.top,
            (width * self.right()) as i32 + area.left,
            (height * self.bottom()) as i32 + area.top,
        )
    }
}

/// A named region of the working area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Right,
    Left,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    /// The full working area, used to "maximize" an already maximized
    /// window without the OS maximized state.
    FakeMaximized,
}

static RIGHT: [ProportionalRect; 6] = [
    ProportionalRect::new(0.5, 0.0, 0.5, 1.0),
    ProportionalRect::new(THIRD, 0.0, TWO_THIRDS, 1.0),
    ProportionalRect::new(TWO_THIRDS, 0.0, THIRD, 1.0),
    ProportionalRect::new(0.75, 0.0, 0.25, 1.0),
    ProportionalRect::new(0.5, 0.0, 0.25, 1.0),
    ProportionalRect::new(0.25, 0.0, 0.75, 1.0),
];

static LEFT: [ProportionalRect; 6] = [
    ProportionalRect::new(0.0, 0.0, 0.5, 1.0),
    ProportionalRect::new(0.0, 0.0, TWO_THIRDS, 1.0),
    ProportionalRect::new(0.0, 0.0, THIRD, 1.0),
    ProportionalRect::new(0.0, 0.0, 0.25, 1.0),
    ProportionalRect::new(0.25, 0.0, 0.25, 1.0),
    ProportionalRect::new(0.0, 0.0, 0.75, 1.0),
];

static TOP: [ProportionalRect; 2] = [
    ProportionalRect::new(0.0, 0.0, 1.0, 0.5),
    ProportionalRect::new(THIRD, 0.0, THIRD, 0.5),
];

static BOTTOM: [ProportionalRect; 2] = [
    ProportionalRect::new(0.0, 0.5, 1.0, 0.5),
    ProportionalRect::new(THIRD, 0.5, THIRD, 0.5),
];

static TOP_LEFT: [ProportionalRect; 5] = [
    ProportionalRect::new(0.0, 0.0, 0.5, 0.5),
    ProportionalRect::new(0.0, 0.0, TWO_THIRDS, 0.5),
    ProportionalRect::new(0.0, 0.0, THIRD, 0.5),
    ProportionalRect::new(0.0, 0.0, 0.25, 0.5),
    ProportionalRect::new(0.25, 0.0, 0.25, 0.5),
];

static TOP_RIGHT: [ProportionalRect; 5] = [
    ProportionalRect::new(0.5, 0.0, 0.5, 0.5),
    ProportionalRect::new(THIRD, 0.0, TWO_THIRDS, 0.5),
    ProportionalRect::new(TWO_THIRDS, 0.0, THIRD, 0.5),
    ProportionalRect::new(0.75, 0.0, 0.25, 0.5),
    ProportionalRect::new(0.5, 0.0, 0.25, 0.5),
];

static BOTTOM_LEFT: [ProportionalRect; 5] = [
    ProportionalRect::new(0.0, 0.5, 0.5, 0.5),
    ProportionalRect::new(0.0, 0.5, TWO_THIRDS, 0.5),
    ProportionalRect::new(0.0, 0.5, THIRD, 0.5),
    ProportionalRect::new(0.0, 0.5, 0.25, 0.5),
    ProportionalRect::new(0.25, 0.5, 0.25, 0.5),
];

static BOTTOM_RIGHT: [ProportionalRect; 5] = [
    ProportionalRect::new(0.5, 0.5, 0.5, 0.5),
    ProportionalRect::new(THIRD, 0.5, TWO_THIRDS, 0.5),
    ProportionalRect::new(TWO_THIRDS, 0.5, THIRD, 0.5),
    ProportionalRect::new(0.75, 0.5, 0.25, 0.5),
    ProportionalRect::new(0.5, 0.5, 0.25, 0.5),
];

static CENTER: [ProportionalRect; 2] = [
    ProportionalRect::new(0.25, 0.0, 0.5, 1.0),
    ProportionalRect::new(THIRD, 0.0, THIRD, 1.0),
];

static FAKE_MAXIMIZED: [ProportionalRect; 1] = [ProportionalRect::new(0.0, 0.0, 1.0, 1.0)];

impl Zone {
    /// Every zone, in enumeration order. Ties in the global search
    /// resolve to the earliest zone in this list.
    pub const ALL: [Zone; 10] = [
        Zone::Right,
        Zone::Left,
        Zone::Top,
        Zone::Bottom,
        Zone::TopLeft,
        Zone::TopRight,
        Zone::BottomLeft,
        Zone::BottomRight,
        Zone::Center,
        Zone::FakeMaximized,
    ];

    /// The zone's rectangles in cycle order. Never empty.
    pub fn rectangles(self) -> &'static [ProportionalRect] {
        match self {
            Zone::Right => &RIGHT,
            Zone::Left => &LEFT,
            Zone::Top => &TOP,
            Zone::Bottom => &BOTTOM,
            Zone::TopLeft => &TOP_LEFT,
            Zone::TopRight => &TOP_RIGHT,
            Zone::BottomLeft => &BOTTOM_LEFT,
            Zone::BottomRight => &BOTTOM_RIGHT,
            Zone::Center => &CENTER,
            Zone::FakeMaximized => &FAKE_MAXIMIZED,
        }
    }

    /// Kebab-case name used in keybindings, IPC, and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Zone::Right => "right",
            Zone::Left => "left",
            Zone::Top => "top",
            Zone::Bottom => "bottom",
            Zone::TopLeft => "top-left",
            Zone::TopRight => "top-right",
            Zone::BottomLeft => "bottom-left",
            Zone::BottomRight => "bottom-right",
            Zone::Center => "center",
            Zone::FakeMaximized => "fake-maximized",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = Error;

    /// Accepts `top-left`, `top_left`, and `TOP_LEFT` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Zone::ALL
            .into_iter()
            .find(|zone| zone.name() == normalized)
            .ok_or_else(|| Error::UnknownZone(s.to_string()))
    }
}

/// The outcome of matching a window position against zone rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSearchResult {
    /// The matched rectangle as fractions of the working area.
    pub proportional: ProportionalRect,
    /// The matched rectangle in working-area-relative pixels.
    pub rect: Rect,
    /// Edge distance between the window and `rect`.
    pub distance: f64,
    pub zone: Zone,
    /// Position of the match within the zone's cycle.
    pub index: usize,
}

/// Converts a zone rectangle to the coordinate space window positions
/// are exchanged in: absolute against `work_area`, then relative to its
/// origin.
pub fn zone_rect(proportional: &ProportionalRect, work_area: &Rect) -> Rect {
    proportional
        .to_absolute(work_area)
        .relative_to(work_area.origin())
}

/// Finds the rectangle of `zone` closest to `position`.
///
/// On equal distances the earlier rectangle in the cycle wins.
pub fn closest_in_zone(position: &Rect, work_area: &Rect, zone: Zone) -> ZoneSearchResult {
    let candidate = |index: usize, proportional: &ProportionalRect| {
        let rect = zone_rect(proportional, work_area);
        ZoneSearchResult {
            proportional: *proportional,
            rect,
            distance: rect.distance(position),
            zone,
            index,
        }
    };

    let rectangles = zone.rectangles();
    let mut best = candidate(0, &rectangles[0]);

    for (index, proportional) in rectangles.iter().enumerate().skip(1) {
        let next = candidate(index, proportional);
        if next.distance < best.distance {
            best = next;
        }
    }

    best
}

/// Finds the rectangle closest to `position` across every zone.
///
/// Deterministic: on equal distances the first zone in [`Zone::ALL`]
/// order wins, then the first rectangle in that zone's cycle.
pub fn closest_zone_rectangle(position: &Rect, work_area: &Rect) -> ZoneSearchResult {
    let mut best = closest_in_zone(position, work_area, Zone::ALL[0]);

    for zone in &Zone::ALL[1..] {
        let candidate = closest_in_zone(position, work_area, *zone);
        if candidate.distance < best.distance {
            best = candidate;
        }
    }

    best
}
