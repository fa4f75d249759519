//! Grid geometry: continuous positions, integer tiles, footprints, bounds,
//! and facing directions.
//!
//! The room is a square tile grid. Furniture is placed on whole tiles, while
//! the character moves through continuous coordinates so the front-end can
//! interpolate smoothly between frames. At rest the character is always
//! tile-aligned.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A continuous position on the room grid, measured in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal grid coordinate (isometric "down/up" axis).
    pub x: f64,
    /// Vertical grid coordinate (isometric "right/left" axis).
    pub y: f64,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both axes are strictly within `tolerance` of `other`.
    pub fn is_near(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }

    /// Snap to the nearest whole tile.
    pub fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    /// Return this position shifted by one tile in `direction`.
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + f64::from(dx),
            y: self.y + f64::from(dy),
        }
    }

    /// Every whole tile this position overlaps.
    ///
    /// A tile-aligned position overlaps exactly one tile; a position
    /// halfway between two tiles on one axis overlaps two, and so on.
    pub fn covered_tiles(self) -> impl Iterator<Item = Self> {
        let xs = axis_span(self.x);
        let ys = axis_span(self.y);
        xs.into_iter()
            .flatten()
            .flat_map(move |x| ys.into_iter().flatten().map(move |y| Self { x, y }))
    }
}

/// The one or two whole coordinates an axis value overlaps.
fn axis_span(v: f64) -> [Option<f64>; 2] {
    let lo = v.floor();
    let hi = v.ceil();
    if (hi - lo).abs() < f64::EPSILON {
        [Some(lo), None]
    } else {
        [Some(lo), Some(hi)]
    }
}

impl From<Tile> for Position {
    fn from(tile: Tile) -> Self {
        Self {
            x: f64::from(tile.x),
            y: f64::from(tile.y),
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A whole grid tile. Used for furniture placement and interaction points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tile {
    /// Horizontal tile index.
    pub x: i32,
    /// Vertical tile index.
    pub y: i32,
}

impl Tile {
    /// Create a tile from its indices.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Tile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size of a furniture item in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Footprint {
    /// Extent along the x axis.
    pub width: u32,
    /// Extent along the y axis.
    pub depth: u32,
}

impl Footprint {
    /// Create a footprint of `width` by `depth` tiles.
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }
}

/// Inclusive walkable range, applied identically to both axes.
///
/// The default room keeps a two-tile margin inside a 20-tile grid so the
/// character never walks into the walls: `2..=18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridBounds {
    /// Lowest walkable coordinate (inclusive).
    pub min: i32,
    /// Highest walkable coordinate (inclusive).
    pub max: i32,
}

impl GridBounds {
    /// Create bounds covering `min..=max`.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether `(x, y)` lies inside the walkable range on both axes.
    pub fn contains(self, x: f64, y: f64) -> bool {
        let min = f64::from(self.min);
        let max = f64::from(self.max);
        x >= min && x <= max && y >= min && y <= max
    }

    /// Whether a whole tile lies inside the walkable range.
    pub fn contains_tile(self, tile: Tile) -> bool {
        (self.min..=self.max).contains(&tile.x) && (self.min..=self.max).contains(&tile.y)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self { min: 2, max: 18 }
    }
}

/// Which way the character faces.
///
/// Only used to mirror the sprite and to pick the nudge direction when a
/// pose is cancelled. The isometric projection maps the x axis to
/// `Up`/`Down` and the y axis to `Left`/`Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Decreasing y.
    Left,
    /// Increasing y.
    #[default]
    Right,
    /// Decreasing x.
    Up,
    /// Increasing x.
    Down,
}

impl Direction {
    /// Tile delta `(dx, dy)` for one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
        }
    }

    /// The reverse direction.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Whether the sprite is drawn mirrored when facing this way.
    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Left | Self::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_uses_strict_tolerance() {
        let a = Position::new(10.0, 10.0);
        assert!(a.is_near(Position::new(10.05, 9.95), 0.1));
        assert!(!a.is_near(Position::new(10.25, 10.0), 0.1));
    }

    #[test]
    fn stepped_follows_isometric_mapping() {
        let p = Position::new(5.0, 5.0);
        assert_eq!(p.stepped(Direction::Up), Position::new(4.0, 5.0));
        assert_eq!(p.stepped(Direction::Down), Position::new(6.0, 5.0));
        assert_eq!(p.stepped(Direction::Left), Position::new(5.0, 4.0));
        assert_eq!(p.stepped(Direction::Right), Position::new(5.0, 6.0));
    }

    #[test]
    fn covered_tiles_of_aligned_and_midway_positions() {
        let aligned: Vec<Position> = Position::new(3.0, 4.0).covered_tiles().collect();
        assert_eq!(aligned, vec![Position::new(3.0, 4.0)]);

        let between: Vec<Position> = Position::new(3.5, 4.0).covered_tiles().collect();
        assert_eq!(between, vec![Position::new(3.0, 4.0), Position::new(4.0, 4.0)]);

        let corner: Vec<Position> = Position::new(3.5, 4.5).covered_tiles().collect();
        assert_eq!(corner.len(), 4);
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = GridBounds::default();
        assert!(b.contains(2.0, 18.0));
        assert!(!b.contains(1.0, 10.0));
        assert!(!b.contains(10.0, 19.0));
        assert!(b.contains_tile(Tile::new(18, 2)));
        assert!(!b.contains_tile(Tile::new(18, 1)));
    }

    #[test]
    fn opposite_is_involutive() {
        for d in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }
}
