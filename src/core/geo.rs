use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::BLOCKS_PER_CHUNK;

/// Represents a point in projection (map) coordinates.
///
/// Projection `y` grows upwards while world `z` grows towards the south, so a
/// block at `z = 100` sits at a negative projection `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// A block position on the horizontal world plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockCoord {
    pub x: i64,
    pub z: i64,
}

impl BlockCoord {
    pub fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// Chunk containing this block.
    pub fn chunk(&self) -> ChunkCoord {
        let size = BLOCKS_PER_CHUNK as i64;
        ChunkCoord::new(self.x.div_euclid(size), self.z.div_euclid(size))
    }
}

impl fmt::Display for BlockCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {} Z: {}", self.x, self.z)
    }
}

/// A 16×16 block column of the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i64,
    pub z: i64,
}

impl ChunkCoord {
    pub fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }
}

/// Address of a tile in a tile grid whose origin is the projection origin.
///
/// `y` counts rows downwards, so row `0` spans projection `y` from `0` to
/// `-span` and lines up with world `z` increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub z: u8,
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn new(z: u8, x: i64, y: i64) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Identifier of a world dimension as written by the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionId(pub i32);

impl DimensionId {
    pub const OVERWORLD: DimensionId = DimensionId(0);
    pub const NETHER: DimensionId = DimensionId(1);
    pub const END: DimensionId = DimensionId(2);

    /// Bucket index for the three known dimensions.
    pub fn index(self) -> Option<usize> {
        match self.0 {
            0..=2 => Some(self.0 as usize),
            _ => None,
        }
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_math() {
        let a = Point::new(1.5, -2.0);
        let b = Point::new(0.5, 1.0);
        assert_eq!(a.add(&b), Point::new(2.0, -1.0));
        assert_eq!(a.subtract(&b), Point::new(1.0, -3.0));
        assert_eq!(a.multiply(2.0), Point::new(3.0, -4.0));
        assert_eq!(a.floor(), Point::new(1.0, -2.0));
        assert_eq!(Point::new(3.0, 4.0).distance_to(&Point::ORIGIN), 5.0);
    }

    #[test]
    fn test_block_chunk_rounds_towards_negative_infinity() {
        assert_eq!(BlockCoord::new(15, 16).chunk(), ChunkCoord::new(0, 1));
        assert_eq!(BlockCoord::new(-1, -16).chunk(), ChunkCoord::new(-1, -1));
        assert_eq!(BlockCoord::new(-17, 0).chunk(), ChunkCoord::new(-2, 0));
    }

    #[test]
    fn test_block_display() {
        assert_eq!(BlockCoord::new(-12, 340).to_string(), "X: -12 Z: 340");
    }

    #[test]
    fn test_dimension_index() {
        assert_eq!(DimensionId::OVERWORLD.index(), Some(0));
        assert_eq!(DimensionId::END.index(), Some(2));
        assert_eq!(DimensionId(3).index(), None);
        assert_eq!(DimensionId(-1).index(), None);
    }
}
