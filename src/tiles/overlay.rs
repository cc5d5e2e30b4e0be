//! Overlay tiles generated on demand: the chunk coordinate grid and the slime
//! chunk map.
//!
//! Overlay tiles use their own grid, anchored at [`OVERLAY_REFERENCE_ZOOM`]
//! where one tile covers exactly one chunk and tile `(x, y)` is chunk `(x, y)`.
//! Below that zoom a tile holds `2^depth` chunks per side; above it a tile is a
//! clipped window into a single chunk.
//!
//! Every call renders onto a fresh [`RgbaImage`], so generators can be shared
//! between threads and called in any order.

use font8x8::legacy::BASIC_LEGACY;
use image::{Rgba, RgbaImage};

use crate::core::{
    constants::{OVERLAY_REFERENCE_ZOOM, OVERLAY_TILE_SIZE},
    geo::TileCoord,
};

/// Deepest level at which the coordinate grid is still drawn.
const COORDS_MAX_DEPTH: i32 = 3;
/// Deepest level at which slime chunks are still drawn.
const SLIME_MAX_DEPTH: i32 = 4;
/// Tiles more than this many levels past the reference zoom are left blank.
const MAX_OVERSCALE: i32 = 32;

const GRID_BORDER: Rgba<u8> = Rgba([0, 0, 0, 128]);
const GRID_LABEL: Rgba<u8> = Rgba([0, 0, 0, 255]);
const SLIME_BORDER: Rgba<u8> = Rgba([0, 100, 0, 77]);
const SLIME_FILL: Rgba<u8> = Rgba([0, 200, 0, 77]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Produces one overlay tile.
pub trait TileGenerator: std::fmt::Debug + Send + Sync {
    /// Renders the tile at `coord`. Must return the same pixels for the same input.
    fn generate(&self, coord: TileCoord) -> RgbaImage;
}

/// Whether the chunk at `(chunk_x, chunk_z)` can spawn slimes.
///
/// Seeds a Mersenne Twister from the chunk coordinates, advances it just far
/// enough to produce the first tempered output and checks it modulo 10.
pub fn is_slime_chunk(chunk_x: i32, chunk_z: i32) -> bool {
    fn step(m: u32, i: u32) -> u32 {
        (m ^ (m >> 30)).wrapping_mul(0x6c07_8965).wrapping_add(i)
    }

    let mut m = (chunk_x as u32).wrapping_mul(0x1f1f_1f1f) ^ chunk_z as u32;
    let upper = m & 0x8000_0000;
    m = step(m, 1);
    let twist = upper | (m & 0x7fff_ffff);

    for i in 2..398 {
        m = step(m, i);
    }

    m ^= (twist >> 1) ^ if twist & 1 == 1 { 0x9908_b0df } else { 0 };
    m ^= m >> 11;
    m ^= (m << 7) & 0x9d2c_5680;
    m ^= (m << 15) & 0xefc6_0000;
    m ^= m >> 18;

    m % 10 == 0
}

/// One chunk's footprint on a tile, in tile pixels. May extend past the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChunkCell {
    chunk_x: i64,
    chunk_z: i64,
    left: i64,
    top: i64,
    width: i64,
}

impl ChunkCell {
    fn inset(&self, by: i64) -> (i64, i64, i64) {
        (self.left + by, self.top + by, self.width - 2 * by)
    }
}

/// Chunks touched by the tile at `coord`, or `None` when the tile is deeper
/// than `max_depth` or too far past the reference zoom.
fn chunk_cells(coord: TileCoord, max_depth: i32) -> Option<Vec<ChunkCell>> {
    let tile = i64::from(OVERLAY_TILE_SIZE);
    let depth = OVERLAY_REFERENCE_ZOOM - i32::from(coord.z);
    if depth >= max_depth || depth < -MAX_OVERSCALE {
        return None;
    }

    if depth >= 0 {
        let per_side = 1_i64 << depth;
        let width = tile / per_side;
        let cells = (0..per_side)
            .flat_map(|dy| (0..per_side).map(move |dx| (dx, dy)))
            .map(|(dx, dy)| ChunkCell {
                chunk_x: coord.x * per_side + dx,
                chunk_z: coord.y * per_side + dy,
                left: dx * width,
                top: dy * width,
                width,
            })
            .collect();
        Some(cells)
    } else {
        let tiles_per_chunk = 1_i64 << -depth;
        Some(vec![ChunkCell {
            chunk_x: coord.x.div_euclid(tiles_per_chunk),
            chunk_z: coord.y.div_euclid(tiles_per_chunk),
            left: -coord.x.rem_euclid(tiles_per_chunk) * tile,
            top: -coord.y.rem_euclid(tiles_per_chunk) * tile,
            width: tiles_per_chunk * tile,
        }])
    }
}

fn blank_tile() -> RgbaImage {
    RgbaImage::new(OVERLAY_TILE_SIZE, OVERLAY_TILE_SIZE)
}

/// Overwrites the pixels of the square `(left, top, width)` that fall inside
/// `clip` (`[min_x, min_y, max_x, max_y)`, itself clamped to the image).
fn fill_square(
    image: &mut RgbaImage,
    (left, top, width): (i64, i64, i64),
    clip: [i64; 4],
    color: Rgba<u8>,
) {
    if width <= 0 {
        return;
    }
    let x0 = left.max(clip[0]).max(0);
    let y0 = top.max(clip[1]).max(0);
    let x1 = (left + width).min(clip[2]).min(i64::from(image.width()));
    let y1 = (top + width).min(clip[3]).min(i64::from(image.height()));

    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn glyph_for_char(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

/// Draws `text` with the 8x8 bitmap font magnified by `scale`, clipped to `clip`.
fn draw_text(
    image: &mut RgbaImage,
    text: &str,
    (left, top): (i64, i64),
    scale: i64,
    clip: [i64; 4],
    color: Rgba<u8>,
) {
    for (col, ch) in text.chars().enumerate() {
        let glyph_left = left + col as i64 * 8 * scale;
        if glyph_left >= clip[2] {
            break;
        }
        for (row, bits) in glyph_for_char(ch).iter().enumerate() {
            for bit in 0..8_u8 {
                if (bits >> bit) & 0x01 == 0 {
                    continue;
                }
                let pixel = (
                    glyph_left + i64::from(bit) * scale,
                    top + row as i64 * scale,
                    scale,
                );
                fill_square(image, pixel, clip, color);
            }
        }
    }
}

/// Chunk coordinate grid with `x: <cx>, z: <cz>` labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordsGrid;

impl TileGenerator for CoordsGrid {
    fn generate(&self, coord: TileCoord) -> RgbaImage {
        let mut image = blank_tile();
        let Some(cells) = chunk_cells(coord, COORDS_MAX_DEPTH) else {
            return image;
        };

        for cell in cells {
            let border = (cell.width / 64).max(1);
            let font_size = cell.width / 8;
            let scale = (font_size / 8).max(1);
            let clip = [
                cell.left,
                cell.top,
                cell.left + cell.width,
                cell.top + cell.width,
            ];

            fill_square(&mut image, cell.inset(0), clip, GRID_BORDER);
            fill_square(&mut image, cell.inset(border), clip, CLEAR);

            let label = format!("x: {}, z: {}", cell.chunk_x, cell.chunk_z);
            let origin = (cell.left + border + 2, cell.top + border);
            draw_text(&mut image, &label, origin, scale, clip, GRID_LABEL);
        }

        image
    }
}

/// Highlights slime chunks in green.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlimeChunks;

impl TileGenerator for SlimeChunks {
    fn generate(&self, coord: TileCoord) -> RgbaImage {
        let mut image = blank_tile();
        let Some(cells) = chunk_cells(coord, SLIME_MAX_DEPTH) else {
            return image;
        };

        for cell in cells {
            // Chunk coordinates wrap like the game's 32-bit ints.
            if !is_slime_chunk(cell.chunk_x as i32, cell.chunk_z as i32) {
                continue;
            }
            let block = (cell.width / 16).max(1);
            let clip = [
                cell.left,
                cell.top,
                cell.left + cell.width,
                cell.top + cell.width,
            ];
            fill_square(&mut image, cell.inset(0), clip, SLIME_BORDER);
            fill_square(&mut image, cell.inset(block), clip, SLIME_FILL);
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIME_NEAR_ORIGIN: [(i32, i32); 25] = [
        (-8, -4),
        (-8, -1),
        (-8, 4),
        (-7, 3),
        (-7, 6),
        (-6, -7),
        (-6, 0),
        (-4, -1),
        (-4, 2),
        (-3, -2),
        (-3, -1),
        (-1, 0),
        (0, -5),
        (0, -2),
        (0, 4),
        (0, 6),
        (1, -2),
        (3, 0),
        (3, 1),
        (4, -6),
        (4, 7),
        (6, -4),
        (6, 5),
        (7, -8),
        (7, -3),
    ];

    #[test]
    fn test_slime_reference_vectors() {
        let mut found = Vec::new();
        for x in -8..8 {
            for z in -8..8 {
                if is_slime_chunk(x, z) {
                    found.push((x, z));
                }
            }
        }
        assert_eq!(found, SLIME_NEAR_ORIGIN.to_vec());
    }

    #[test]
    fn test_slime_density() {
        let count = (0..100)
            .flat_map(|x| (0..100).map(move |z| (x, z)))
            .filter(|&(x, z)| is_slime_chunk(x, z))
            .count();
        assert_eq!(count, 1053);
    }

    #[test]
    fn test_slime_known_chunks() {
        for (x, z) in [(0, 0), (1, 0), (0, 1), (-1, -1), (100, -200), (12345, 67890)] {
            assert!(!is_slime_chunk(x, z), "({x}, {z})");
        }
        assert!(is_slime_chunk(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_chunk_cells_at_reference_zoom() {
        let cells = chunk_cells(TileCoord::new(20, 3, -1), SLIME_MAX_DEPTH).unwrap();
        assert_eq!(
            cells,
            vec![ChunkCell {
                chunk_x: 3,
                chunk_z: -1,
                left: 0,
                top: 0,
                width: 256,
            }]
        );
    }

    #[test]
    fn test_chunk_cells_below_and_above_reference_zoom() {
        let cells = chunk_cells(TileCoord::new(18, -1, 2), SLIME_MAX_DEPTH).unwrap();
        assert_eq!(cells.len(), 16);
        assert_eq!((cells[0].chunk_x, cells[0].chunk_z), (-4, 8));
        assert_eq!((cells[15].chunk_x, cells[15].chunk_z), (-1, 11));
        assert_eq!((cells[5].left, cells[5].top, cells[5].width), (64, 64, 64));

        let cells = chunk_cells(TileCoord::new(22, -3, 5), SLIME_MAX_DEPTH).unwrap();
        assert_eq!(
            cells,
            vec![ChunkCell {
                chunk_x: -1,
                chunk_z: 1,
                left: -256,
                top: -256,
                width: 1024,
            }]
        );

        assert!(chunk_cells(TileCoord::new(17, 0, 0), COORDS_MAX_DEPTH).is_none());
        assert!(chunk_cells(TileCoord::new(16, 0, 0), SLIME_MAX_DEPTH).is_none());
    }

    #[test]
    fn test_generators_are_deterministic() {
        let coord = TileCoord::new(19, -2, 3);
        assert_eq!(
            CoordsGrid.generate(coord).into_raw(),
            CoordsGrid.generate(coord).into_raw()
        );
        assert_eq!(
            SlimeChunks.generate(coord).into_raw(),
            SlimeChunks.generate(coord).into_raw()
        );
    }

    #[test]
    fn test_deep_tiles_are_blank() {
        let coords = CoordsGrid.generate(TileCoord::new(17, 0, 0));
        assert!(coords.pixels().all(|pixel| pixel.0[3] == 0));

        let slime = SlimeChunks.generate(TileCoord::new(16, 0, 0));
        assert!(slime.pixels().all(|pixel| pixel.0[3] == 0));
    }

    #[test]
    fn test_coords_grid_layout() {
        let image = CoordsGrid.generate(TileCoord::new(20, 0, 0));
        assert_eq!(image.dimensions(), (256, 256));
        // border is 4px wide at one chunk per tile
        assert_eq!(*image.get_pixel(0, 0), GRID_BORDER);
        assert_eq!(*image.get_pixel(3, 128), GRID_BORDER);
        assert_eq!(*image.get_pixel(255, 255), GRID_BORDER);
        assert_eq!(*image.get_pixel(128, 200), CLEAR);

        let label_pixels = image.pixels().filter(|pixel| **pixel == GRID_LABEL).count();
        assert!(label_pixels > 0);
    }

    #[test]
    fn test_slime_tile_marks_only_slime_chunks() {
        // (3, 0) is a slime chunk, (2, 0) is not
        let slime = SlimeChunks.generate(TileCoord::new(20, 3, 0));
        assert_eq!(*slime.get_pixel(0, 0), SLIME_BORDER);
        assert_eq!(*slime.get_pixel(15, 100), SLIME_BORDER);
        assert_eq!(*slime.get_pixel(16, 100), SLIME_FILL);

        let plain = SlimeChunks.generate(TileCoord::new(20, 2, 0));
        assert!(plain.pixels().all(|pixel| *pixel == CLEAR));
    }

    #[test]
    fn test_overscaled_slime_tile_is_clipped_interior() {
        // chunk (3, 0) at z=21 is split into 2x2 tiles; the top-left one shows
        // the border on its left and top edges only
        let tile = SlimeChunks.generate(TileCoord::new(21, 6, 0));
        assert_eq!(*tile.get_pixel(0, 0), SLIME_BORDER);
        assert_eq!(*tile.get_pixel(255, 255), SLIME_FILL);

        let tile = SlimeChunks.generate(TileCoord::new(21, 7, 1));
        assert_eq!(*tile.get_pixel(0, 0), SLIME_FILL);
        assert_eq!(*tile.get_pixel(255, 255), SLIME_BORDER);
    }
}
