//! Coordinate units and the conversions between them.
//!
//! A map uses three nested scales: pixels, rooms (32×32 pixels, which is
//! also the size of one tile of the floor layer), and cells (an 8×8
//! subdivision of a room, 4×4 pixels each). All conversions use Euclidean
//! division so negative coordinates land in the room to their top-left.

use serde::{Deserialize, Serialize};

/// Side of a room in pixels.
pub const ROOM_SIZE: i64 = 32;
/// Side of a room in cells.
pub const ROOM_CELLS: usize = 8;
/// Side of a cell in pixels.
pub const CELL_SIZE: i64 = ROOM_SIZE / ROOM_CELLS as i64;
/// Side of a tile chunk in rooms.
pub const CHUNK_SIZE: i64 = 16;

/// A position in map pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPos {
    /// Horizontal pixel offset.
    pub x: i64,
    /// Vertical pixel offset.
    pub y: i64,
}

impl PixelPos {
    /// Create a pixel position.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The room containing this pixel.
    pub fn room(self) -> RoomPos {
        RoomPos::new(self.x.div_euclid(ROOM_SIZE), self.y.div_euclid(ROOM_SIZE))
    }

    /// The cell of the 8×8 room grid containing this pixel.
    pub fn cell(self) -> CellPos {
        // rem_euclid keeps the result in 0..ROOM_SIZE, so the casts are lossless
        CellPos::new(
            (self.x.rem_euclid(ROOM_SIZE) / CELL_SIZE) as usize,
            (self.y.rem_euclid(ROOM_SIZE) / CELL_SIZE) as usize,
        )
    }
}

/// A position in room units. Rooms and floor tiles share this grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomPos {
    /// Room column.
    pub x: i64,
    /// Room row.
    pub y: i64,
}

impl RoomPos {
    /// Create a room position.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of the room.
    pub fn to_pixel(self) -> PixelPos {
        PixelPos::new(self.x * ROOM_SIZE, self.y * ROOM_SIZE)
    }

    /// The room shifted by the given number of rooms.
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// This room expressed relative to `origin`.
    pub fn relative_to(self, origin: RoomPos) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }

    /// Declared origin of the chunk holding this room's tile.
    pub fn chunk_origin(self) -> Self {
        Self::new(
            self.x - self.x.rem_euclid(CHUNK_SIZE),
            self.y - self.y.rem_euclid(CHUNK_SIZE),
        )
    }

    /// Row-major index of this room's tile inside its chunk.
    pub fn chunk_index(self) -> usize {
        (self.y.rem_euclid(CHUNK_SIZE) * CHUNK_SIZE + self.x.rem_euclid(CHUNK_SIZE)) as usize
    }
}

/// A cell of the 8×8 grid inside one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Column, `0..8`.
    pub x: usize,
    /// Row, `0..8`.
    pub y: usize,
}

impl CellPos {
    /// Create a cell position.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// `true` if `other` lies in the 3×3 window centred on this cell.
    pub fn is_adjacent(self, other: CellPos) -> bool {
        self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn room_and_cell_of_pixel() {
        let p = PixelPos::new(70, 45);
        assert_eq!(p.room(), RoomPos::new(2, 1));
        assert_eq!(p.cell(), CellPos::new(1, 3));
    }

    #[test]
    fn negative_pixels_floor_towards_top_left() {
        let p = PixelPos::new(-1, -33);
        assert_eq!(p.room(), RoomPos::new(-1, -2));
        assert_eq!(p.cell(), CellPos::new(7, 7));
    }

    #[test]
    fn chunk_addressing() {
        let r = RoomPos::new(17, -3);
        assert_eq!(r.chunk_origin(), RoomPos::new(16, -16));
        assert_eq!(r.chunk_index(), 13 * 16 + 1);
    }

    #[test]
    fn adjacency_window() {
        let c = CellPos::new(0, 4);
        assert!(c.is_adjacent(CellPos::new(1, 5)));
        assert!(c.is_adjacent(CellPos::new(0, 3)));
        assert!(!c.is_adjacent(CellPos::new(2, 4)));
        assert!(!c.is_adjacent(CellPos::new(0, 6)));
    }

    proptest! {
        #[test]
        fn room_matches_truncated_pixel(x in -10_000i64..10_000, y in -10_000i64..10_000) {
            let p = PixelPos::new(x, y);
            let room = p.room();
            prop_assert_eq!(room.to_pixel().x, x - x.rem_euclid(ROOM_SIZE));
            prop_assert_eq!(room.to_pixel().y, y - y.rem_euclid(ROOM_SIZE));
        }

        #[test]
        fn cell_stays_inside_room(x in -10_000i64..10_000, y in -10_000i64..10_000) {
            let p = PixelPos::new(x, y);
            let cell = p.cell();
            prop_assert!(cell.x < ROOM_CELLS && cell.y < ROOM_CELLS);
            let origin = p.room().to_pixel();
            prop_assert!(origin.x + cell.x as i64 * CELL_SIZE <= x);
            prop_assert!(x < origin.x + (cell.x as i64 + 1) * CELL_SIZE);
        }
    }
}
