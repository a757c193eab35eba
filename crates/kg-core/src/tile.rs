use serde::{Deserialize, Serialize};

use crate::coords::{CHUNK_SIZE, RoomPos};
use crate::error::{KgError, KgResult};

/// Number of tile IDs in one chunk.
pub const CHUNK_LEN: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// What a room on the floor layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    /// No room.
    Null,
    /// An empty room.
    Empty,
    /// A pit; not a room.
    Abyss,
    /// A room with enemies.
    Enemy,
    /// A merchant or casino.
    Merchant,
    /// A scripted event.
    Event,
}

impl Tile {
    /// Decode a raw tile ID.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Null),
            1 => Some(Self::Empty),
            2 => Some(Self::Abyss),
            3 => Some(Self::Enemy),
            4 => Some(Self::Merchant),
            5 => Some(Self::Event),
            _ => None,
        }
    }

    /// `true` for tiles that are rooms someone can walk into.
    pub fn is_room(self) -> bool {
        !matches!(self, Self::Null | Self::Abyss)
    }
}

/// A 16×16 block of tile IDs in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Declared origin in room units.
    pub origin: RoomPos,
    /// Raw tile IDs.
    pub ids: Vec<u32>,
}

/// A named grid of chunked tile IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// Layer name.
    pub name: String,
    /// Chunks in document order.
    pub chunks: Vec<Chunk>,
}

impl TileLayer {
    /// The chunk whose declared origin matches the one covering `pos`.
    pub fn chunk_for(&self, pos: RoomPos) -> Option<&Chunk> {
        let origin = pos.chunk_origin();
        self.chunks.iter().find(|c| c.origin == origin)
    }
}

/// Resolve the tile at `pos` from the first layer with a chunk covering it.
pub fn resolve<'a, I>(layers: I, pos: RoomPos) -> KgResult<Tile>
where
    I: IntoIterator<Item = &'a TileLayer>,
{
    let chunk = layers
        .into_iter()
        .find_map(|layer| layer.chunk_for(pos))
        .ok_or(KgError::TileLookup { x: pos.x, y: pos.y })?;
    let id = *chunk
        .ids
        .get(pos.chunk_index())
        .ok_or(KgError::TileLookup { x: pos.x, y: pos.y })?;
    Tile::from_id(id).ok_or(KgError::UnknownTileId {
        id,
        x: pos.x,
        y: pos.y,
    })
}

/// Parse the text of a chunk: integers separated by commas and whitespace.
pub fn parse_chunk_data(text: &str) -> Result<Vec<u32>, String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| format!("invalid tile id \"{s}\" in chunk"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_with(origin: RoomPos, fill: u32, overrides: &[(usize, u32)]) -> TileLayer {
        let mut ids = vec![fill; CHUNK_LEN];
        for &(i, id) in overrides {
            ids[i] = id;
        }
        TileLayer {
            name: "пол".into(),
            chunks: vec![Chunk { origin, ids }],
        }
    }

    #[test]
    fn decode_all_ids() {
        assert_eq!(Tile::from_id(0), Some(Tile::Null));
        assert_eq!(Tile::from_id(5), Some(Tile::Event));
        assert_eq!(Tile::from_id(6), None);
        assert!(!Tile::Abyss.is_room());
        assert!(Tile::Merchant.is_room());
    }

    #[test]
    fn resolve_uses_row_major_index() {
        let layer = layer_with(RoomPos::new(16, 0), 1, &[(2 * 16 + 3, 4)]);
        assert_eq!(resolve([&layer], RoomPos::new(19, 2)).unwrap(), Tile::Merchant);
        assert_eq!(resolve([&layer], RoomPos::new(18, 2)).unwrap(), Tile::Empty);
    }

    #[test]
    fn resolve_negative_chunk() {
        let layer = layer_with(RoomPos::new(-16, -16), 0, &[(15 * 16 + 15, 3)]);
        assert_eq!(resolve([&layer], RoomPos::new(-1, -1)).unwrap(), Tile::Enemy);
    }

    #[test]
    fn missing_chunk_is_lookup_failure() {
        let layer = layer_with(RoomPos::new(0, 0), 1, &[]);
        let err = resolve([&layer], RoomPos::new(16, 0)).unwrap_err();
        assert!(matches!(err, KgError::TileLookup { x: 16, y: 0 }));
    }

    #[test]
    fn unknown_id_is_reported() {
        let layer = layer_with(RoomPos::new(0, 0), 9, &[]);
        let err = resolve([&layer], RoomPos::new(1, 1)).unwrap_err();
        assert!(matches!(err, KgError::UnknownTileId { id: 9, .. }));
    }

    #[test]
    fn chunk_data_tolerates_newlines() {
        assert_eq!(parse_chunk_data("\n1,2,\n3, 4\n").unwrap(), vec![1, 2, 3, 4]);
        assert!(parse_chunk_data("1,x").is_err());
    }
}
