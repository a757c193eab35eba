//! Core map model for Kartograf.
//!
//! A map is an externally authored Tiled document. This crate parses it into
//! a read-only [`Document`] and answers the spatial and player queries the
//! renderers build on: which floor contains a point, which tile a room has,
//! who a player is, and what their inventory looks like.

/// Coordinate units (pixel, room, cell) and conversions between them.
pub mod coords;
/// The parsed, read-only map document.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Floor regions and the floor locator.
pub mod floor;
/// Inventory line formatting: redaction and colorization.
pub mod inventory;
/// Map objects, their kinds, and custom properties.
pub mod object;
/// Color directives embedded into rendered text.
pub mod palette;
/// Player records and the player factory.
pub mod player;
/// Reserved group, layer, and property names.
pub mod schema;
/// Tile kinds, chunks, and the tile resolver.
pub mod tile;

/// Re-export coordinate types.
pub use coords::{CellPos, PixelPos, RoomPos};
/// Re-export the document store.
pub use document::{Document, ObjectGroup};
/// Re-export error types.
pub use error::{KgError, KgResult};
/// Re-export floor type.
pub use floor::Floor;
/// Re-export object types.
pub use object::{MapObject, ObjectKind, Properties};
/// Re-export the palette type.
pub use palette::Paint;
/// Re-export player types.
pub use player::{Player, StatPool};
/// Re-export schema types.
pub use schema::{MapSchema, PropertyKeys};
/// Re-export tile types.
pub use tile::Tile;
