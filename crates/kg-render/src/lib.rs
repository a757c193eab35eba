//! Text views of a Kartograf map.
//!
//! Every view is rendered from the point of view of one player and returned
//! as a string with embedded color directives (see [`kg_core::palette`]).

/// Door detection and phrasing.
pub mod doors;
/// Rendering errors.
pub mod error;
/// Whole-floor maps at several detail levels.
pub mod floor_map;
/// Glyph assignment and legends.
pub mod glyph;
/// The 8×8 room view.
pub mod room;

/// Re-export the door queries.
pub use doors::{Direction, describe_doors, list_doors};
/// Re-export error types.
pub use error::{RenderError, RenderResult};
/// Re-export the floor renderer.
pub use floor_map::render_floor;
/// Re-export the room renderer.
pub use room::render_room;
