//! The 8×8 view of the viewer's current room.

use std::fmt;

use kg_core::coords::ROOM_CELLS;
use kg_core::{CellPos, Document, MapObject, ObjectKind, Player, PropertyKeys};

use crate::error::RenderResult;
use crate::glyph::{self, Glyph, GlyphState};

/// An object placed in the viewer's room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomObject {
    /// Display name.
    pub name: String,
    /// Cell inside the room.
    pub cell: CellPos,
    /// Kind from the class tag.
    pub kind: ObjectKind,
}

impl RoomObject {
    /// Name followed by the cell column and row. Names that prefix each
    /// other interleave with the digits, which is the established order.
    fn sort_key(&self) -> String {
        format!("{}{}{}", self.name, self.cell.x, self.cell.y)
    }
}

/// Hidden objects are shown only to their owner, to members of their
/// group, and to themselves.
fn is_visible(obj: &MapObject, viewer: &Player, keys: &PropertyKeys) -> bool {
    let props = &obj.properties;
    if !props.is_true(&keys.hidden) {
        return true;
    }
    let owner = props.get_or(&keys.owner, "");
    let group = props.get_or(&keys.group, "");
    (!owner.is_empty() && owner == viewer.name)
        || (!group.is_empty() && group == viewer.group)
        || obj.name.as_deref() == Some(viewer.name.as_str())
}

/// Every object visible to `viewer` in their room, sorted for glyph assignment.
pub fn room_objects(doc: &Document, viewer: &Player) -> Vec<RoomObject> {
    let room = viewer.room();
    let keys = &doc.schema().keys;
    let mut objects: Vec<RoomObject> = doc
        .render_objects()
        .filter(|obj| obj.position.room() == room)
        .filter(|obj| is_visible(obj, viewer, keys))
        .map(|obj| RoomObject {
            name: obj.display_name().to_string(),
            cell: obj.position.cell(),
            kind: obj.kind(),
        })
        .collect();
    objects.sort_by_cached_key(RoomObject::sort_key);
    objects
}

/// One cell of the rendered room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Nothing there.
    Floor,
    /// Out of a blind viewer's reach.
    Unknown,
    /// An object.
    Glyph(Glyph),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Floor => f.write_str("."),
            Cell::Unknown => f.write_str("?"),
            Cell::Glyph(g) => write!(f, "{g}"),
        }
    }
}

/// A rendered room: the grid and its legend state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    /// Cells indexed as `grid[y][x]`.
    pub grid: [[Cell; ROOM_CELLS]; ROOM_CELLS],
    /// Final assignment state, including the legend.
    pub glyphs: GlyphState,
}

impl RoomView {
    /// Lay out `objects` as seen by `viewer`.
    pub fn build(objects: &[RoomObject], viewer: &Player) -> RenderResult<Self> {
        let here = viewer.cell();
        let reachable = |cell: CellPos| !viewer.blind || here.is_adjacent(cell);

        let mut grid = [[Cell::Floor; ROOM_CELLS]; ROOM_CELLS];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if !reachable(CellPos::new(x, y)) {
                    *cell = Cell::Unknown;
                }
            }
        }

        let mut glyphs = GlyphState::new();
        for obj in objects {
            if !reachable(obj.cell) {
                continue;
            }
            let slot = &mut grid[obj.cell.y][obj.cell.x];
            let occupant = match *slot {
                Cell::Glyph(g) => Some(g),
                _ => None,
            };
            let (next, glyph) = glyph::assign(
                glyphs,
                occupant,
                &obj.name,
                obj.kind,
                obj.name == viewer.name,
            )?;
            glyphs = next;
            *slot = Cell::Glyph(glyph);
        }

        Ok(Self { grid, glyphs })
    }
}

impl fmt::Display for RoomView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.grid.iter().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        write!(f, "\n\n{}", self.glyphs.legend.render())
    }
}

/// Render the viewer's room: the grid, a blank line, then the legend.
pub fn render_room(doc: &Document, viewer: &Player) -> RenderResult<String> {
    let objects = room_objects(doc, viewer);
    tracing::debug!(
        name = %viewer.name,
        objects = objects.len(),
        blind = viewer.blind,
        "rendering room"
    );
    Ok(RoomView::build(&objects, viewer)?.to_string())
}
