use std::fmt;

use kg_core::coords::ROOM_CELLS;
use kg_core::{CellPos, Document, Player};

use crate::error::RenderResult;

/// A cardinal direction out of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Up the map.
    North,
    /// Down the map.
    South,
    /// Left.
    West,
    /// Right.
    East,
}

impl Direction {
    /// All directions in the order doors are listed.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Room offset of the neighbour in this direction.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    /// `true` if `cell` sits on the room edge facing this direction.
    pub fn faces(self, cell: CellPos) -> bool {
        let last = ROOM_CELLS - 1;
        match self {
            Direction::North => cell.y == 0,
            Direction::South => cell.y == last,
            Direction::West => cell.x == 0,
            Direction::East => cell.x == last,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "север",
            Direction::South => "юг",
            Direction::West => "запад",
            Direction::East => "восток",
        };
        f.write_str(s)
    }
}

/// Directions in which the viewer's room has a door.
///
/// A neighbour counts when it lies on the viewer's floor and its tile is a
/// room. Blind viewers only sense doors on the edge they stand against.
pub fn list_doors(doc: &Document, viewer: &Player) -> RenderResult<Vec<Direction>> {
    let Some(floor) = doc.floor_of(viewer) else {
        return Ok(Vec::new());
    };
    let room = viewer.room();
    let cell = viewer.cell();

    let mut doors = Vec::new();
    for dir in Direction::ALL {
        let (dx, dy) = dir.offset();
        let neighbour = room.offset(dx, dy);
        let same_floor = doc
            .floor_of_room(neighbour)
            .is_some_and(|f| f.name == floor.name);
        if !same_floor || !doc.tile_at(neighbour)?.is_room() {
            continue;
        }
        if viewer.blind && !dir.faces(cell) {
            continue;
        }
        doors.push(dir);
    }
    Ok(doors)
}

/// Phrase a door list as a sentence.
pub fn door_sentence(doors: &[Direction], blind: bool) -> String {
    match doors {
        [] => format!("В этой комнате нет дверей{}", if blind { "?" } else { "." }),
        [a] => format!("Единственная дверь ведёт на {a}."),
        [a, b] => format!("Двери ведут на {a} и {b}."),
        [a, b, c] => format!("Двери ведут на {a}, {b} и {c}."),
        _ => "Двери ведут на 4 стороны света.".to_string(),
    }
}

/// Describe the doors of the viewer's room.
pub fn describe_doors(doc: &Document, viewer: &Player) -> RenderResult<String> {
    let doors = list_doors(doc, viewer)?;
    Ok(door_sentence(&doors, viewer.blind))
}
