use serde::{Deserialize, Serialize};

use crate::coords::{PixelPos, ROOM_SIZE, RoomPos};
use crate::object::MapObject;

/// A named rectangular region of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor name; floors are compared by name.
    pub name: String,
    /// Top-left corner in pixels.
    pub origin: PixelPos,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
}

impl Floor {
    /// Build a floor from an object of the floors group.
    pub fn from_object(obj: &MapObject) -> Self {
        Self {
            name: obj.display_name().to_string(),
            origin: obj.position,
            width: obj.width,
            height: obj.height,
        }
    }

    /// `true` if `p` lies inside the floor (lower bound inclusive, upper exclusive).
    pub fn contains(&self, p: PixelPos) -> bool {
        self.origin.x <= p.x
            && self.origin.y <= p.y
            && self.origin.x + self.width > p.x
            && self.origin.y + self.height > p.y
    }

    /// Top-left room of the floor.
    pub fn room_origin(&self) -> RoomPos {
        self.origin.room()
    }

    /// Floor size in rooms as `(columns, rows)`.
    pub fn room_size(&self) -> (i64, i64) {
        (
            self.width.div_euclid(ROOM_SIZE),
            self.height.div_euclid(ROOM_SIZE),
        )
    }
}

/// The first floor among `floors` containing pixel `p`.
pub fn locate<'a, I>(floors: I, p: PixelPos) -> Option<Floor>
where
    I: IntoIterator<Item = &'a MapObject>,
{
    floors
        .into_iter()
        .map(Floor::from_object)
        .find(|floor| floor.contains(p))
}
