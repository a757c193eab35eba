//! Room-resolution map of the viewer's whole floor.

use kg_core::palette::{BACK_WHITE, RESET};
use kg_core::{Document, Paint, Player, RoomPos, Tile};

use crate::error::RenderResult;

/// Lowest detail level that marks the viewer's room.
pub const LEVEL_SELF: u8 = 1;
/// Lowest detail level that tells room kinds apart.
pub const LEVEL_TILES: u8 = 2;

/// Legend label of rooms whose kind is not shown.
const UNKNOWN_LABEL: &str = "???";

/// Glyph and legend label for each room kind shown at [`LEVEL_TILES`].
fn tile_symbol(tile: Tile) -> Option<(String, &'static str)> {
    match tile {
        Tile::Event => Some((Paint::Green.paint("С"), "Событие")),
        Tile::Enemy => Some((Paint::Red.paint("Н"), "НПЦ")),
        Tile::Merchant => Some((Paint::Yellow.paint("Т"), "Торговец/Казино")),
        Tile::Empty => Some((format!("П{RESET}"), "Пусто")),
        Tile::Null | Tile::Abyss => None,
    }
}

/// Legend of a floor map. Setting an existing key keeps its position.
#[derive(Debug, Default)]
struct FloorLegend(Vec<(String, String)>);

impl FloorLegend {
    fn set(&mut self, key: &str, label: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, l)) => *l = label.to_string(),
            None => self.0.push((key.to_string(), label.to_string())),
        }
    }

    fn render(&self) -> String {
        self.0
            .iter()
            .map(|(key, label)| format!("{key}: {label}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render the viewer's floor at the given detail level.
///
/// - level 0: rooms as `#`, no legend;
/// - level 1: also the viewer's room, as the highlighted initial of their name;
/// - level 2 and up: room kinds, with the viewer's room on a white background.
///
/// Returns `None` when the viewer is not on any floor.
pub fn render_floor(doc: &Document, viewer: &Player, level: u8) -> RenderResult<Option<String>> {
    let Some(floor) = doc.floor_of(viewer) else {
        return Ok(None);
    };
    let origin = floor.room_origin();
    let (width, height) = floor.room_size();
    let here = viewer.room().relative_to(origin);
    tracing::debug!(floor = %floor.name, width, height, level, "rendering floor");

    let mut legend = FloorLegend::default();
    let mut rows = Vec::new();
    for y in 0..height {
        let mut row = String::new();
        for x in 0..width {
            let tile = doc.tile_at(origin.offset(x, y))?;
            let is_here = here == RoomPos::new(x, y);
            let highlight = level >= LEVEL_TILES && is_here;
            let background = if highlight { BACK_WHITE } else { "" };

            match tile_symbol(tile) {
                None => row.push(' '),
                Some((glyph, label)) if level >= LEVEL_TILES => {
                    row.push_str(background);
                    row.push_str(&glyph);
                    legend.set(&glyph, label);
                }
                Some(_) if level == LEVEL_SELF && is_here => {
                    let initial: String = viewer
                        .name
                        .chars()
                        .next()
                        .map(|c| c.to_uppercase().collect())
                        .unwrap_or_default();
                    let glyph = Paint::Reverse.paint(&initial);
                    row.push_str(&glyph);
                    legend.set(&glyph, &viewer.name);
                }
                Some(_) => {
                    row.push('#');
                    legend.set("#", UNKNOWN_LABEL);
                }
            }

            if highlight {
                legend.set(&format!("{BACK_WHITE} {RESET}"), &viewer.name);
            }
        }
        rows.push(row);
    }

    let legend = if level > 0 {
        legend.render()
    } else {
        String::new()
    };
    Ok(Some(format!("{}\n\n{legend}", rows.join("\n"))))
}
