//! Player records reconstructed from map objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::{CellPos, PixelPos, RoomPos};
use crate::document::Document;
use crate::error::{KgError, KgResult};
use crate::floor::Floor;
use crate::inventory;
use crate::object::MapObject;
use crate::schema::MapSchema;

/// Values used when a player property is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDefaults {
    /// Hit points.
    pub hp: &'static str,
    /// Mana points.
    pub mp: &'static str,
    /// Soul points.
    pub sp: &'static str,
    /// Rerolls.
    pub rerolls: &'static str,
    /// Level.
    pub level: &'static str,
    /// Frags.
    pub frags: &'static str,
    /// Class assumed for objects without one.
    pub class: &'static str,
}

impl StatDefaults {
    /// The production defaults.
    pub const STANDARD: Self = Self {
        hp: "100/100 (100)",
        mp: "100/100 (100)",
        sp: "3",
        rerolls: "2",
        level: "1",
        frags: "0/4",
        class: "Игрок",
    };
}

impl Default for StatDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A `current/max (true)` stat such as hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatPool {
    /// Current value.
    pub current: i64,
    /// Maximum, which buffs may make fractional.
    pub max: f64,
    /// Unmodified maximum.
    pub base: i64,
}

impl StatPool {
    /// Parse `cur/max (true)`.
    pub fn parse(key: &str, raw: &str) -> KgResult<Self> {
        let err = || KgError::MalformedStat {
            key: key.to_string(),
            value: raw.to_string(),
        };
        let mut parts = raw.split_whitespace();
        let ratio = parts.next().ok_or_else(err)?;
        let base = parts.next().ok_or_else(err)?;
        let (current, max) = ratio.split_once('/').ok_or_else(err)?;
        let base = base
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(err)?;

        Ok(Self {
            current: current.parse().map_err(|_| err())?,
            max: max.parse().map_err(|_| err())?,
            base: base.parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for StatPool {
    /// Whole maxima keep one decimal: `100/100.0 (100)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max.is_finite() && self.max.fract() == 0.0 {
            write!(f, "{}/{:.1} ({})", self.current, self.max, self.base)
        } else {
            write!(f, "{}/{} ({})", self.current, self.max, self.base)
        }
    }
}

/// A player's game state, rebuilt from the map on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Position in pixels.
    pub position: PixelPos,
    /// Character name.
    pub name: String,
    /// Formatted inventory lines.
    pub inventory: Vec<String>,
    /// Hit points.
    pub hp: StatPool,
    /// Mana points.
    pub mp: StatPool,
    /// Soul points.
    pub sp: f64,
    /// Character level.
    pub level: i64,
    /// Frags towards the next level, e.g. `0/4`.
    pub frags: String,
    /// Active abilities.
    pub active_abilities: Vec<String>,
    /// Passive abilities.
    pub passive_abilities: Vec<String>,
    /// Remaining rerolls.
    pub rerolls: i64,
    /// Party label; empty when not in a party.
    pub group: String,
    /// Blind players only perceive adjacent cells.
    pub blind: bool,
    /// Whether the object is a corpse.
    pub dead: bool,
}

impl Player {
    /// Build a player from an object's properties.
    pub fn from_object(obj: &MapObject, schema: &MapSchema) -> KgResult<Self> {
        let keys = &schema.keys;
        let defaults = StatDefaults::STANDARD;
        let props = &obj.properties;
        let stat = |key: &str, default: &str| props.get_or(key, default).to_string();
        let number = |key: &str, default: &str| {
            let raw = props.get_or(key, default);
            raw.trim().parse::<i64>().map_err(|_| KgError::MalformedStat {
                key: key.to_string(),
                value: raw.to_string(),
            })
        };

        let sp_raw = props.get_or(&keys.sp, defaults.sp);
        let sp = sp_raw
            .trim()
            .parse::<f64>()
            .map_err(|_| KgError::MalformedStat {
                key: keys.sp.clone(),
                value: sp_raw.to_string(),
            })?;

        let class = obj.class.as_deref().unwrap_or(defaults.class);

        Ok(Self {
            position: obj.position,
            name: obj.display_name().to_string(),
            inventory: inventory::format_inventory(inventory::split_lines(
                props.get_or(&keys.inventory, ""),
            )),
            hp: StatPool::parse(&keys.hp, props.get_or(&keys.hp, defaults.hp))?,
            mp: StatPool::parse(&keys.mp, props.get_or(&keys.mp, defaults.mp))?,
            sp,
            level: number(&keys.level, defaults.level)?,
            frags: stat(&keys.frags, defaults.frags),
            active_abilities: split_list(props.get_or(&keys.active_abilities, "")),
            passive_abilities: split_list(props.get_or(&keys.passive_abilities, "")),
            rerolls: number(&keys.rerolls, defaults.rerolls)?,
            group: stat(&keys.group, ""),
            blind: matches!(
                props.get_or(&keys.blind, "false").to_lowercase().as_str(),
                "true" | "1"
            ),
            dead: class.to_lowercase() == "труп",
        })
    }

    /// The room the player stands in.
    pub fn room(&self) -> RoomPos {
        self.position.room()
    }

    /// The player's cell inside their room.
    pub fn cell(&self) -> CellPos {
        self.position.cell()
    }

    /// Hit points as `cur/max (true)`.
    pub fn format_hp(&self) -> String {
        self.hp.to_string()
    }

    /// Mana points as `cur/max (true)`.
    pub fn format_mp(&self) -> String {
        self.mp.to_string()
    }

    /// Commands granted by inventory items, written as `<PREFIXcommand>`.
    ///
    /// A tag runs from the first `<PREFIX` of a line to the last `>` after
    /// it, so each line grants at most one command.
    pub fn inventory_commands(&self, prefix: &str) -> Vec<String> {
        let opener = format!("<{prefix}");
        self.inventory
            .iter()
            .filter_map(|item| {
                let start = item.find(&opener)? + opener.len();
                let end = item.rfind('>').filter(|&end| end > start)?;
                Some(item[start..end].to_string())
            })
            .collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player: {}", self.name)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}

impl Document {
    /// Find the player named `name` and check that it belongs to `external_id`.
    pub fn locate_player(&self, name: &str, external_id: &str) -> KgResult<Player> {
        let obj = self
            .find_object(name)
            .ok_or_else(|| KgError::NotFound(name.to_string()))?;

        let expected = obj.properties.get_or(&self.schema().keys.player_id, "");
        if expected != external_id {
            tracing::debug!(name, expected, got = external_id, "player identity mismatch");
            return Err(KgError::IdentityMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                got: external_id.to_string(),
            });
        }

        let player = Player::from_object(obj, self.schema())?;
        tracing::debug!(name, x = player.position.x, y = player.position.y, "located player");
        Ok(player)
    }

    /// Formatted inventory of any render-layer object.
    pub fn inventory_of(&self, name: &str) -> KgResult<Vec<String>> {
        let obj = self
            .find_object(name)
            .ok_or_else(|| KgError::NotFound(name.to_string()))?;
        let raw = obj.properties.get_or(&self.schema().keys.inventory, "");
        Ok(inventory::format_inventory(inventory::split_lines(raw)))
    }

    /// The floor the player stands on.
    pub fn floor_of(&self, player: &Player) -> Option<Floor> {
        let floor = self.floor_at(player.position);
        if floor.is_none() {
            tracing::debug!(name = %player.name, "player is not on any floor");
        }
        floor
    }

    /// The player's room relative to the origin of their floor.
    pub fn floor_coords(&self, player: &Player) -> Option<RoomPos> {
        self.floor_of(player)
            .map(|floor| player.room().relative_to(floor.room_origin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(props: &[(&str, &str)]) -> MapObject {
        let mut obj = MapObject::new(PixelPos::new(40, 72)).with_name("Вася");
        for (k, v) in props {
            obj = obj.with_property(*k, *v);
        }
        obj
    }

    #[test]
    fn defaults_apply_when_absent() {
        let player = Player::from_object(&object(&[]), &MapSchema::default()).unwrap();
        assert_eq!(player.format_hp(), "100/100.0 (100)");
        assert_eq!(player.format_mp(), "100/100.0 (100)");
        assert!((player.sp - 3.0).abs() < f64::EPSILON);
        assert_eq!(player.rerolls, 2);
        assert_eq!(player.level, 1);
        assert_eq!(player.frags, "0/4");
        assert_eq!(player.inventory, vec![String::new()]);
        assert_eq!(player.active_abilities, vec![String::new()]);
        assert!(!player.blind);
        assert!(!player.dead);
    }

    #[test]
    fn stats_are_parsed() {
        let obj = object(&[
            ("Очки Здоровья", "127/151.3 (154)"),
            ("Очки Маны", "47/47 (47)"),
            ("Очки Души", "2.5"),
            ("Ослеплён", "True"),
            ("Навыки", "удар\nблок"),
        ]);
        let player = Player::from_object(&obj, &MapSchema::default()).unwrap();
        assert_eq!(player.format_hp(), "127/151.3 (154)");
        assert_eq!(player.format_mp(), "47/47.0 (47)");
        assert!((player.sp - 2.5).abs() < f64::EPSILON);
        assert!(player.blind);
        assert_eq!(player.active_abilities, vec!["удар", "блок"]);
    }

    #[test]
    fn malformed_stat_is_an_error() {
        for bad in ["100/100", "100 (100)", "a/100 (100)", "100/100 100"] {
            let obj = object(&[("Очки Здоровья", bad)]);
            let err = Player::from_object(&obj, &MapSchema::default()).unwrap_err();
            assert!(matches!(err, KgError::MalformedStat { .. }), "{bad}");
        }
        let obj = object(&[("Уровень", "два")]);
        assert!(Player::from_object(&obj, &MapSchema::default()).is_err());
    }

    #[test]
    fn corpse_class_marks_dead() {
        let obj = object(&[]).with_class("Труп");
        assert!(Player::from_object(&obj, &MapSchema::default()).unwrap().dead);
    }

    #[test]
    fn room_and_cell() {
        let player = Player::from_object(&object(&[]), &MapSchema::default()).unwrap();
        assert_eq!(player.room(), RoomPos::new(1, 2));
        assert_eq!(player.cell(), CellPos::new(2, 2));
    }

    #[test]
    fn inventory_commands_found() {
        let obj = object(&[("Инвентарь", "1. карта &lt;!карта&gt;\n2. меч\n3. свиток <!телепорт>")]);
        let player = Player::from_object(&obj, &MapSchema::default()).unwrap();
        assert_eq!(player.inventory_commands("!"), vec!["карта", "телепорт"]);
        assert!(player.inventory_commands("?").is_empty());
    }

    #[test]
    fn inventory_command_tag_spans_to_last_bracket() {
        let obj = object(&[(
            "Инвентарь",
            "1. жезл <!> <!вспышка>\n2. пустой <!>\n3. руна <.*огонь>",
        )]);
        let player = Player::from_object(&obj, &MapSchema::default()).unwrap();
        assert_eq!(player.inventory_commands("!"), vec!["> <!вспышка"]);
        assert_eq!(player.inventory_commands(".*"), vec!["огонь"]);
        assert_eq!(player.inventory_commands(""), vec!["!> <!вспышка", "!", ".*огонь"]);
    }
}
