use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::PixelPos;

/// Name shown for objects that have none.
pub const UNNAMED: &str = "???";

/// Custom key/value properties attached to an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties(HashMap<String, String>);

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property. A later value for the same key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a property, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// `true` only when the property is literally `"true"`.
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if no properties are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

/// The kind of a map object, read from its class tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A non-player character.
    Npc,
    /// One or more items lying on the floor.
    Items,
    /// A player character.
    Player,
    /// A dead body.
    Corpse,
    /// A fixed structure such as a chest or altar.
    Structure,
    /// Any other or missing class.
    Other,
}

impl ObjectKind {
    /// Parse a class tag. Matching is exact.
    pub fn from_class(class: &str) -> Self {
        match class {
            "НПЦ" => Self::Npc,
            "Предмет(-ы)" => Self::Items,
            "Игрок" => Self::Player,
            "Труп" => Self::Corpse,
            "Структура" => Self::Structure,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Npc => "НПЦ",
            Self::Items => "Предмет(-ы)",
            Self::Player => "Игрок",
            Self::Corpse => "Труп",
            Self::Structure => "Структура",
            Self::Other => "",
        };
        f.write_str(s)
    }
}

/// A positioned entity from an object group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapObject {
    /// Name, if the object has one.
    pub name: Option<String>,
    /// Top-left position in pixels.
    pub position: PixelPos,
    /// Width in pixels (zero for point objects).
    pub width: i64,
    /// Height in pixels (zero for point objects).
    pub height: i64,
    /// Class tag, if any.
    pub class: Option<String>,
    /// Custom properties.
    pub properties: Properties,
}

impl MapObject {
    /// Create an unnamed, classless object at `position`.
    pub fn new(position: PixelPos) -> Self {
        Self {
            name: None,
            position,
            width: 0,
            height: 0,
            class: None,
            properties: Properties::new(),
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the class tag.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// The name, or [`UNNAMED`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }

    /// The kind derived from the class tag.
    pub fn kind(&self) -> ObjectKind {
        self.class
            .as_deref()
            .map_or(ObjectKind::Other, ObjectKind::from_class)
    }
}
