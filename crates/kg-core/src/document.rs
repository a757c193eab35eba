//! The document store: a typed, read-only snapshot of one map file.
//!
//! The XML tree is walked once in [`Document::parse`] and normalized into
//! object groups and tile layers; every query afterwards works on those
//! typed collections. Nothing is cached between documents, so callers load
//! a fresh [`Document`] for every query.

use std::path::Path;

use chrono::{DateTime, Local};
use roxmltree::Node;

use crate::coords::{PixelPos, RoomPos};
use crate::error::{KgError, KgResult};
use crate::floor::{self, Floor};
use crate::object::{MapObject, Properties};
use crate::schema::MapSchema;
use crate::tile::{self, Chunk, Tile, TileLayer};

/// A named collection of positioned objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectGroup {
    /// Group name.
    pub name: String,
    /// Objects in document order.
    pub objects: Vec<MapObject>,
}

/// A parsed map document.
#[derive(Debug, Clone)]
pub struct Document {
    schema: MapSchema,
    modified: Option<String>,
    object_groups: Vec<ObjectGroup>,
    tile_layers: Vec<TileLayer>,
}

impl Document {
    /// Read and parse the map file at `path` with the default schema.
    pub fn load(path: impl AsRef<Path>) -> KgResult<Self> {
        Self::load_with_schema(path, MapSchema::default())
    }

    /// Read and parse the map file at `path`.
    pub fn load_with_schema(path: impl AsRef<Path>, schema: MapSchema) -> KgResult<Self> {
        let path = path.as_ref();
        let io_err = |source| KgError::Io {
            path: path.to_path_buf(),
            source,
        };
        let xml = std::fs::read_to_string(path).map_err(io_err)?;
        let mtime = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(io_err)?;

        let mut doc = Self::parse_with_schema(&xml, schema)?;
        doc.modified = Some(
            DateTime::<Local>::from(mtime)
                .format("%H:%M:%S %d/%m/%Y")
                .to_string(),
        );
        tracing::debug!(
            path = %path.display(),
            modified = doc.modified.as_deref().unwrap_or_default(),
            "loaded map document"
        );
        Ok(doc)
    }

    /// Parse a map document from a string with the default schema.
    pub fn parse(xml: &str) -> KgResult<Self> {
        Self::parse_with_schema(xml, MapSchema::default())
    }

    /// Parse a map document from a string.
    ///
    /// Only the floor tile layer is decoded; other tile layers may use any
    /// encoding and are skipped.
    pub fn parse_with_schema(xml: &str, schema: MapSchema) -> KgResult<Self> {
        let tree = roxmltree::Document::parse(xml)?;
        let root = tree.root_element();

        let mut object_groups = Vec::new();
        let mut tile_layers = Vec::new();
        for node in root.children().filter(Node::is_element) {
            match node.tag_name().name() {
                "objectgroup" => object_groups.push(parse_object_group(node)?),
                "layer" if node.attribute("name") == Some(schema.floor_layer.as_str()) => {
                    tile_layers.push(parse_tile_layer(node)?);
                }
                _ => {}
            }
        }

        tracing::trace!(
            groups = object_groups.len(),
            layers = tile_layers.len(),
            "parsed map tree"
        );
        Ok(Self {
            schema,
            modified: None,
            object_groups,
            tile_layers,
        })
    }

    /// The reserved names this document is read with.
    pub fn schema(&self) -> &MapSchema {
        &self.schema
    }

    /// Last-modified time of the source file as `HH:MM:SS dd/mm/YYYY`.
    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    /// All object groups in document order.
    pub fn object_groups(&self) -> &[ObjectGroup] {
        &self.object_groups
    }

    /// Decoded floor tile layers in document order.
    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    /// Objects of every render layer, in document order.
    pub fn render_objects(&self) -> impl Iterator<Item = &MapObject> {
        self.object_groups
            .iter()
            .filter(|g| self.schema.is_render_layer(&g.name))
            .flat_map(|g| g.objects.iter())
    }

    /// The first render-layer object named `name`.
    pub fn find_object(&self, name: &str) -> Option<&MapObject> {
        self.render_objects().find(|obj| obj.name.as_deref() == Some(name))
    }

    /// Objects of the floors group.
    pub fn floor_objects(&self) -> impl Iterator<Item = &MapObject> {
        self.object_groups
            .iter()
            .filter(|g| g.name == self.schema.floors_group)
            .flat_map(|g| g.objects.iter())
    }

    /// The floor containing pixel `p`, if any.
    pub fn floor_at(&self, p: PixelPos) -> Option<Floor> {
        floor::locate(self.floor_objects(), p)
    }

    /// The floor containing the top-left pixel of `room`, if any.
    pub fn floor_of_room(&self, room: RoomPos) -> Option<Floor> {
        self.floor_at(room.to_pixel())
    }

    /// The tile of the floor layer at `room`.
    pub fn tile_at(&self, room: RoomPos) -> KgResult<Tile> {
        let layers = self
            .tile_layers
            .iter()
            .filter(|l| l.name == self.schema.floor_layer);
        tile::resolve(layers, room)
            .inspect_err(|e| tracing::warn!(error = %e, "tile lookup failed"))
    }
}

fn parse_object_group(node: Node<'_, '_>) -> KgResult<ObjectGroup> {
    let name = node.attribute("name").unwrap_or_default().to_string();
    let objects = node
        .children()
        .filter(|n| n.has_tag_name("object"))
        .map(parse_object)
        .collect::<KgResult<Vec<_>>>()?;
    Ok(ObjectGroup { name, objects })
}

fn parse_object(node: Node<'_, '_>) -> KgResult<MapObject> {
    let x = required_int(node, "x")?;
    let y = required_int(node, "y")?;
    let width = optional_int(node, "width")?.unwrap_or(0);
    let height = optional_int(node, "height")?.unwrap_or(0);
    let class = node
        .attribute("class")
        .or_else(|| node.attribute("type"))
        .map(str::to_string);

    let properties = node
        .children()
        .find(|n| n.has_tag_name("properties"))
        .map(parse_properties)
        .unwrap_or_default();

    Ok(MapObject {
        name: node.attribute("name").map(str::to_string),
        position: PixelPos::new(x, y),
        width,
        height,
        class,
        properties,
    })
}

/// Property values come from the `value` attribute, or from the element
/// text when the attribute is absent or empty.
fn parse_properties(node: Node<'_, '_>) -> Properties {
    node.children()
        .filter(|n| n.has_tag_name("property"))
        .filter_map(|prop| {
            let name = prop.attribute("name")?;
            let value = match prop.attribute("value") {
                Some(v) if !v.is_empty() => v,
                _ => prop.text().unwrap_or_default(),
            };
            Some((name, value))
        })
        .collect()
}

fn parse_tile_layer(node: Node<'_, '_>) -> KgResult<TileLayer> {
    let name = node.attribute("name").unwrap_or_default().to_string();
    let mut chunks = Vec::new();
    for data in node.children().filter(|n| n.has_tag_name("data")) {
        for chunk in data.children().filter(|n| n.has_tag_name("chunk")) {
            let origin = RoomPos::new(required_int(chunk, "x")?, required_int(chunk, "y")?);
            let ids = tile::parse_chunk_data(chunk.text().unwrap_or_default())
                .map_err(KgError::MalformedDocument)?;
            chunks.push(Chunk { origin, ids });
        }
    }
    Ok(TileLayer { name, chunks })
}

fn required_int(node: Node<'_, '_>, attr: &str) -> KgResult<i64> {
    optional_int(node, attr)?.ok_or_else(|| {
        KgError::MalformedDocument(format!(
            "<{}> is missing attribute `{attr}`",
            node.tag_name().name()
        ))
    })
}

/// Integers may be written with a fractional part; they are floored.
fn optional_int(node: Node<'_, '_>, attr: &str) -> KgResult<Option<i64>> {
    let Some(raw) = node.attribute(attr) else {
        return Ok(None);
    };
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(Some(v));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| Some(v.floor() as i64))
        .ok_or_else(|| {
            KgError::MalformedDocument(format!(
                "attribute `{attr}` of <{}> is not a number: \"{raw}\"",
                node.tag_name().name()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" infinite="1">
 <layer id="1" name="пол" width="16" height="16">
  <data encoding="csv">
   <chunk x="0" y="0" width="16" height="16">
1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
5,3,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0
</chunk>
  </data>
 </layer>
 <objectgroup id="2" name="этажи">
  <object id="1" name="Подвал" x="0" y="0" width="64" height="64"/>
 </objectgroup>
 <objectgroup id="3" name="средний">
  <object id="2" name="Гоблин" class="НПЦ" x="10.5" y="4"/>
  <object id="3" x="40" y="40">
   <properties>
    <property name="Скрыт" type="bool" value="true"/>
    <property name="Описание">многострочный
текст</property>
    <property name="Пусто" value=""/>
   </properties>
  </object>
 </objectgroup>
 <objectgroup id="4" name="заметки">
  <object id="4" name="Гоблин" x="999" y="999"/>
 </objectgroup>
</map>
"#;

    #[test]
    fn parse_groups_and_layers() {
        let doc = Document::parse(MAP).unwrap();
        assert_eq!(doc.object_groups().len(), 3);
        assert_eq!(doc.tile_layers().len(), 1);
        assert_eq!(doc.tile_layers()[0].chunks.len(), 1);
        assert_eq!(doc.render_objects().count(), 2);
        assert!(doc.modified().is_none());
    }

    #[test]
    fn find_object_searches_render_layers_only() {
        let doc = Document::parse(MAP).unwrap();
        let goblin = doc.find_object("Гоблин").unwrap();
        assert_eq!(goblin.position, PixelPos::new(10, 4));
        assert_eq!(goblin.class.as_deref(), Some("НПЦ"));
        assert!(doc.find_object("Подвал").is_none());
    }

    #[test]
    fn property_text_used_when_value_missing() {
        let doc = Document::parse(MAP).unwrap();
        let hidden = doc.render_objects().nth(1).unwrap();
        assert_eq!(hidden.display_name(), "???");
        assert!(hidden.properties.is_true("Скрыт"));
        assert_eq!(
            hidden.properties.get("Описание"),
            Some("многострочный\nтекст")
        );
        assert_eq!(hidden.properties.get("Пусто"), Some(""));
    }

    #[test]
    fn floors_and_tiles() {
        let doc = Document::parse(MAP).unwrap();
        assert_eq!(doc.floor_at(PixelPos::new(63, 63)).unwrap().name, "Подвал");
        assert!(doc.floor_at(PixelPos::new(64, 0)).is_none());
        assert_eq!(doc.tile_at(RoomPos::new(0, 1)).unwrap(), Tile::Event);
        assert_eq!(doc.tile_at(RoomPos::new(1, 1)).unwrap(), Tile::Enemy);
        assert!(doc.tile_at(RoomPos::new(16, 0)).is_err());
    }

    #[test]
    fn other_tile_layers_are_not_decoded() {
        let xml = r#"<map infinite="1">
 <layer name="декор">
  <data encoding="base64" compression="zlib"><chunk x="0" y="0" width="16" height="16">eJxjYBgFo2AUjAIAAQAAAQ==</chunk></data>
 </layer>
 <layer name="пол">
  <data encoding="csv"><chunk x="0" y="0" width="16" height="16">5</chunk></data>
 </layer>
 <objectgroup name="средний">
  <object name="Вася" x="4" y="4"><properties><property name="Инвентарь" value="27ж"/></properties></object>
 </objectgroup>
</map>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.tile_layers().len(), 1);
        assert_eq!(doc.tile_layers()[0].name, "пол");
        assert_eq!(doc.tile_at(RoomPos::new(0, 0)).unwrap(), Tile::Event);
        assert_eq!(doc.inventory_of("Вася").unwrap().len(), 1);
    }

    #[test]
    fn missing_coordinate_is_malformed() {
        let xml = r#"<map><objectgroup name="нижний"><object name="a" y="1"/></objectgroup></map>"#;
        let err = Document::parse(xml).unwrap_err();
        assert!(matches!(err, KgError::MalformedDocument(_)));
    }

    #[test]
    fn invalid_xml_is_reported() {
        assert!(matches!(Document::parse("<map>"), Err(KgError::Xml(_))));
    }
}
