/// Property keys read from map objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKeys {
    /// External identifier of the player owning the object.
    pub player_id: String,
    /// Newline-separated inventory lines.
    pub inventory: String,
    /// Hit points as `cur/max (true)`.
    pub hp: String,
    /// Mana points as `cur/max (true)`.
    pub mp: String,
    /// Soul points.
    pub sp: String,
    /// Remaining rerolls.
    pub rerolls: String,
    /// Newline-separated active abilities.
    pub active_abilities: String,
    /// Newline-separated passive abilities.
    pub passive_abilities: String,
    /// Character level.
    pub level: String,
    /// Frag count description.
    pub frags: String,
    /// Group label shared by party members.
    pub group: String,
    /// Blindness flag.
    pub blind: String,
    /// Hidden-object flag.
    pub hidden: String,
    /// Name of the object's owner.
    pub owner: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            player_id: "ID игрока".into(),
            inventory: "Инвентарь".into(),
            hp: "Очки Здоровья".into(),
            mp: "Очки Маны".into(),
            sp: "Очки Души".into(),
            rerolls: "Рероллы".into(),
            active_abilities: "Навыки".into(),
            passive_abilities: "Особенности".into(),
            level: "Уровень".into(),
            frags: "Фраги".into(),
            group: "Группа".into(),
            blind: "Ослеплён".into(),
            hidden: "Скрыт".into(),
            owner: "Владелец".into(),
        }
    }
}

/// Reserved names that give structure to a map document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSchema {
    /// Object groups holding renderable objects, bottom to top.
    pub render_layers: Vec<String>,
    /// Object group holding floor rectangles.
    pub floors_group: String,
    /// Tile layer holding room kinds.
    pub floor_layer: String,
    /// Property keys read from objects.
    pub keys: PropertyKeys,
}

impl Default for MapSchema {
    fn default() -> Self {
        Self {
            render_layers: vec!["нижний".into(), "средний".into(), "верхний".into()],
            floors_group: "этажи".into(),
            floor_layer: "пол".into(),
            keys: PropertyKeys::default(),
        }
    }
}

impl MapSchema {
    /// Set the object groups that hold renderable objects.
    pub fn with_render_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.render_layers = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the object group holding floor rectangles.
    pub fn with_floors_group(mut self, name: impl Into<String>) -> Self {
        self.floors_group = name.into();
        self
    }

    /// Set the tile layer holding room kinds.
    pub fn with_floor_layer(mut self, name: impl Into<String>) -> Self {
        self.floor_layer = name.into();
        self
    }

    /// Replace the property keys.
    pub fn with_keys(mut self, keys: PropertyKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Return `true` if `group` is one of the render layers.
    pub fn is_render_layer(&self, group: &str) -> bool {
        self.render_layers.iter().any(|l| l == group)
    }
}
