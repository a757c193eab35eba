use std::path::PathBuf;

/// Alias for `Result<T, KgError>`.
pub type KgResult<T> = Result<T, KgError>;

/// Errors that can occur when reading or querying a map document.
#[derive(Debug, thiserror::Error)]
pub enum KgError {
    /// The map file could not be read.
    #[error("cannot read map file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The map file is not well-formed XML.
    #[error("malformed map XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The XML is well-formed but does not have the expected map shape.
    #[error("malformed map document: {0}")]
    MalformedDocument(String),

    /// No object with the requested name exists in the render layers.
    #[error("no object with name `{0}` found")]
    NotFound(String),

    /// The object exists but belongs to a different external identity.
    #[error("ID `{expected}` expected for `{name}`, got `{got}` instead")]
    IdentityMismatch {
        /// Name of the object that was looked up.
        name: String,
        /// Identifier recorded on the object.
        expected: String,
        /// Identifier supplied by the caller.
        got: String,
    },

    /// A stat property does not have its expected shape.
    #[error("malformed stat `{key}`: \"{value}\"")]
    MalformedStat {
        /// Property name.
        key: String,
        /// Raw property value.
        value: String,
    },

    /// No chunk of the floor tile layer covers the coordinate.
    #[error("unknown tile at position ({x}, {y})")]
    TileLookup {
        /// Tile column.
        x: i64,
        /// Tile row.
        y: i64,
    },

    /// A chunk holds an ID outside the tile enumeration.
    #[error("unknown tile id {id} at position ({x}, {y})")]
    UnknownTileId {
        /// The raw ID found in the chunk.
        id: u32,
        /// Tile column.
        x: i64,
        /// Tile row.
        y: i64,
    },
}
