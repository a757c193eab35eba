use kg_core::KgError;

/// Alias for `Result<T, RenderError>`.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a view of the map.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The underlying map query failed.
    #[error(transparent)]
    Map(#[from] KgError),

    /// Every fallback glyph is already taken.
    #[error("no free glyph left for `{0}`")]
    GlyphsExhausted(String),
}
