/// Configuration for [`JsonLexer`](crate::JsonLexer).
///
/// # Examples
///
/// ```rust
/// use depthwalk::{JsonLexer, LexerOptions};
///
/// let lexer = JsonLexer::with_options(
///     "{\u{2003}}",
///     LexerOptions {
///         allow_unicode_whitespace: true,
///     },
/// );
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the lexer only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,
}

/// Configuration for the [`Cursor`](crate::Cursor) driving a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of simultaneously open containers.
    ///
    /// Decoding recurses once per nested composite or collection, so this
    /// bounds stack usage on hostile input. Opening a container beyond the
    /// limit fails with `DecodeError::DepthLimitExceeded`.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl DecodeOptions {
    /// The default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
