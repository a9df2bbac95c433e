//! Configuration options for encoding and decoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_shape::{to_string_with_options, CodecOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let options = CodecOptions::pretty().with_indent(4);
//! let text = to_string_with_options(&Data { x: 1, y: 2 }, options).unwrap();
//! assert_eq!(text, "{\n    \"x\": 1,\n    \"y\": 2\n}");
//! ```

/// Default bound on nested composites while encoding.
pub const MAX_COMPOSITE_DEPTH: usize = 10;

/// Default bound on total nesting (composites and sequences) while decoding.
pub const MAX_NESTING: usize = 64;

/// Configuration options for the codec.
///
/// # Examples
///
/// ```rust
/// use serde_shape::CodecOptions;
///
/// let options = CodecOptions::new();
/// assert_eq!(options.max_depth, 10);
/// assert!(!options.pretty);
///
/// let options = CodecOptions::pretty().with_max_depth(32);
/// assert!(options.pretty);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CodecOptions {
    pub indent: usize,
    pub pretty: bool,
    /// Composites (structs and maps) that may be nested while encoding.
    pub max_depth: usize,
    /// Containers that may be nested while decoding.
    pub max_nesting: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            indent: 2,
            pretty: false,
            max_depth: MAX_COMPOSITE_DEPTH,
            max_nesting: MAX_NESTING,
        }
    }
}

impl CodecOptions {
    /// Creates default options (compact output, depth bound of 10).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for multi-line output with one attribute per line.
    #[must_use]
    pub fn pretty() -> Self {
        CodecOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets how many composites may be nested while encoding.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets how many containers may be nested while decoding.
    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}
