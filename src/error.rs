//! Error types for encoding and decoding.
//!
//! Every failure is reported to the immediate caller as a typed [`Error`];
//! nothing is retried or swallowed.
//!
//! ## Error Categories
//!
//! - **DepthExceeded**: Composite nesting went past the configured bound
//!   (most likely a cyclic object graph)
//! - **MalformedInput**: Text does not have the bracketing expected for the target type
//! - **Coercion**: Scalar text does not parse into the target scalar kind
//! - **UnknownAttribute**: Text names an attribute the target composite does not declare
//! - **UnsupportedType**: A value or descriptor the codec cannot represent
//!
//! ## Examples
//!
//! ```rust
//! use serde_shape::{decode, Error, ScalarKind, TypeDescriptor};
//!
//! let result = decode("forty-two", &TypeDescriptor::Scalar(ScalarKind::I32));
//! assert!(matches!(result, Err(Error::Coercion { .. })));
//! ```

use crate::descriptor::ScalarKind;
use std::fmt;
use thiserror::Error;

/// Longest slice of offending input quoted back in an error message.
const SNIPPET_LEN: usize = 48;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Composite nesting exceeded the configured bound
    #[error("Nesting depth exceeded: more than {max} nested levels (possible cyclic object graph)")]
    DepthExceeded { max: usize },

    /// Text does not match the structure expected for the target type
    #[error("Malformed input: expected {expected}, found `{found}`")]
    MalformedInput { expected: String, found: String },

    /// Scalar text could not be coerced into the target kind
    #[error("Cannot coerce `{text}` into {kind}")]
    Coercion { text: String, kind: ScalarKind },

    /// The text references an attribute the target type does not declare
    #[error("Unknown attribute `{name}` for type {type_name}")]
    UnknownAttribute { name: String, type_name: String },

    /// Type cannot be represented by this codec
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed-input error, quoting a bounded snippet of `found`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_shape::Error;
    ///
    /// let err = Error::malformed("`{` ... `}`", "[1, 2]");
    /// assert!(err.to_string().contains("[1, 2]"));
    /// ```
    pub fn malformed(expected: &str, found: &str) -> Self {
        Error::MalformedInput {
            expected: expected.to_string(),
            found: snippet(found),
        }
    }

    /// Creates a coercion error naming the offending text and target kind.
    pub fn coercion(text: &str, kind: ScalarKind) -> Self {
        Error::Coercion {
            text: snippet(text),
            kind,
        }
    }

    /// Creates an unknown-attribute error.
    pub fn unknown_attribute(name: &str, type_name: &str) -> Self {
        Error::UnknownAttribute {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    /// Creates a depth error for the given bound.
    pub fn depth_exceeded(max: usize) -> Self {
        Error::DepthExceeded { max }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(SNIPPET_LEN) {
        Some((end, _)) => format!("{}...", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates_long_input() {
        let long = "x".repeat(200);
        let err = Error::malformed("`[` ... `]`", &long);
        match err {
            Error::MalformedInput { found, .. } => {
                assert!(found.ends_with("..."));
                assert_eq!(found.len(), SNIPPET_LEN + 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let text = "é".repeat(100);
        let err = Error::coercion(&text, ScalarKind::I32);
        assert!(err.to_string().contains("i32"));
    }

    #[test]
    fn test_messages_name_the_problem() {
        assert!(Error::depth_exceeded(10).to_string().contains("10"));
        assert!(Error::unknown_attribute("ghost", "Person")
            .to_string()
            .contains("`ghost`"));
    }
}
