//! Text Format Reference
//!
//! This module documents the text form read and written by this library.
//!
//! # Overview
//!
//! The format is a JSON-like notation with three shapes: scalars, sequences
//! and composites. It is written from any `Serialize` value and read back
//! against a [`TypeDescriptor`](crate::TypeDescriptor), never by guessing.
//!
//! # Grammar
//!
//! ```text
//! value     := "null" | scalar | sequence | composite
//! sequence  := "[" [ value { "," value } ] "]"
//! composite := "{" [ pair { "," pair } ] "}"
//! pair      := quoted-name ":" value
//! ```
//!
//! Whitespace around any token is ignored when reading.
//!
//! ## Composites
//!
//! ```text
//! {"name": "Ada", "age": 36, "manager": null}
//! ```
//!
//! **Rules**:
//! - Attributes are written in the order the type reports them
//! - Every name read must be an attribute of the target composite, otherwise
//!   decoding fails with [`Error::UnknownAttribute`](crate::Error::UnknownAttribute)
//! - Attributes missing from the text are left out of the decoded value
//! - A repeated name overwrites the earlier one
//! - Map keys must be strings or chars
//!
//! ## Sequences
//!
//! ```text
//! [[true, false], [false, true]]
//! [[["a", null], null], [["b"]]]
//! ```
//!
//! Elements are decoded against the element descriptor, one rank down. Rows
//! of a multi-rank sequence may differ in length, and any element (including
//! a whole row) may be `null`.
//!
//! # Scalars
//!
//! | Kind | Written as | Example |
//! |------|-----------|---------|
//! | Null | `null` | `"manager": null` |
//! | Boolean | `true` or `false` | `"active": true` |
//! | Integer | Decimal digits, optional `-` | `"count": -42` |
//! | Float | Rust's shortest round-trip form, never an exponent | `"price": 19.99` |
//! | Char | One character in double quotes | `"sex": "F"` |
//! | String | Double quotes, no escaping | `"name": "Ada"` |
//! | Date | RFC 3339 in double quotes, UTC | `"hired": "2024-01-15T10:30:00Z"` |
//! | Unit enum variant | Variant name in double quotes | `"level": "High"` |
//!
//! Reading a scalar trims the token, maps `null` to
//! [`Value::Null`](crate::Value::Null), and for string, char and date kinds
//! strips one layer of double quotes. Integer text outside the target width
//! fails with [`Error::Coercion`](crate::Error::Coercion). Booleans accept
//! only the exact literals `true` and `false`. Float kinds accept plain
//! decimal text only: an optional sign, digits and at most one point, so
//! `1e5`, `inf` and `NaN` fail with a coercion error.
//!
//! # Pretty Output
//!
//! With [`CodecOptions::pretty`](crate::CodecOptions::pretty), composites put
//! each attribute on its own line, indented by
//! [`CodecOptions::indent`](crate::CodecOptions::indent) spaces per level.
//! Sequences stay on one line.
//!
//! ```text
//! {
//!   "name": "Ada",
//!   "scores": [1, 2, 3],
//!   "manager": {
//!     "name": "Grace"
//!   }
//! }
//! ```
//!
//! # Nesting Bounds
//!
//! - **Encoding**: at most [`CodecOptions::max_depth`](crate::CodecOptions::max_depth)
//!   composites (10 by default) may be open at once; sequences do not count
//! - **Decoding**: at most [`CodecOptions::max_nesting`](crate::CodecOptions::max_nesting)
//!   containers (64 by default) may be open at once
//!
//! Either bound fails with [`Error::DepthExceeded`](crate::Error::DepthExceeded).
//!
//! # Limitations
//!
//! - **Escapes**: strings are written verbatim, so a string holding a double
//!   quote cannot be read back reliably
//! - **Enums**: only unit variants are supported
//! - **Map keys**: must be strings or chars
//! - **Maps on decode**: `BTreeMap` and `HashMap` encode as composites, but
//!   they have no [`Describe`](crate::Describe) impl since a composite
//!   descriptor lists its attribute names up front. Decode map-shaped text
//!   into a [`describe!`](crate::describe) type that names the keys
//! - **Special floats**: `NaN` and infinities are written as `null`, so they
//!   read back as `None` through an `Option` and fail for a bare float
//! - **Comments**: not supported in the format

// This module contains only documentation; no implementation code
