//! Macros for building values and describing types.
//!
//! - [`value!`](crate::value!) builds a [`Value`](crate::Value) from JSON-like syntax
//! - [`impl_describe!`](crate::impl_describe!) implements [`Describe`](crate::Describe)
//!   for an existing struct or unit enum
//! - [`describe!`](crate::describe!) declares a struct and describes it in one go

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Any other expression is converted through [`to_value`](crate::to_value),
/// falling back to `Null` when it cannot be represented.
///
/// ```rust
/// use serde_shape::{value, Value};
///
/// let v = value!({ "id": 7, "tags": ["a", "b"], "parent": null });
/// assert_eq!(v.get("parent"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}

/// Implements [`Describe`](crate::Describe) for an existing type.
///
/// For a struct, list its fields with their types in declaration order; the
/// attribute names must match the names the type serializes under. For a
/// fieldless enum, use the `enum` form: unit variants travel as quoted names.
///
/// ```rust
/// use serde_shape::{impl_describe, Describe, ScalarKind, TypeDescriptor};
///
/// struct Point { x: f64, y: f64 }
/// impl_describe!(Point { x: f64, y: f64 });
///
/// enum Axis { X, Y }
/// impl_describe!(enum Axis);
///
/// assert_eq!(Point::descriptor().name(), "Point");
/// assert_eq!(Axis::descriptor(), TypeDescriptor::Scalar(ScalarKind::String));
/// ```
#[macro_export]
macro_rules! impl_describe {
    (enum $name:ident) => {
        impl $crate::Describe for $name {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Scalar($crate::ScalarKind::String)
            }
        }
    };

    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        impl $crate::Describe for $name {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Composite($crate::CompositeDescriptor::new(
                    stringify!($name),
                    vec![
                        $(
                            $crate::Attribute::new(
                                stringify!($field),
                                <$ty as $crate::Describe>::descriptor,
                            )
                        ),*
                    ],
                ))
            }
        }
    };
}

/// Declares a struct and implements [`Describe`](crate::Describe) for it.
///
/// Field attributes are passed through unchanged, so a `#[serde(rename)]`
/// would put the encoded name out of step with the described one.
///
/// ```rust
/// use serde_shape::{describe, Describe};
///
/// describe! {
///     #[derive(Debug, Default)]
///     pub struct Node {
///         pub id: u32,
///         pub next: Option<Box<Node>>,
///     }
/// }
///
/// let descriptor = Node::descriptor();
/// assert_eq!(descriptor.name(), "Node");
/// ```
#[macro_export]
macro_rules! describe {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field : $ty
            ),*
        }

        $crate::impl_describe!($name { $($field : $ty),* });
    };
}
