//! Scalar kinds and string coercion.

use crate::error::{ConfigError, Result};
use std::fmt;
use std::num::ParseIntError;

/// The coercion kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Base-10 integer of any width
    Int,
    /// String used verbatim
    Str,
    /// Boolean from the conventional truthy/falsy token set
    Bool,
    /// Any other type; carries the Rust type name
    Unsupported(&'static str),
}

impl Kind {
    /// Help text for a field of this kind, optionally prefixed by a tag message.
    pub fn help(self, message: Option<&str>) -> String {
        let noun = match self {
            Self::Int => "an int value",
            Self::Str => "a string value",
            Self::Bool => "a bool value",
            Self::Unsupported(_) => return "unknown flag kind".to_string(),
        };
        match message {
            Some(m) => format!("{m}, {noun}"),
            None => format!("set {noun}"),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Str => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Unsupported(ty) => write!(f, "{ty}"),
        }
    }
}

/// An integer field that can be assigned from a base-10 string.
///
/// Implemented for every primitive integer type; the target width decides
/// the accepted range.
pub trait Integer {
    /// Parse `raw` and store it.
    fn set_from_str(&mut self, raw: &str) -> std::result::Result<(), ParseIntError>;
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Integer for $ty {
                fn set_from_str(&mut self, raw: &str) -> std::result::Result<(), ParseIntError> {
                    *self = raw.parse()?;
                    Ok(())
                }
            }

            impl AsSlot for $ty {
                fn as_slot(&mut self) -> Slot<'_> {
                    Slot::Int(self)
                }
            }
        )*
    };
}

/// A mutable view of one field's storage, tagged by kind.
pub enum Slot<'a> {
    /// Integer storage
    Int(&'a mut dyn Integer),
    /// String storage
    Str(&'a mut String),
    /// Boolean storage
    Bool(&'a mut bool),
    /// Storage this crate cannot assign to
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// The coercion kind of this slot.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Int,
            Self::Str(_) => Kind::Str,
            Self::Bool(_) => Kind::Bool,
            Self::Unsupported(ty) => Kind::Unsupported(*ty),
        }
    }

    /// Coerce `raw` into this slot's kind and store it.
    ///
    /// `field` is only used to label errors.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidInt`] if an int slot gets a malformed or out-of-range value
    /// - [`ConfigError::InvalidBool`] if a bool slot gets an unknown token
    /// - [`ConfigError::UnknownFlagType`] for unsupported slots
    pub fn set(&mut self, field: &str, raw: &str) -> Result<()> {
        match self {
            Self::Int(target) => target
                .set_from_str(raw)
                .map_err(|source| ConfigError::InvalidInt {
                    field: field.to_string(),
                    value: raw.to_string(),
                    source,
                }),
            Self::Str(target) => {
                **target = raw.to_string();
                Ok(())
            }
            Self::Bool(target) => {
                **target = parse_bool(raw).ok_or_else(|| ConfigError::InvalidBool {
                    field: field.to_string(),
                    value: raw.to_string(),
                })?;
                Ok(())
            }
            Self::Unsupported(kind) => Err(ConfigError::UnknownFlagType {
                field: field.to_string(),
                kind: *kind,
            }),
        }
    }
}

/// Parse the conventional boolean token set.
///
/// Accepts `1 t T true TRUE True` and `0 f F false FALSE False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Types that can be exposed as a [`Slot`].
///
/// The [`record!`](crate::record) macro calls this for every field, so each
/// field type of a record must implement it.
pub trait AsSlot {
    /// Borrow `self` as a slot.
    fn as_slot(&mut self) -> Slot<'_>;
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl AsSlot for String {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Str(self)
    }
}

impl AsSlot for bool {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

macro_rules! impl_unsupported {
    ($($ty:ty),*) => {
        $(
            impl AsSlot for $ty {
                fn as_slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported(std::any::type_name::<$ty>())
                }
            }
        )*
    };
}

impl_unsupported!(f32, f64, char);

impl<T> AsSlot for Vec<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(std::any::type_name::<Self>())
    }
}

impl<T> AsSlot for Option<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(std::any::type_name::<Self>())
    }
}
