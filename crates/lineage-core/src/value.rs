//! Dynamically typed values passed through callback chains.

use std::fmt;

use crate::error::ValueError;
use crate::id::AnyHandle;

/// Type tag of an [`AnyValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// `bool`.
    Bool,
    /// `char`.
    Char,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// `i32`.
    I32,
    /// `u32`.
    U32,
    /// Owned string.
    String,
    /// Handle to a live (or formerly live) entity.
    Entity,
}

impl Datatype {
    /// Name used in console input and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::String => "string",
            Self::Entity => "entity",
        }
    }

    /// Parse a type name as produced by [`Datatype::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => Self::Bool,
            "char" => Self::Char,
            "float" => Self::Float,
            "double" => Self::Double,
            "i32" => Self::I32,
            "u32" => Self::U32,
            "string" => Self::String,
            "entity" => Self::Entity,
            _ => return None,
        })
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One opaque typed value.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyValue {
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Owned string.
    String(String),
    /// Entity reference. Weak: holding it never keeps the entity alive.
    Entity(AnyHandle),
}

impl AnyValue {
    /// The type tag of this value.
    pub fn datatype(&self) -> Datatype {
        match self {
            Self::Bool(_) => Datatype::Bool,
            Self::Char(_) => Datatype::Char,
            Self::Float(_) => Datatype::Float,
            Self::Double(_) => Datatype::Double,
            Self::I32(_) => Datatype::I32,
            Self::U32(_) => Datatype::U32,
            Self::String(_) => Datatype::String,
            Self::Entity(_) => Datatype::Entity,
        }
    }

    /// Parse `text` as a value of `datatype`.
    ///
    /// Entity handles cannot be parsed from text; they come from a
    /// registry lookup instead.
    pub fn parse(datatype: Datatype, text: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::Unparsable {
            datatype,
            text: text.to_string(),
        };
        let trimmed = text.trim();
        Ok(match datatype {
            Datatype::Bool => Self::Bool(trimmed.parse().map_err(|_| invalid())?),
            Datatype::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(invalid()),
                }
            }
            Datatype::Float => Self::Float(trimmed.parse().map_err(|_| invalid())?),
            Datatype::Double => Self::Double(trimmed.parse().map_err(|_| invalid())?),
            Datatype::I32 => Self::I32(trimmed.parse().map_err(|_| invalid())?),
            Datatype::U32 => Self::U32(trimmed.parse().map_err(|_| invalid())?),
            Datatype::String => Self::String(text.to_string()),
            Datatype::Entity => return Err(ValueError::NotParsable { datatype }),
        })
    }

    /// The `i32` payload, if this is an `I32`.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Self::I32(v) => Some(v),
            _ => None,
        }
    }

    /// The `u32` payload, if this is a `U32`.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Self::U32(v) => Some(v),
            _ => None,
        }
    }

    /// The `f32` payload, if this is a `Float`.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// The `f64` payload, if this is a `Double`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Double(v) => Some(v),
            _ => None,
        }
    }

    /// The `bool` payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// The string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The entity handle, if this is an `Entity`.
    pub fn as_entity(&self) -> Option<AnyHandle> {
        match *self {
            Self::Entity(h) => Some(h),
            _ => None,
        }
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Entity(h) => write!(f, "{h}"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for AnyValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    char => Char,
    f32 => Float,
    f64 => Double,
    i32 => I32,
    u32 => U32,
    String => String,
    AnyHandle => Entity,
}

impl From<&str> for AnyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
