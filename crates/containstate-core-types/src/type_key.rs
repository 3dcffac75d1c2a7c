//! Runtime type identity
//!
//! A `TypeKey` names the runtime type of an introspected value. The
//! comparator classifies values by key: atomic keys are compared by
//! equality, everything else is decomposed into elements or attributes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identity of a runtime type, as far as containment cares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKey {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    Char,
    F32,
    F64,
    String,
    /// A universally unique identifier
    Uuid,
    /// An absolute point in time
    Timestamp,
    /// A span of time
    Duration,
    /// The optional wrapper of another type
    Nullable(Box<TypeKey>),
    /// An ordered, enumerable collection with the given type name
    Sequence(Cow<'static, str>),
    /// A value exposing named attributes, with the given type name
    Record(Cow<'static, str>),
}

impl TypeKey {
    /// Every primitive key, in declaration order
    pub const PRIMITIVES: [TypeKey; 20] = [
        TypeKey::Bool,
        TypeKey::I8,
        TypeKey::I16,
        TypeKey::I32,
        TypeKey::I64,
        TypeKey::I128,
        TypeKey::Isize,
        TypeKey::U8,
        TypeKey::U16,
        TypeKey::U32,
        TypeKey::U64,
        TypeKey::U128,
        TypeKey::Usize,
        TypeKey::Char,
        TypeKey::F32,
        TypeKey::F64,
        TypeKey::String,
        TypeKey::Uuid,
        TypeKey::Timestamp,
        TypeKey::Duration,
    ];

    /// Wrap this key in `Nullable`
    pub fn nullable(self) -> Self {
        TypeKey::Nullable(Box::new(self))
    }

    /// Whether this key wraps another in `Nullable`
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeKey::Nullable(_))
    }

    /// Key for a sequence type
    pub fn sequence(name: impl Into<Cow<'static, str>>) -> Self {
        TypeKey::Sequence(name.into())
    }

    /// Key for a record type
    pub fn record(name: impl Into<Cow<'static, str>>) -> Self {
        TypeKey::Record(name.into())
    }

    /// Readable name of the type
    pub fn name(&self) -> Cow<'_, str> {
        let fixed = match self {
            TypeKey::Bool => "bool",
            TypeKey::I8 => "i8",
            TypeKey::I16 => "i16",
            TypeKey::I32 => "i32",
            TypeKey::I64 => "i64",
            TypeKey::I128 => "i128",
            TypeKey::Isize => "isize",
            TypeKey::U8 => "u8",
            TypeKey::U16 => "u16",
            TypeKey::U32 => "u32",
            TypeKey::U64 => "u64",
            TypeKey::U128 => "u128",
            TypeKey::Usize => "usize",
            TypeKey::Char => "char",
            TypeKey::F32 => "f32",
            TypeKey::F64 => "f64",
            TypeKey::String => "String",
            TypeKey::Uuid => "Uuid",
            TypeKey::Timestamp => "Timestamp",
            TypeKey::Duration => "Duration",
            TypeKey::Nullable(inner) => return Cow::Owned(format!("Option<{}>", inner.name())),
            TypeKey::Sequence(name) | TypeKey::Record(name) => return Cow::Borrowed(name.as_ref()),
        };
        Cow::Borrowed(fixed)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
