//! Introspected values
//!
//! `Value` is the read-only view the comparator works on: an absent value,
//! a scalar leaf, an ordered sequence, or a record of named attributes.
//! Values are produced by [`Introspect`](crate::introspect::Introspect)
//! implementations and never mutated by the comparator.

use chrono::{DateTime, Utc};
use containstate_core_types::TypeKey;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Introspected view of a value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,
    Scalar(Scalar),
    Sequence(Sequence),
    Record(Record),
}

/// Leaf value compared by equality
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    Char(char),
    F32(f32),
    F64(f64),
    String(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Duration(Duration),
}

/// Ordered elements of a sequence-like value
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    type_name: Cow<'static, str>,
    items: Vec<Value>,
}

/// Named attributes of a structured value, in enumeration order
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: Cow<'static, str>,
    attributes: Vec<(String, Value)>,
}

impl Value {
    /// Build a sequence value
    pub fn sequence(
        type_name: impl Into<Cow<'static, str>>,
        items: impl IntoIterator<Item = Value>,
    ) -> Self {
        Value::Sequence(Sequence {
            type_name: type_name.into(),
            items: items.into_iter().collect(),
        })
    }

    /// Build a record value from `(name, value)` pairs
    pub fn record<N: Into<String>>(
        type_name: impl Into<Cow<'static, str>>,
        attributes: impl IntoIterator<Item = (N, Value)>,
    ) -> Self {
        Value::Record(Record {
            type_name: type_name.into(),
            attributes: attributes
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        })
    }

    /// Runtime type identity; `None` for an absent value
    pub fn type_key(&self) -> Option<TypeKey> {
        match self {
            Value::Null => None,
            Value::Scalar(scalar) => Some(scalar.type_key()),
            Value::Sequence(sequence) => Some(TypeKey::Sequence(sequence.type_name.clone())),
            Value::Record(record) => Some(TypeKey::Record(record.type_name.clone())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl Sequence {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Record {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Attributes in enumeration order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Read an attribute by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Scalar equality
// ---------------------------------------------------------------------------

/// Numeric view used to compare integers across widths
#[derive(Clone, Copy)]
enum Numeric {
    Signed(i128),
    Unsigned(u128),
    Float(f64),
}

impl Numeric {
    fn equals(self, other: Numeric) -> bool {
        match (self, other) {
            (Numeric::Signed(a), Numeric::Signed(b)) => a == b,
            (Numeric::Unsigned(a), Numeric::Unsigned(b)) => a == b,
            (Numeric::Signed(s), Numeric::Unsigned(u)) | (Numeric::Unsigned(u), Numeric::Signed(s)) => {
                u128::try_from(s).map(|s| s == u).unwrap_or(false)
            }
            // NaN equals NaN so every scalar is equal to itself
            (Numeric::Float(a), Numeric::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl Scalar {
    /// Runtime type identity of this scalar
    pub fn type_key(&self) -> TypeKey {
        match self {
            Scalar::Bool(_) => TypeKey::Bool,
            Scalar::I8(_) => TypeKey::I8,
            Scalar::I16(_) => TypeKey::I16,
            Scalar::I32(_) => TypeKey::I32,
            Scalar::I64(_) => TypeKey::I64,
            Scalar::I128(_) => TypeKey::I128,
            Scalar::Isize(_) => TypeKey::Isize,
            Scalar::U8(_) => TypeKey::U8,
            Scalar::U16(_) => TypeKey::U16,
            Scalar::U32(_) => TypeKey::U32,
            Scalar::U64(_) => TypeKey::U64,
            Scalar::U128(_) => TypeKey::U128,
            Scalar::Usize(_) => TypeKey::Usize,
            Scalar::Char(_) => TypeKey::Char,
            Scalar::F32(_) => TypeKey::F32,
            Scalar::F64(_) => TypeKey::F64,
            Scalar::String(_) => TypeKey::String,
            Scalar::Uuid(_) => TypeKey::Uuid,
            Scalar::Timestamp(_) => TypeKey::Timestamp,
            Scalar::Duration(_) => TypeKey::Duration,
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        let numeric = match *self {
            Scalar::I8(v) => Numeric::Signed(v.into()),
            Scalar::I16(v) => Numeric::Signed(v.into()),
            Scalar::I32(v) => Numeric::Signed(v.into()),
            Scalar::I64(v) => Numeric::Signed(v.into()),
            Scalar::I128(v) => Numeric::Signed(v),
            Scalar::Isize(v) => Numeric::Signed(v as i128),
            Scalar::U8(v) => Numeric::Unsigned(v.into()),
            Scalar::U16(v) => Numeric::Unsigned(v.into()),
            Scalar::U32(v) => Numeric::Unsigned(v.into()),
            Scalar::U64(v) => Numeric::Unsigned(v.into()),
            Scalar::U128(v) => Numeric::Unsigned(v),
            Scalar::Usize(v) => Numeric::Unsigned(v as u128),
            Scalar::F32(v) => Numeric::Float(v.into()),
            Scalar::F64(v) => Numeric::Float(v),
            _ => return None,
        };
        Some(numeric)
    }
}

/// Natural equality of scalar representations
///
/// Integers are equal when they denote the same number whatever their
/// width. Identifiers and timestamps also equal their canonical text, which
/// is how they appear once a value has passed through JSON.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.numeric(), other.numeric()) {
            return a.equals(b);
        }
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Uuid(a), Scalar::Uuid(b)) => a == b,
            (Scalar::Uuid(id), Scalar::String(text)) | (Scalar::String(text), Scalar::Uuid(id)) => {
                Uuid::parse_str(text).map(|parsed| parsed == *id).unwrap_or(false)
            }
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => a == b,
            (Scalar::Timestamp(at), Scalar::String(text))
            | (Scalar::String(text), Scalar::Timestamp(at)) => DateTime::parse_from_rfc3339(text)
                .map(|parsed| parsed.with_timezone(&Utc) == *at)
                .unwrap_or(false),
            (Scalar::Duration(a), Scalar::Duration(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::I128(v) => write!(f, "{}", v),
            Scalar::Isize(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::U128(v) => write!(f, "{}", v),
            Scalar::Usize(v) => write!(f, "{}", v),
            Scalar::Char(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::String(v) => f.write_str(v),
            Scalar::Uuid(v) => write!(f, "{}", v.hyphenated()),
            Scalar::Timestamp(v) => f.write_str(&v.to_rfc3339()),
            Scalar::Duration(v) => write!(f, "{:?}", v),
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostic serialization
// ---------------------------------------------------------------------------

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(v) => serializer.serialize_bool(*v),
            Scalar::I8(v) => serializer.serialize_i8(*v),
            Scalar::I16(v) => serializer.serialize_i16(*v),
            Scalar::I32(v) => serializer.serialize_i32(*v),
            Scalar::I64(v) => serializer.serialize_i64(*v),
            Scalar::I128(v) => serializer.serialize_i128(*v),
            Scalar::Isize(v) => serializer.serialize_i64(*v as i64),
            Scalar::U8(v) => serializer.serialize_u8(*v),
            Scalar::U16(v) => serializer.serialize_u16(*v),
            Scalar::U32(v) => serializer.serialize_u32(*v),
            Scalar::U64(v) => serializer.serialize_u64(*v),
            Scalar::U128(v) => serializer.serialize_u128(*v),
            Scalar::Usize(v) => serializer.serialize_u64(*v as u64),
            Scalar::Char(v) => serializer.serialize_char(*v),
            Scalar::F32(v) => serializer.serialize_f32(*v),
            Scalar::F64(v) => serializer.serialize_f64(*v),
            Scalar::String(v) => serializer.serialize_str(v),
            Scalar::Uuid(_) | Scalar::Timestamp(_) | Scalar::Duration(_) => {
                serializer.collect_str(self)
            }
        }
    }
}

/// Serializes as natural JSON: null, scalar, array or object
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Sequence(sequence) => {
                let mut seq = serializer.serialize_seq(Some(sequence.items.len()))?;
                for item in &sequence.items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.attributes.len()))?;
                for (name, value) in &record.attributes {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}
