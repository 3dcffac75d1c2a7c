//! Introspection capability
//!
//! The comparator never looks at Rust types directly. Anything that can
//! describe itself as a [`Value`] (its type identity, its ordered elements
//! or its named readable attributes) can take part in a comparison.
//!
//! Implementations are provided for primitives, strings, identifiers, time
//! types, the ordered std collections, keyed maps, `serde_json::Value` and,
//! through [`Serialized`], any `serde::Serialize` type. Plain structs can use
//! the [`introspect_record!`](crate::introspect_record) macro.

use crate::errors::IntrospectError;
use crate::value::{Scalar, Value};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

/// A value that can describe its observable state
pub trait Introspect {
    /// Produce the read-only view of this value
    ///
    /// # Errors
    ///
    /// Returns an [`IntrospectError`] when the value cannot be enumerated
    /// into elements or attributes. Such faults abort the comparison; they
    /// are never reported as mismatches.
    fn introspect(&self) -> Result<Value, IntrospectError>;
}

macro_rules! introspect_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Introspect for $ty {
                fn introspect(&self) -> Result<Value, IntrospectError> {
                    Ok(Value::Scalar(Scalar::$variant(*self)))
                }
            }
        )*
    };
}

introspect_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    char => Char,
    f32 => F32,
    f64 => F64,
    Uuid => Uuid,
    Duration => Duration,
}

impl Introspect for str {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        Ok(Value::Scalar(Scalar::String(self.to_owned())))
    }
}

impl Introspect for String {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        self.as_str().introspect()
    }
}

impl Introspect for Cow<'_, str> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        self.as_ref().introspect()
    }
}

impl<Tz: TimeZone> Introspect for DateTime<Tz> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        Ok(Value::Scalar(Scalar::Timestamp(self.with_timezone(&Utc))))
    }
}

impl Introspect for SystemTime {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        Ok(Value::Scalar(Scalar::Timestamp(DateTime::<Utc>::from(*self))))
    }
}

impl Introspect for chrono::TimeDelta {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        let duration = self
            .to_std()
            .map_err(|_| IntrospectError::NegativeDuration {
                delta: self.to_string(),
            })?;
        Ok(Value::Scalar(Scalar::Duration(duration)))
    }
}

// ---------------------------------------------------------------------------
// Wrappers
// ---------------------------------------------------------------------------

/// `None` is absent; `Some` is transparent
impl<T: Introspect> Introspect for Option<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        match self {
            Some(value) => value.introspect(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Introspect + ?Sized> Introspect for &T {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        (**self).introspect()
    }
}

/// A boxed trait object yields the view of the value it holds
impl<T: Introspect + ?Sized> Introspect for Box<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        (**self).introspect()
    }
}

impl<T: Introspect + ?Sized> Introspect for Rc<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        (**self).introspect()
    }
}

impl<T: Introspect + ?Sized> Introspect for Arc<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        (**self).introspect()
    }
}

// ---------------------------------------------------------------------------
// Ordered sequences
// ---------------------------------------------------------------------------

fn sequence<'a, T, I>(type_name: &'static str, items: I) -> Result<Value, IntrospectError>
where
    T: Introspect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items = items
        .into_iter()
        .map(T::introspect)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::sequence(type_name, items))
}

impl<T: Introspect> Introspect for [T] {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        sequence("slice", self)
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        sequence("array", self)
    }
}

impl<T: Introspect> Introspect for Vec<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        sequence("Vec", self)
    }
}

impl<T: Introspect> Introspect for VecDeque<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        sequence("VecDeque", self)
    }
}

impl<T: Introspect> Introspect for BTreeSet<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        sequence("BTreeSet", self)
    }
}

// ---------------------------------------------------------------------------
// Keyed collections
// ---------------------------------------------------------------------------

/// Keys become attribute names; two keys with the same rendering are a fault
fn keyed_record<'a, V, I>(type_name: &'static str, entries: I) -> Result<Value, IntrospectError>
where
    V: Introspect + 'a,
    I: IntoIterator<Item = (String, &'a V)>,
{
    let mut seen = HashSet::new();
    let mut attributes = Vec::new();
    for (name, value) in entries {
        if !seen.insert(name.clone()) {
            return Err(IntrospectError::DuplicateKey {
                type_name: type_name.to_string(),
                key: name,
            });
        }
        attributes.push((name, value.introspect()?));
    }
    Ok(Value::record(type_name, attributes))
}

/// Entries in key order
impl<K: Display, V: Introspect> Introspect for BTreeMap<K, V> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        keyed_record("BTreeMap", self.iter().map(|(k, v)| (k.to_string(), v)))
    }
}

/// Entries sorted by rendered key, so the first mismatch does not depend on
/// the hasher
impl<K: Display, V: Introspect, S: BuildHasher> Introspect for HashMap<K, V, S> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        let mut entries: Vec<(String, &V)> =
            self.iter().map(|(k, v)| (k.to_string(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        keyed_record("HashMap", entries)
    }
}

// ---------------------------------------------------------------------------
// JSON and serde
// ---------------------------------------------------------------------------

/// Objects are records, arrays are sequences
impl Introspect for serde_json::Value {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        let value = match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => {
                let scalar = if let Some(u) = n.as_u64() {
                    Scalar::U64(u)
                } else if let Some(i) = n.as_i64() {
                    Scalar::I64(i)
                } else {
                    Scalar::F64(n.as_f64().unwrap_or(f64::NAN))
                };
                Value::Scalar(scalar)
            }
            serde_json::Value::String(s) => Value::Scalar(Scalar::String(s.clone())),
            serde_json::Value::Array(items) => sequence("array", items)?,
            serde_json::Value::Object(map) => {
                let attributes = map
                    .iter()
                    .map(|(name, value)| Ok((name.clone(), value.introspect()?)))
                    .collect::<Result<Vec<_>, IntrospectError>>()?;
                Value::record("object", attributes)
            }
        };
        Ok(value)
    }
}

impl Introspect for Value {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        Ok(self.clone())
    }
}

/// Introspects any serializable value through its JSON form
///
/// Struct fields become attributes in declaration order and map entries in
/// serialization order; type names are not preserved, so records read as
/// `object`.
///
/// # Example
///
/// ```
/// use containstate_core::introspect::{Introspect, Serialized};
///
/// #[derive(serde::Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = Serialized(Point { x: 1, y: 2 }).introspect().unwrap();
/// assert_eq!(value.as_record().map(|r| r.len()), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serialized<T>(pub T);

impl<T: Serialize> Introspect for Serialized<T> {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        let json = serde_json::to_value(&self.0).map_err(|e| IntrospectError::Serialization {
            type_name: std::any::type_name::<T>().to_string(),
            reason: e.to_string(),
        })?;
        json.introspect()
    }
}

/// Implement [`Introspect`] for a struct from its named fields
///
/// Attributes are enumerated in the order listed. Every listed field must
/// itself implement `Introspect`.
///
/// # Example
///
/// ```
/// use containstate_core::introspect_record;
/// use containstate_core::introspect::Introspect;
///
/// struct Address { city: String, zip: u32 }
/// introspect_record!(Address { city, zip });
///
/// let value = Address { city: "Oslo".into(), zip: 150 }.introspect().unwrap();
/// assert_eq!(value.as_record().unwrap().type_name(), "Address");
/// ```
#[macro_export]
macro_rules! introspect_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::introspect::Introspect for $ty {
            fn introspect(
                &self,
            ) -> ::std::result::Result<$crate::value::Value, $crate::errors::IntrospectError> {
                let attributes: ::std::vec::Vec<(&'static str, $crate::value::Value)> = ::std::vec![
                    $((
                        stringify!($field),
                        $crate::introspect::Introspect::introspect(&self.$field)?,
                    )),*
                ];
                ::std::result::Result::Ok($crate::value::Value::record(
                    stringify!($ty),
                    attributes,
                ))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Unit {}
    crate::introspect_record!(Unit {});

    struct Pair {
        left: u8,
        right: Option<String>,
    }
    crate::introspect_record!(Pair { left, right });

    #[test]
    fn test_option_is_transparent() {
        assert_eq!(Some(5u8).introspect().unwrap(), Value::Scalar(Scalar::U8(5)));
        assert_eq!(None::<u8>.introspect().unwrap(), Value::Null);
    }

    #[test]
    fn test_string_is_scalar_not_sequence() {
        let value = "abc".introspect().unwrap();
        assert_eq!(value, Value::Scalar(Scalar::String("abc".to_string())));
    }

    #[test]
    fn test_vec_is_ordered_sequence() {
        let value = vec![3u8, 1, 2].introspect().unwrap();
        let sequence = value.as_sequence().unwrap();
        assert_eq!(sequence.type_name(), "Vec");
        assert_eq!(
            sequence.items(),
            &[
                Value::Scalar(Scalar::U8(3)),
                Value::Scalar(Scalar::U8(1)),
                Value::Scalar(Scalar::U8(2)),
            ]
        );
    }

    #[test]
    fn test_btreemap_keys_become_attributes() {
        let map: BTreeMap<u32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
        let value = map.introspect().unwrap();
        let record = value.as_record().unwrap();
        let names: Vec<_> = record.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["1", "2"]);
    }

    #[test]
    fn test_colliding_key_renderings_are_a_fault() {
        #[derive(PartialEq, Eq, PartialOrd, Ord)]
        struct Key(u8);
        impl Display for Key {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("same")
            }
        }
        let map: BTreeMap<Key, u8> = [(Key(1), 1), (Key(2), 2)].into_iter().collect();
        let err = map.introspect().unwrap_err();
        assert_eq!(
            err,
            IntrospectError::DuplicateKey {
                type_name: "BTreeMap".to_string(),
                key: "same".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_time_delta_is_a_fault() {
        let err = chrono::TimeDelta::seconds(-1).introspect().unwrap_err();
        assert!(matches!(err, IntrospectError::NegativeDuration { .. }));
    }

    #[test]
    fn test_time_delta_is_duration_scalar() {
        let value = chrono::TimeDelta::milliseconds(250).introspect().unwrap();
        assert_eq!(
            value,
            Value::Scalar(Scalar::Duration(Duration::from_millis(250)))
        );
    }

    #[test]
    fn test_json_numbers_and_containers() {
        let value = json!({"n": -4, "f": 0.5, "items": [1, "x", null]})
            .introspect()
            .unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.type_name(), "object");
        assert_eq!(record.get("n"), Some(&Value::Scalar(Scalar::I64(-4))));
        assert_eq!(record.get("f"), Some(&Value::Scalar(Scalar::F64(0.5))));
        assert_eq!(record.get("items").and_then(Value::as_sequence).map(|s| s.len()), Some(3));
    }

    #[test]
    fn test_serialized_reads_struct_fields() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }
        let value = Serialized(Point { x: 1, y: -2 }).introspect().unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.get("y"), Some(&Value::Scalar(Scalar::I64(-2))));
    }

    #[test]
    fn test_serialized_keeps_declaration_order() {
        #[derive(Serialize)]
        struct Pair {
            zeta: u8,
            alpha: u8,
        }
        let value = Serialized(Pair { zeta: 1, alpha: 2 }).introspect().unwrap();
        let names: Vec<_> = value
            .as_record()
            .unwrap()
            .attributes()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_hashmap_attributes_sorted_by_rendered_key() {
        for _ in 0..20 {
            let map: HashMap<String, u8> = (0..8).map(|i| (format!("k{}", 7 - i), i)).collect();
            let value = map.introspect().unwrap();
            let names: Vec<_> = value
                .as_record()
                .unwrap()
                .attributes()
                .map(|(name, _)| name.to_string())
                .collect();
            assert_eq!(names, vec!["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"]);
        }
    }

    #[test]
    fn test_serialized_failure_is_a_fault() {
        let map: HashMap<(u8, u8), u8> = [((1, 2), 3)].into_iter().collect();
        let err = Serialized(map).introspect().unwrap_err();
        assert!(matches!(err, IntrospectError::Serialization { .. }));
    }

    #[test]
    fn test_record_macro_lists_fields_in_order() {
        let value = Pair {
            left: 1,
            right: None,
        }
        .introspect()
        .unwrap();
        assert_eq!(
            value,
            Value::record(
                "Pair",
                [("left", Value::Scalar(Scalar::U8(1))), ("right", Value::Null)]
            )
        );
    }

    #[test]
    fn test_record_macro_with_no_fields() {
        let value = Unit {}.introspect().unwrap();
        assert!(value.as_record().unwrap().is_empty());
    }

    #[test]
    fn test_trait_object_field() {
        let boxed: Box<dyn Introspect> = Box::new(7i32);
        assert_eq!(boxed.introspect().unwrap(), Value::Scalar(Scalar::I32(7)));
    }
}
