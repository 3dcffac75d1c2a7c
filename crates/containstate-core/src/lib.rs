//! containstate core - structural containment comparison
//!
//! This crate answers one question: does an actual value contain all the
//! state described by an expected value? It provides:
//! - `Introspect`, the trait that exposes a value's shape to the comparator
//! - Type classification into atomic and compound types
//! - The recursive comparator with located, first-mismatch reporting
//! - `assert_contains_state!` for use in tests
//! - Structured logging of each comparison
//!
//! ```
//! use containstate_core::{contains, MismatchKind};
//! use serde_json::json;
//!
//! let result = contains(&json!({"a": [1, 2]}), &json!({"a": [1, 2, 3]})).unwrap();
//! assert_eq!(result.kind(), Some(&MismatchKind::ActualTooShort { actual_len: 2 }));
//! assert_eq!(result.location().unwrap().to_string(), "/a");
//! ```

pub mod assertions;
pub mod classify;
pub mod compare;
pub mod errors;
pub mod introspect;
pub mod location;
pub mod logging_facility;
pub mod result;
pub mod value;

pub use containstate_core_types as core_types;

#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use compare::{contains, contains_at, contains_json, ContainsState};
pub use errors::{ExError, ExErrorKind, IntrospectError, Result};
pub use introspect::{Introspect, Serialized};
pub use location::Location;
pub use result::{ComparisonResult, Mismatch, MismatchKind};
pub use value::{Scalar, Value};
