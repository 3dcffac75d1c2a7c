//! Comparison results
//!
//! A comparison either succeeds or reports the first mismatch it found.
//! Mismatches are data, not errors: they carry the location, the kind of
//! mismatch and, for leaf mismatches, both compared values.

use crate::location::Location;
use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// Kind of the first mismatch found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchKind {
    /// Leaf values differ, or exactly one side is absent
    ValueMismatch,
    /// Actual sequence ran out while expected still had elements
    ActualTooShort { actual_len: usize },
    /// Actual sequence has elements past the end of expected
    ActualTooLong { expected_len: usize },
    /// Expected attribute is not exposed by actual
    MissingAttribute { name: String },
}

impl MismatchKind {
    /// Stable short name, used in structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            MismatchKind::ValueMismatch => "value_mismatch",
            MismatchKind::ActualTooShort { .. } => "actual_too_short",
            MismatchKind::ActualTooLong { .. } => "actual_too_long",
            MismatchKind::MissingAttribute { .. } => "missing_attribute",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::ValueMismatch => {
                write!(f, "Actual value is not equal to expected value.")
            }
            MismatchKind::ActualTooShort { actual_len } => write!(
                f,
                "Actual collection (size = {}) is smaller than expected collection.",
                actual_len
            ),
            MismatchKind::ActualTooLong { expected_len } => write!(
                f,
                "Actual collection is larger than expected collection (size = {}).",
                expected_len
            ),
            MismatchKind::MissingAttribute { name } => write!(
                f,
                "Expected attribute '{}' is missing in actual object.",
                name
            ),
        }
    }
}

/// A located mismatch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    location: Location,
    #[serde(flatten)]
    kind: MismatchKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<Value>,
}

impl Mismatch {
    /// Leaf mismatch capturing both values
    pub(crate) fn values(location: Location, actual: &Value, expected: &Value) -> Self {
        Self {
            location,
            message: MismatchKind::ValueMismatch.to_string(),
            kind: MismatchKind::ValueMismatch,
            actual: Some(actual.clone()),
            expected: Some(expected.clone()),
        }
    }

    /// Structural mismatch (length or missing attribute)
    pub(crate) fn structural(location: Location, kind: MismatchKind) -> Self {
        Self {
            location,
            message: kind.to_string(),
            kind,
            actual: None,
            expected: None,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> &MismatchKind {
        &self.kind
    }

    /// Human-readable message from the fixed template set
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Actual value, captured for value mismatches only
    pub fn actual(&self) -> Option<&Value> {
        self.actual.as_ref()
    }

    /// Expected value, captured for value mismatches only
    pub fn expected(&self) -> Option<&Value> {
        self.expected.as_ref()
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.location)
    }
}

/// Outcome of a containment check
///
/// Immutable once built. Either a success carrying nothing, or the first
/// mismatch encountered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    success: bool,
    #[serde(flatten)]
    mismatch: Option<Box<Mismatch>>,
}

impl ComparisonResult {
    pub fn success() -> Self {
        Self {
            success: true,
            mismatch: None,
        }
    }

    pub fn failure(mismatch: Mismatch) -> Self {
        Self {
            success: false,
            mismatch: Some(Box::new(mismatch)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.mismatch.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.mismatch().map(Mismatch::location)
    }

    pub fn kind(&self) -> Option<&MismatchKind> {
        self.mismatch().map(Mismatch::kind)
    }

    pub fn message(&self) -> Option<&str> {
        self.mismatch().map(Mismatch::message)
    }

    pub fn actual(&self) -> Option<&Value> {
        self.mismatch().and_then(Mismatch::actual)
    }

    pub fn expected(&self) -> Option<&Value> {
        self.mismatch().and_then(Mismatch::expected)
    }

    /// Convert into a `Result` so callers can use `?`
    ///
    /// # Errors
    ///
    /// Returns the mismatch when the comparison failed.
    pub fn into_result(self) -> Result<(), Mismatch> {
        match self.mismatch {
            Some(mismatch) => Err(*mismatch),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mismatch() {
            Some(mismatch) => write!(f, "{}", mismatch),
            None => f.write_str("contained"),
        }
    }
}

impl From<Mismatch> for ComparisonResult {
    fn from(mismatch: Mismatch) -> Self {
        ComparisonResult::failure(mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;
    use serde_json::json;

    #[test]
    fn test_message_templates() {
        assert_eq!(
            MismatchKind::ActualTooShort { actual_len: 2 }.to_string(),
            "Actual collection (size = 2) is smaller than expected collection."
        );
        assert_eq!(
            MismatchKind::ActualTooLong { expected_len: 3 }.to_string(),
            "Actual collection is larger than expected collection (size = 3)."
        );
        assert_eq!(
            MismatchKind::MissingAttribute {
                name: "name".to_string()
            }
            .to_string(),
            "Expected attribute 'name' is missing in actual object."
        );
        assert_eq!(
            MismatchKind::ValueMismatch.to_string(),
            "Actual value is not equal to expected value."
        );
    }

    #[test]
    fn test_success_carries_nothing() {
        let result = ComparisonResult::success();
        assert!(result.is_success());
        assert!(result.location().is_none());
        assert!(result.message().is_none());
        assert!(result.actual().is_none());
        assert_eq!(result.to_string(), "contained");
        assert_eq!(result.into_result(), Ok(()));
    }

    #[test]
    fn test_structural_failure_has_no_values() {
        let location = Location::root().child("items").child(2usize);
        let result = ComparisonResult::failure(Mismatch::structural(
            location.clone(),
            MismatchKind::MissingAttribute {
                name: "name".to_string(),
            },
        ));
        assert!(!result.is_success());
        assert_eq!(result.location(), Some(&location));
        assert!(result.actual().is_none());
        assert!(result.expected().is_none());
        assert_eq!(
            result.to_string(),
            "Expected attribute 'name' is missing in actual object. (at /items/2)"
        );
    }

    #[test]
    fn test_value_failure_captures_both_values() {
        let actual = Value::Scalar(Scalar::I32(1));
        let expected = Value::Scalar(Scalar::I32(3));
        let result = ComparisonResult::from(Mismatch::values(
            Location::root().child(0usize),
            &actual,
            &expected,
        ));
        assert_eq!(result.actual(), Some(&actual));
        assert_eq!(result.expected(), Some(&expected));
        assert_eq!(result.kind(), Some(&MismatchKind::ValueMismatch));
    }

    #[test]
    fn test_serializes_for_diagnostics() {
        let failure = ComparisonResult::failure(Mismatch::values(
            Location::root().child("a"),
            &Value::Scalar(Scalar::U8(1)),
            &Value::Scalar(Scalar::U8(2)),
        ));
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "success": false,
                "location": ["a"],
                "kind": "value_mismatch",
                "message": "Actual value is not equal to expected value.",
                "actual": 1,
                "expected": 2
            })
        );
        assert_eq!(
            serde_json::to_value(ComparisonResult::success()).unwrap(),
            json!({"success": true})
        );
    }
}
