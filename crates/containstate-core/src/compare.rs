//! Containment comparator
//!
//! `contains(actual, expected)` checks that every piece of state described by
//! `expected` is present in `actual`. It is intentionally asymmetric: extra
//! attributes on `actual` are ignored, while sequences must match element by
//! element in order and in length.
//!
//! Each step evaluates the following rules in order; the first that applies
//! decides the step:
//!
//! 1. both absent, or both scalars with equal values: contained
//! 2. exactly one side absent: value mismatch
//! 3. expected is of an atomic type: value mismatch (never decomposed)
//! 4. both are sequences: lockstep walk, too short / too long / element mismatch
//! 5. otherwise every attribute of expected must exist on actual and be
//!    contained in it; an expected record with no attributes is contained
//!
//! The first mismatch found is returned unchanged up the call chain.
//!
//! Cyclic values are not detected and would not terminate; `Value` trees
//! built by `Introspect` cannot be cyclic.

use crate::classify::is_atomic;
use crate::core_types::schema::OP_CONTAINS;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::introspect::Introspect;
use crate::location::Location;
use crate::result::{ComparisonResult, Mismatch, MismatchKind};
use crate::value::{Record, Sequence, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;
use tracing::{debug, trace};

/// Check that `actual` contains the state of `expected`
///
/// Both sides are introspected first, then compared from the root location.
///
/// # Errors
///
/// - `Introspection`: either side failed to introspect. Mismatches are never
///   errors; they are reported in the returned `ComparisonResult`.
///
/// # Example
///
/// ```
/// use containstate_core::contains;
/// use serde_json::json;
///
/// let actual = json!({"name": "ada", "langs": ["en", "fr"], "age": 36});
/// let result = contains(&actual, &json!({"langs": ["en", "fr"]})).unwrap();
/// assert!(result.is_success());
/// ```
pub fn contains<A, E>(actual: &A, expected: &E) -> Result<ComparisonResult>
where
    A: Introspect + ?Sized,
    E: Introspect + ?Sized,
{
    let started = Instant::now();
    log_op_start!(OP_CONTAINS);

    let outcome = introspect_operand("actual", actual).and_then(|actual| {
        let expected = introspect_operand("expected", expected)?;
        Ok(contains_at(&actual, &expected, &Location::root()))
    });

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &outcome {
        Ok(result) => match result.mismatch() {
            None => {
                log_op_end!(OP_CONTAINS, duration_ms = duration_ms, success = true);
            }
            Some(mismatch) => {
                log_op_end!(
                    OP_CONTAINS,
                    duration_ms = duration_ms,
                    success = false,
                    location = %mismatch.location(),
                    mismatch = mismatch.kind().as_str(),
                );
            }
        },
        Err(err) => {
            log_op_error!(OP_CONTAINS, err.clone(), duration_ms = duration_ms);
        }
    }
    outcome
}

/// Check containment between two JSON documents given as text
///
/// # Errors
///
/// - `InvalidInput`: either text is not valid JSON
pub fn contains_json(actual: &str, expected: &str) -> Result<ComparisonResult> {
    let actual = parse_json("actual", actual)?;
    let expected = parse_json("expected", expected)?;
    contains(&actual, &expected)
}

fn parse_json(side: &'static str, text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op(OP_CONTAINS)
            .with_side(side)
            .with_message(format!("{} is not valid JSON: {}", side, e))
    })
}

fn introspect_operand<T: Introspect + ?Sized>(side: &'static str, value: &T) -> Result<Value> {
    value
        .introspect()
        .map_err(|e| ExError::from(e).with_op(OP_CONTAINS).with_side(side))
}

/// One recursive step of the comparison at `location`
///
/// Operates on already introspected values; `contains` is the usual entry
/// point.
pub fn contains_at(actual: &Value, expected: &Value, location: &Location) -> ComparisonResult {
    trace!(location = %location, "comparing");

    if naturally_equal(actual, expected) {
        return ComparisonResult::success();
    }

    if actual.is_null() || expected.is_null() {
        return fail(Mismatch::values(location.clone(), actual, expected));
    }

    if expected.type_key().is_some_and(|key| is_atomic(&key)) {
        return fail(Mismatch::values(location.clone(), actual, expected));
    }

    match (actual, expected) {
        (Value::Sequence(actual), Value::Sequence(expected)) => {
            contains_sequence(actual, expected, location)
        }
        // A sequence has no attributes to look up on a non-sequence
        (_, Value::Sequence(_)) => fail(Mismatch::values(location.clone(), actual, expected)),
        (_, Value::Record(expected)) => contains_record(actual, expected, location),
        // Scalars and absent values never get past the gates above
        (_, Value::Scalar(_)) | (_, Value::Null) => {
            fail(Mismatch::values(location.clone(), actual, expected))
        }
    }
}

/// Equality of the runtime representation: only absent values and scalars
/// have one; compound values are always decomposed
fn naturally_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Scalar(a), Value::Scalar(e)) => a == e,
        _ => false,
    }
}

fn contains_sequence(actual: &Sequence, expected: &Sequence, location: &Location) -> ComparisonResult {
    let mut actual_items = actual.items().iter();

    for (index, expected_item) in expected.items().iter().enumerate() {
        let Some(actual_item) = actual_items.next() else {
            return fail(Mismatch::structural(
                location.clone(),
                MismatchKind::ActualTooShort { actual_len: index },
            ));
        };

        let result = contains_at(actual_item, expected_item, &location.child(index));
        if !result.is_success() {
            return result;
        }
    }

    if actual_items.next().is_some() {
        return fail(Mismatch::structural(
            location.clone(),
            MismatchKind::ActualTooLong {
                expected_len: expected.len(),
            },
        ));
    }

    ComparisonResult::success()
}

fn contains_record(actual: &Value, expected: &Record, location: &Location) -> ComparisonResult {
    let actual_record = actual.as_record();

    for (name, expected_value) in expected.attributes() {
        let Some(actual_value) = actual_record.and_then(|record| record.get(name)) else {
            return fail(Mismatch::structural(
                location.clone(),
                MismatchKind::MissingAttribute {
                    name: name.to_string(),
                },
            ));
        };

        let result = contains_at(actual_value, expected_value, &location.child(name));
        if !result.is_success() {
            return result;
        }
    }

    ComparisonResult::success()
}

fn fail(mismatch: Mismatch) -> ComparisonResult {
    debug!(
        location = %mismatch.location(),
        mismatch = mismatch.kind().as_str(),
        "containment mismatch"
    );
    ComparisonResult::failure(mismatch)
}

/// Method form of [`contains`] for any introspectable value
///
/// ```
/// use containstate_core::ContainsState;
///
/// let result = vec![1, 2, 3].contains_state(&vec![1, 2]).unwrap();
/// assert!(result.is_success());
/// ```
pub trait ContainsState: Introspect {
    /// Check that `self` contains the state of `expected`
    ///
    /// # Errors
    ///
    /// See [`contains`].
    fn contains_state<E: Introspect + ?Sized>(&self, expected: &E) -> Result<ComparisonResult> {
        contains(self, expected)
    }
}

impl<T: Introspect + ?Sized> ContainsState for T {}
