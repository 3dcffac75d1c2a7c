//! Test assertions built on the comparator

use crate::compare::contains;
use crate::introspect::Introspect;
use crate::result::Mismatch;

/// Assert that `actual` contains the state of `expected`
///
/// Panics with the mismatch message, its location and both compared values
/// when the check fails, or with the error when either side cannot be
/// introspected.
///
/// # Example
///
/// ```
/// use containstate_core::assert_contains_state;
/// use serde_json::json;
///
/// assert_contains_state!(json!({"id": 7, "tags": ["a"]}), json!({"tags": ["a"]}));
/// ```
#[macro_export]
macro_rules! assert_contains_state {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assertions::assert_contains(&$actual, &$expected, None)
    };
    ($actual:expr, $expected:expr, $($arg:tt)+) => {
        $crate::assertions::assert_contains(&$actual, &$expected, Some(format!($($arg)+)))
    };
}

#[doc(hidden)]
#[track_caller]
pub fn assert_contains<A, E>(actual: &A, expected: &E, context: Option<String>)
where
    A: Introspect + ?Sized,
    E: Introspect + ?Sized,
{
    let prefix = context.map(|c| format!("{}: ", c)).unwrap_or_default();
    match contains(actual, expected) {
        Ok(result) => {
            if let Some(mismatch) = result.mismatch() {
                panic!("{}{}", prefix, describe(mismatch));
            }
        }
        Err(err) => panic!("{}containment check could not run: {}", prefix, err),
    }
}

fn describe(mismatch: &Mismatch) -> String {
    let mut text = format!(
        "assertion `actual contains expected` failed\n  {}\n  location: {}",
        mismatch.message(),
        mismatch.location()
    );
    for (label, value) in [("actual", mismatch.actual()), ("expected", mismatch.expected())] {
        if let Some(value) = value {
            let rendered =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value));
            text.push_str(&format!("\n  {}: {}", label, rendered));
        }
    }
    text
}
