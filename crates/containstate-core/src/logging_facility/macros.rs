//! Canonical logging macros
//!
//! Every event carries `component`, `op` and `event` (see
//! `containstate_core_types::schema`). A `contains` run emits one `start`
//! event and then either one `end` event or one `end_error` event.

/// Log the start of an operation
///
/// Extra `field = value` pairs are passed through to the event.
///
/// # Example
///
/// ```
/// # use containstate_core::log_op_start;
/// log_op_start!("contains");
/// log_op_start!("contains", depth = 0);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the end of an operation that returned normally
///
/// For `contains`, a failed containment check still ends normally. The event
/// then carries `success = false`, the mismatch `location` and the
/// `mismatch` kind name (`value_mismatch`, `actual_too_short`,
/// `actual_too_long` or `missing_attribute`).
///
/// # Example
///
/// ```
/// # use containstate_core::log_op_end;
/// log_op_end!("contains", duration_ms = 3);
/// log_op_end!("contains", duration_ms = 3, success = true);
/// log_op_end!(
///     "contains",
///     duration_ms = 3,
///     success = false,
///     location = "/items/2",
///     mismatch = "missing_attribute",
/// );
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation that failed with an error
///
/// `err` is anything convertible into `ExError`; its kind and stable code
/// are emitted as `err.kind` and `err.code`. For `contains` this is an
/// introspection or invalid input error, never a mismatch.
///
/// # Example
///
/// ```
/// # use containstate_core::log_op_error;
/// use containstate_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Introspection).with_message("boom");
/// log_op_error!("contains", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
