//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use sortmerge_core::log_op_start;
/// log_op_start!("order");
/// log_op_start!("order", len = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use sortmerge_core::log_op_end;
/// log_op_end!("order", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into an `ExError` so the event carries the
/// stable `err.kind` and `err.code` fields. With `pass_id = &PassId`, the
/// `ExError` is also stamped with the operation and the pass, and its
/// rendering is recorded as `err.message`.
///
/// # Example
///
/// ```
/// # use sortmerge_core::{log_op_error, errors::MergeError};
/// # use sortmerge_core_types::PassId;
/// let err = MergeError::TooManyItems { declared: 2 };
/// log_op_error!("length", err.clone(), duration_ms = 0);
///
/// let pass_id = PassId::new();
/// log_op_error!("length", err, pass_id = &pass_id, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, pass_id = $pass_id:expr, duration_ms = $duration:expr) => {{
        let ex_err = $crate::errors::ExError::from($err)
            .with_op($op)
            .with_pass_id($crate::core_types::PassId::clone($pass_id));
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            pass_id = %$pass_id,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err,
        );
    }};
    ($op:expr, $err:expr, pass_id = $pass_id:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err = $crate::errors::ExError::from($err)
            .with_op($op)
            .with_pass_id($crate::core_types::PassId::clone($pass_id));
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            pass_id = %$pass_id,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err,
            $($field)*
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
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
        tracing::error!(
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
