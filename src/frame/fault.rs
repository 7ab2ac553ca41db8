//! Per-column fault barrier.
//!
//! A panic raised while copying one column is caught, logged and turned into
//! [`CopyError::Panicked`]. A process-wide panic hook, installed on first
//! use, records the panic location and backtrace while a barrier is active on
//! the current thread and stays silent; outside a barrier it forwards to the
//! previously installed hook.

use std::{
    any::Any,
    backtrace::Backtrace,
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
};

use once_cell::sync::Lazy;

use super::CopyError;
use crate::{observability::log_error, option::ConvertOptions};

#[derive(Default)]
struct BarrierState {
    depth: usize,
    capture: bool,
    location: Option<String>,
    backtrace: Option<String>,
}

thread_local! {
    static BARRIER: RefCell<BarrierState> = RefCell::new(BarrierState::default());
}

static PANIC_HOOK: Lazy<()> = Lazy::new(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let recorded = BARRIER
            .try_with(|state| {
                let Ok(mut state) = state.try_borrow_mut() else {
                    return false;
                };
                if state.depth == 0 {
                    return false;
                }
                state.location = info.location().map(ToString::to_string);
                if state.capture {
                    state.backtrace = Some(Backtrace::force_capture().to_string());
                }
                true
            })
            .unwrap_or(false);
        if !recorded {
            previous(info);
        }
    }));
});

/// Marks the current thread as inside a barrier until dropped.
struct Scope {
    outer_capture: bool,
}

impl Scope {
    fn enter(capture: bool) -> Self {
        BARRIER.with(|state| {
            let mut state = state.borrow_mut();
            state.depth += 1;
            let outer_capture = state.capture;
            state.capture = capture;
            state.location = None;
            state.backtrace = None;
            Scope { outer_capture }
        })
    }

    fn take_fault(&self) -> (Option<String>, Option<String>) {
        BARRIER.with(|state| {
            let mut state = state.borrow_mut();
            (state.location.take(), state.backtrace.take())
        })
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let _ = BARRIER.try_with(|state| {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.depth -= 1;
                state.capture = self.outer_capture;
            }
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

/// Runs `copy` for `column`, converting any panic into [`CopyError::Panicked`].
pub(crate) fn guard<T>(
    column: &str,
    options: &ConvertOptions,
    copy: impl FnOnce() -> Result<T, CopyError>,
) -> Result<T, CopyError> {
    Lazy::force(&PANIC_HOOK);
    let scope = Scope::enter(options.capture_backtrace);
    let payload = match panic::catch_unwind(AssertUnwindSafe(copy)) {
        Ok(result) => return result,
        Err(payload) => payload,
    };

    let message = panic_message(payload.as_ref());
    let (location, mut backtrace) = scope.take_fault();
    if backtrace.is_none() && options.capture_backtrace {
        // Another hook replaced ours; fall back to the catch site.
        backtrace = Some(Backtrace::force_capture().to_string());
    }
    log_error!(
        component = "fault",
        event = "column_copy_panicked",
        column = column,
        panic = %message,
        location = location.as_deref().unwrap_or("unknown"),
        backtrace = backtrace.as_deref().unwrap_or("disabled"),
    );
    Err(CopyError::Panicked {
        column: column.to_owned(),
        message,
        backtrace,
    })
}

#[cfg(test)]
mod tests {
    use super::guard;
    use crate::{frame::CopyError, option::ConvertOptions};

    #[test]
    fn passes_results_through() {
        let options = ConvertOptions::default();
        assert_eq!(guard("ok", &options, || Ok(3)).unwrap(), 3);

        let err = guard::<()>("bad", &options, || {
            Err(CopyError::TimestampOutOfRange {
                column: "bad".into(),
                row: 0,
                value: i64::MAX,
            })
        })
        .unwrap_err();
        assert!(matches!(err, CopyError::TimestampOutOfRange { .. }));
    }

    #[test]
    fn suppresses_panics_with_backtrace() {
        let options = ConvertOptions::default();
        let err = guard::<()>("boom", &options, || panic!("column exploded")).unwrap_err();
        match err {
            CopyError::Panicked {
                column,
                message,
                backtrace,
            } => {
                assert_eq!(column, "boom");
                assert_eq!(message, "column exploded");
                assert!(backtrace.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn formatted_panic_messages_and_disabled_backtraces() {
        let options = ConvertOptions::default().capture_backtrace(false);
        let row = 4;
        let err = guard::<()>("fmt", &options, || panic!("bad row {row}")).unwrap_err();
        match err {
            CopyError::Panicked {
                message, backtrace, ..
            } => {
                assert_eq!(message, "bad row 4");
                assert!(backtrace.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_barriers_restore_outer_state() {
        let options = ConvertOptions::default();
        let outer = guard("outer", &options, || {
            let inner = guard::<()>(
                "inner",
                &ConvertOptions::default().capture_backtrace(false),
                || panic!("inner"),
            );
            assert!(inner.is_err());
            Ok(1)
        });
        assert_eq!(outer.unwrap(), 1);

        let err = guard::<()>("after", &options, || panic!("after")).unwrap_err();
        assert!(matches!(
            err,
            CopyError::Panicked {
                backtrace: Some(_),
                ..
            }
        ));
    }
}
