//! # Panic-site backtrace capture.
//!
//! A backtrace taken after `catch_unwind` returns shows the catcher, not the
//! code that panicked. To report the real call stack, a process-wide panic hook
//! is installed once. While a thread is inside a [`TrapScope`] the hook stores
//! the panic info plus a forced backtrace into a thread-local slot and stays
//! silent; outside any scope it defers to the previously installed hook.
//!
//! ```text
//! TrapScope::enter()  ──► depth += 1
//!   guarded code panics ──► hook: depth > 0 → CAPTURED = info + backtrace
//!   catch_unwind returns Err ──► Fault::capture() ──► take_backtrace()
//! drop(TrapScope)    ──► depth -= 1
//! ```

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::panic;
use std::sync::Once;

static INSTALL: Once = Once::new();

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let depth = DEPTH.try_with(Cell::get).unwrap_or(0);
            if depth == 0 {
                previous(info);
                return;
            }
            let report = format!(
                "{info}\nstack backtrace:\n{}",
                Backtrace::force_capture()
            );
            let _ = CAPTURED.try_with(|slot| {
                if let Ok(mut slot) = slot.try_borrow_mut() {
                    *slot = Some(report);
                }
            });
        }));
    });
}

/// Marks the current thread as being inside a trapped region.
///
/// Scopes nest; the marker is thread-bound and must not cross an `.await`.
pub(crate) struct TrapScope {
    _not_send: PhantomData<*const ()>,
}

impl TrapScope {
    pub(crate) fn enter() -> Self {
        install();
        DEPTH.with(|d| d.set(d.get() + 1));
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for TrapScope {
    fn drop(&mut self) {
        let _ = DEPTH.try_with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Takes the report captured by the hook for the most recent trapped panic on this thread.
pub(crate) fn take_backtrace() -> Option<String> {
    CAPTURED
        .try_with(|slot| slot.try_borrow_mut().ok().and_then(|mut s| s.take()))
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_nest() {
        let outer = TrapScope::enter();
        let before = DEPTH.with(Cell::get);
        {
            let _inner = TrapScope::enter();
            assert_eq!(DEPTH.with(Cell::get), before + 1);
        }
        assert_eq!(DEPTH.with(Cell::get), before);
        drop(outer);
        assert_eq!(DEPTH.with(Cell::get), before - 1);
    }

    #[test]
    fn test_trapped_panic_is_captured() {
        let _scope = TrapScope::enter();
        let res = panic::catch_unwind(|| -> () { panic!("captured-here") });
        assert!(res.is_err());

        let report = take_backtrace().expect("hook should capture a report");
        assert!(report.contains("captured-here"));
        assert!(report.contains("stack backtrace"));
        assert!(take_backtrace().is_none(), "slot is emptied by take");
    }
}
